//! HTTP client for the TTS backend.

use super::query;
use super::types::{
    filename_from_disposition, HealthStatus, RemoteConfig, SynthesisMetadata, SynthesisRequest,
    SynthesisResult, VoicesResponse, DEFAULT_CONTENT_TYPE, DEFAULT_FILENAME,
};
use crate::settings::{self, Filters};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Proxy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the backend's `/api/*` endpoints.
///
/// Holds no base URL: the backend URL is a user setting that may change
/// between calls, so every method takes it explicitly.
#[derive(Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
}

impl BackendClient {
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder::new()
    }

    /// `GET {base}/api/config`.
    pub async fn fetch_config(&self, base: &str) -> Result<RemoteConfig> {
        let url = query::endpoint(base, query::CONFIG_PATH)?;
        self.get_json(url, "config").await
    }

    /// `GET {base}/api/voices` with the given filters and provider.
    pub async fn fetch_voices(
        &self,
        base: &str,
        filters: &Filters,
        provider: &str,
    ) -> Result<VoicesResponse> {
        let url = query::voices_url(base, filters, provider)?;
        let voices: VoicesResponse = self.get_json(url, "voices").await?;
        debug!(count = voices.voices.len(), "voices loaded");
        Ok(voices)
    }

    /// `GET {base}/health`.
    pub async fn health(&self, base: &str) -> Result<HealthStatus> {
        let url = query::endpoint(base, query::HEALTH_PATH)?;
        self.get_json(url, "health").await
    }

    /// `POST {base}/api/tts?api_url={provider}`.
    pub async fn synthesize(
        &self,
        base: &str,
        provider: &str,
        request: &SynthesisRequest,
    ) -> Result<SynthesisResult> {
        let url = query::tts_url(base, provider)?;
        info!(
            model = %request.model,
            sample_rate = request.sample_rate,
            chars = request.text.chars().count(),
            "TTS request"
        );
        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::transport(e, ErrorContext::new().with_source("tts")))?;
        let response = ensure_success(response).await?;

        let headers = response.headers();
        let metadata = SynthesisMetadata::from_headers(headers);
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let audio = response.bytes().await.map_err(|e| {
            Error::transport(
                e,
                ErrorContext::new()
                    .with_source("tts")
                    .with_details("reading audio body"),
            )
        })?;
        debug!(bytes = audio.len(), content_type = %content_type, "audio received");
        Ok(SynthesisResult {
            audio,
            metadata,
            content_type,
            filename,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, source: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(e, ErrorContext::new().with_source(source)))?;
        let response = ensure_success(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(e, ErrorContext::new().with_source(source)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turn a non-2xx response into [`Error::Remote`] carrying the body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "failed to read error body");
            String::new()
        }
    };
    Err(Error::Remote {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        body,
    })
}

pub struct BackendClientBuilder {
    timeout: Option<Duration>,
    proxy_url: Option<String>,
}

impl BackendClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            proxy_url: None,
        }
    }

    /// Builder seeded from `TTS_UI_HTTP_TIMEOUT_SECS` / `TTS_UI_PROXY_URL`.
    pub fn from_env() -> Self {
        Self {
            timeout: settings::env::http_timeout(),
            proxy_url: settings::env::proxy_url(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<BackendClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy_url) = &self.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path(settings::env::PROXY_VAR),
                )
            })?;
            builder = builder.proxy(proxy);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(BackendClient { http_client })
    }
}

impl Default for BackendClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
