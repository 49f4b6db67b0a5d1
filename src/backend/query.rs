//! URL construction for backend endpoints.

use crate::settings::Filters;
use crate::{Error, ErrorContext, Result};
use url::Url;

pub const CONFIG_PATH: &str = "/api/config";
pub const VOICES_PATH: &str = "/api/voices";
pub const TTS_PATH: &str = "/api/tts";
pub const HEALTH_PATH: &str = "/health";

/// `{base}{path}` as a parsed URL.
pub fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!("{}{}", base.trim().trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid backend URL: {}", e),
            ErrorContext::new()
                .with_field_path("settings.backend_url")
                .with_details(raw),
        )
    })
}

/// `GET {base}/api/voices?<non-blank filters>&api_url={provider}`.
pub fn voices_url(base: &str, filters: &Filters, provider: &str) -> Result<Url> {
    let mut url = endpoint(base, VOICES_PATH)?;
    {
        let mut q = url.query_pairs_mut();
        for (name, value) in filters.query_pairs() {
            q.append_pair(name, value);
        }
        q.append_pair("api_url", provider);
    }
    Ok(url)
}

/// `POST {base}/api/tts?api_url={provider}`.
pub fn tts_url(base: &str, provider: &str) -> Result<Url> {
    let mut url = endpoint(base, TTS_PATH)?;
    url.query_pairs_mut().append_pair("api_url", provider);
    Ok(url)
}
