//! Wire types for the backend's `/api/*` endpoints.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Model requested when the model field is blank.
pub const DEFAULT_MODEL: &str = "aura-2-thalia-en";
/// The only encoding this client asks for.
pub const ENCODING: &str = "linear16";
/// Sample rate used when the input is missing, unparsable or non-positive.
pub const DEFAULT_SAMPLE_RATE: u32 = 16000;

pub const DEFAULT_CONTENT_TYPE: &str = "audio/wav";
pub const DEFAULT_FILENAME: &str = "tts.wav";

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// `GET /api/config` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub deepgram_api_url: Option<String>,
    #[serde(default)]
    pub deepgram_auth_scheme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceMetadata {
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub sample: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub use_cases: Vec<String>,
}

/// A voice as listed by `/api/voices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub metadata: Option<VoiceMetadata>,
}

impl Voice {
    /// Identifier sent as `model`: canonical name, else display name.
    pub fn id(&self) -> &str {
        non_empty(self.canonical_name.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or("")
    }

    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or_else(|| self.id())
    }

    pub fn accent(&self) -> Option<&str> {
        non_empty(self.metadata.as_ref().and_then(|m| m.accent.as_deref()))
    }

    pub fn sample(&self) -> Option<&str> {
        non_empty(self.metadata.as_ref().and_then(|m| m.sample.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Distinct filter values across all voices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub architectures: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accents: Vec<String>,
    /// Older backends omit this facet.
    #[serde(default)]
    pub genders: Option<Vec<String>>,
}

/// `GET /api/voices` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicesResponse {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voices: Vec<Voice>,
    #[serde(default)]
    pub facets: Facets,
}

/// `POST /api/tts` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub model: String,
    pub encoding: &'static str,
    pub sample_rate: u32,
}

impl SynthesisRequest {
    /// Build a request from raw form input.
    ///
    /// `model` is trimmed and defaults to [`DEFAULT_MODEL`]; `sample_rate` is
    /// read as a leading integer and defaults to [`DEFAULT_SAMPLE_RATE`] when
    /// absent or not positive (zero included).
    pub fn from_input(text: impl Into<String>, model: &str, sample_rate: &str) -> Self {
        let model = model.trim();
        Self {
            text: text.into(),
            model: if model.is_empty() {
                DEFAULT_MODEL.to_string()
            } else {
                model.to_string()
            },
            encoding: ENCODING,
            sample_rate: parse_sample_rate(sample_rate),
        }
    }
}

/// Leading-integer parse: `" 24000hz"` reads as 24000, `"abc"` as nothing.
///
/// Missing, zero and negative values give [`DEFAULT_SAMPLE_RATE`]. Values
/// above `u32::MAX` are clamped to it rather than discarded.
pub fn parse_sample_rate(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut seen = false;
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| {
            seen = true;
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        });
    if !seen || negative || value == 0 {
        return DEFAULT_SAMPLE_RATE;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Response header names carrying synthesis metadata.
pub mod headers {
    pub const REQUEST_ID: &str = "dg-request-id";
    pub const MODEL_NAME: &str = "dg-model-name";
    pub const MODEL_UUID: &str = "dg-model-uuid";
    pub const CHAR_COUNT: &str = "dg-char-count";
    pub const PROJECT_ID: &str = "dg-project-id";
    pub const ERROR: &str = "dg-error";
    pub const SPEAK_URL: &str = "dg-speak-url";
}

/// Metadata read from synthesis response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisMetadata {
    pub request_id: Option<String>,
    pub model_name: Option<String>,
    pub model_uuid: Option<String>,
    pub char_count: Option<String>,
    pub project_id: Option<String>,
    pub error: Option<String>,
    pub speak_url: Option<String>,
}

impl SynthesisMetadata {
    pub fn from_headers(map: &HeaderMap) -> Self {
        let get = |name: &str| {
            map.get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            request_id: get(headers::REQUEST_ID),
            model_name: get(headers::MODEL_NAME),
            model_uuid: get(headers::MODEL_UUID),
            char_count: get(headers::CHAR_COUNT),
            project_id: get(headers::PROJECT_ID),
            error: get(headers::ERROR),
            speak_url: get(headers::SPEAK_URL),
        }
    }

    /// `(label, value)` in display order; values may be absent.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("requestId", self.request_id.as_deref()),
            ("modelName", self.model_name.as_deref()),
            ("modelUuid", self.model_uuid.as_deref()),
            ("charCount", self.char_count.as_deref()),
            ("projectId", self.project_id.as_deref()),
            ("error", self.error.as_deref()),
            ("speakUrl", self.speak_url.as_deref()),
        ]
    }
}

/// Audio and metadata returned by a successful synthesis.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio: Bytes,
    pub metadata: SynthesisMetadata,
    pub content_type: String,
    pub filename: String,
}

/// Parse `inline; filename=tts.wav` style values.
///
/// Only the final path component is kept, so `../x.wav` and `/tmp/x.wav`
/// both come back as `x.wav`.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (k, v) = part.trim().split_once('=')?;
        if !k.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        base_filename(v.trim().trim_matches('"'))
    })
}

/// Last component of `name` when it is a plain file name.
pub fn base_filename(name: &str) -> Option<String> {
    let last = name.rsplit(|c| c == '/' || c == '\\').next()?.trim();
    match last {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// `GET /health` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
