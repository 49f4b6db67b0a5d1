//! Environment knobs.

use super::types::DEFAULT_ORIGIN;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const ORIGIN_VAR: &str = "TTS_UI_ORIGIN";
pub const SETTINGS_PATH_VAR: &str = "TTS_UI_SETTINGS_PATH";
pub const TIMEOUT_VAR: &str = "TTS_UI_HTTP_TIMEOUT_SECS";
pub const PROXY_VAR: &str = "TTS_UI_PROXY_URL";

/// Backend URL to use when none is persisted.
pub fn origin() -> String {
    env::var(ORIGIN_VAR)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
}

/// Settings file location: `$TTS_UI_SETTINGS_PATH`, else
/// `<config dir>/tts-ui/settings.json`, else `./tts-ui-settings.json`.
pub fn settings_path() -> PathBuf {
    if let Ok(p) = env::var(SETTINGS_PATH_VAR) {
        if !p.trim().is_empty() {
            return PathBuf::from(p);
        }
    }
    dirs::config_dir()
        .map(|d| d.join("tts-ui").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("tts-ui-settings.json"))
}

/// Request timeout; unset means requests may hang indefinitely.
pub fn http_timeout() -> Option<Duration> {
    env::var(TIMEOUT_VAR)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
}

pub fn proxy_url() -> Option<String> {
    env::var(PROXY_VAR).ok().filter(|s| !s.trim().is_empty())
}
