//! Transient playable references to synthesized audio.

use crate::backend::{base_filename, SynthesisResult, DEFAULT_FILENAME};
use crate::Result;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Audio blob plus the `blob:` reference handed to the player and the
/// download link. Dropping it releases the reference.
#[derive(Debug, Clone)]
pub struct AudioObject {
    url: String,
    data: Bytes,
    content_type: String,
    filename: String,
}

impl AudioObject {
    /// `filename` is reduced to its last path component; anything that
    /// cannot name a file becomes `tts.wav`.
    pub fn new(data: Bytes, content_type: impl Into<String>, filename: impl AsRef<str>) -> Self {
        Self {
            url: format!("blob:{}", uuid::Uuid::new_v4()),
            data,
            content_type: content_type.into(),
            filename: base_filename(filename.as_ref())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        }
    }

    pub fn from_result(result: &SynthesisResult) -> Self {
        Self::new(
            result.audio.clone(),
            result.content_type.clone(),
            &result.filename,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write the audio to `path`; a directory receives the suggested filename.
    pub fn save_to(&self, path: &Path) -> Result<PathBuf> {
        let target = if path.is_dir() {
            path.join(&self.filename)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&target, &self.data)?;
        tracing::info!(path = %target.display(), bytes = self.data.len(), "audio saved");
        Ok(target)
    }

    /// Link shown for download.
    pub fn download_link(&self) -> DownloadLink {
        DownloadLink {
            href: self.url.clone(),
            filename: self.filename.clone(),
        }
    }
}

/// Visible download affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}
