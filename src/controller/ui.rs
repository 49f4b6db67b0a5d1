//! The controller's view of the outside world: alerts, status line, player.

use crate::audio::AudioObject;
use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Status line indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    LoadingVoices,
    VoicesLoaded(usize),
    Synthesizing,
    Done,
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Idle"),
            Status::LoadingVoices => write!(f, "Loading voices..."),
            Status::VoicesLoaded(n) => write!(f, "Loaded {} voices", n),
            Status::Synthesizing => write!(f, "Synthesizing..."),
            Status::Done => write!(f, "Done"),
            Status::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Where user-facing messages go.
pub trait UiSurface: Send + Sync {
    /// Blocking, user-visible message.
    fn alert(&self, message: &str);
    fn status(&self, status: &Status);
}

/// Audio output. Playback-start failures are ignored by the controller.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, audio: &AudioObject) -> Result<()>;
    /// Drop the current source.
    fn clear(&self) {}
}

/// Surface that only logs.
#[derive(Debug, Default)]
pub struct TracingSurface;

impl UiSurface for TracingSurface {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = true, "{}", message);
    }

    fn status(&self, status: &Status) {
        tracing::info!(status = %status);
    }
}

/// Records everything it is shown; for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct InMemorySurface {
    alerts: Arc<RwLock<Vec<String>>>,
    statuses: Arc<RwLock<Vec<Status>>>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.statuses
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_status(&self) -> Option<Status> {
        self.statuses().last().cloned()
    }
}

impl UiSurface for InMemorySurface {
    fn alert(&self, message: &str) {
        self.alerts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }

    fn status(&self, status: &Status) {
        self.statuses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(status.clone());
    }
}

/// Player that plays nothing.
#[derive(Debug, Default)]
pub struct NullPlayer;

#[async_trait]
impl AudioPlayer for NullPlayer {
    async fn play(&self, _audio: &AudioObject) -> Result<()> {
        Ok(())
    }
}
