//! # tts-ui-client
//!
//! Client for a text-to-speech backend: browse and filter voices, submit
//! text for synthesis, play and save the resulting audio.
//!
//! ## Overview
//!
//! The backend exposes three endpoints (`/api/config`, `/api/voices`,
//! `/api/tts`) and proxies to an external TTS provider. This crate is the
//! client side of that contract: a [`Controller`] that owns the user's
//! settings and the visible state, a [`BackendClient`] for the HTTP calls,
//! and a declarative [`view`] layer that maps fetched voices and the current
//! selection to a render description.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tts_ui_client::controller::{NullPlayer, TracingSurface};
//! use tts_ui_client::settings::{MemoryStore, Settings};
//! use tts_ui_client::{BackendClient, Controller};
//!
//! #[tokio::main]
//! async fn main() -> tts_ui_client::Result<()> {
//!     let settings = Settings::load(Arc::new(MemoryStore::new()), "http://localhost:8000")?;
//!     let client = BackendClient::builder().build()?;
//!     let mut ui = Controller::new(
//!         settings,
//!         client,
//!         Arc::new(TracingSurface),
//!         Arc::new(NullPlayer),
//!     );
//!
//!     ui.start().await?;
//!     ui.submit("Hello from the demo client").await?;
//!     if let Some(audio) = ui.audio() {
//!         audio.save_to(std::path::Path::new("tts.wav"))?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`controller`] | UI controller, status line, alert and player seams |
//! | [`backend`] | HTTP client and wire types |
//! | [`settings`] | Persisted settings and key-value stores |
//! | [`view`] | Pure view-model functions |
//! | [`audio`] | Transient playable references to synthesized audio |

pub mod audio;
pub mod backend;
pub mod controller;
pub mod settings;
pub mod view;

pub use backend::{BackendClient, BackendClientBuilder};
pub use controller::Controller;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
