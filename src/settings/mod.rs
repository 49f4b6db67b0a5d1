//! # Settings
//!
//! Persisted user settings: backend URL, provider URL override and the voice
//! filter set.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Settings`] | Resolved settings, written through on every change |
//! | [`SettingsStore`] | Trait for string-keyed persistent storage |
//! | [`MemoryStore`] | In-process store |
//! | [`FileStore`] | JSON file store |
//! | [`Filters`] | Architecture / language / accent / gender selection |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tts_ui_client::settings::{MemoryStore, Settings, FilterField};
//!
//! let mut settings = Settings::load(Arc::new(MemoryStore::new()), "http://localhost:8000")?;
//! settings.set_filter(FilterField::Language, "en")?;
//! assert_eq!(settings.filters().language, "en");
//! # Ok::<(), tts_ui_client::Error>(())
//! ```

pub mod env;
mod state;
mod store;
mod types;

pub use state::Settings;
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use types::{keys, FilterField, Filters, DEFAULT_ORIGIN, DEFAULT_PROVIDER_URL};
