//! Client UI controller: wires settings, the backend client and the
//! view-model together.
//!
//! Every operation is a single attempt. Failures are shown through the
//! [`UiSurface`] and leave the controller idle and re-triggerable.

mod state;
pub mod ui;

pub use state::ViewState;
pub use ui::{AudioPlayer, InMemorySurface, NullPlayer, Status, TracingSurface, UiSurface};

use crate::audio::AudioObject;
use crate::backend::{BackendClient, Facets, SynthesisRequest, Voice};
use crate::settings::{FilterField, Filters, Settings};
use crate::view::{self, Selection};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Controller {
    settings: Settings,
    client: BackendClient,
    surface: Arc<dyn UiSurface>,
    player: Arc<dyn AudioPlayer>,
    /// Filter selects as shown; edits are persisted, render adjustments are not.
    form: Filters,
    voices: Vec<Voice>,
    facets: Facets,
    audio: Option<AudioObject>,
    state: ViewState,
}

impl Controller {
    pub fn new(
        settings: Settings,
        client: BackendClient,
        surface: Arc<dyn UiSurface>,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        let form = settings.filters().clone();
        Self {
            settings,
            client,
            surface,
            player,
            form,
            voices: Vec::new(),
            facets: Facets::default(),
            audio: None,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn filters(&self) -> &Filters {
        &self.form
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Current playback session, if any.
    pub fn audio(&self) -> Option<&AudioObject> {
        self.audio.as_ref()
    }

    /// Startup sequence: remote config, then voices regardless of the
    /// config outcome.
    pub async fn start(&mut self) -> Result<()> {
        self.load_config().await;
        self.load_voices().await
    }

    /// Fetch `/api/config`. Failures fall back silently to persisted or
    /// default values. Returns whether the backend answered.
    pub async fn load_config(&mut self) -> bool {
        match self.client.fetch_config(self.settings.backend_url()).await {
            Ok(cfg) => {
                self.settings
                    .apply_remote_provider(cfg.deepgram_api_url.as_deref());
                debug!(provider = self.settings.provider_url(), "config loaded");
                true
            }
            Err(e) => {
                warn!("config fetch failed, using local provider URL: {}", e);
                self.settings.apply_remote_provider(None);
                false
            }
        }
    }

    /// Fetch voices for the current filters and re-render the panel.
    pub async fn load_voices(&mut self) -> Result<()> {
        self.set_status(Status::LoadingVoices);
        let result = self
            .client
            .fetch_voices(
                self.settings.backend_url(),
                &self.form,
                self.settings.provider_url(),
            )
            .await;
        match result {
            Ok(resp) => {
                self.voices = resp.voices;
                self.facets = resp.facets;
                self.rerender(None);
                let count = self.voices.len();
                info!(count, "voices loaded");
                self.set_status(Status::VoicesLoaded(count));
                Ok(())
            }
            Err(e) => {
                warn!("voice fetch failed: {}", e);
                self.surface
                    .alert(&format!("Failed to load voices: {}", e));
                self.set_status(Status::Error("failed to load voices".into()));
                Err(e)
            }
        }
    }

    /// User edited a filter: persist it and reload voices.
    pub async fn change_filter(&mut self, field: FilterField, value: &str) -> Result<()> {
        self.edit_filter(field, value);
        self.load_voices().await
    }

    /// Persist a filter edit without fetching.
    pub fn edit_filter(&mut self, field: FilterField, value: &str) {
        self.form.set(field, value.trim());
        if let Err(e) = self.settings.set_filters(self.form.clone()) {
            warn!("filter not persisted: {}", e);
        }
    }

    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        self.settings.set_backend_url(url)
    }

    pub fn set_provider_url(&mut self, url: &str) -> Result<()> {
        self.settings.set_provider_url(url)
    }

    /// Voice select changed: mirror the identifier into the model field and
    /// show the sample link only if this voice has one.
    pub fn select_voice(&mut self, value: &str) {
        let Some(option) = self.state.page.voice(value) else {
            debug!(voice = value, "ignoring selection of unknown voice");
            return;
        };
        let value = option.value.clone();
        self.rerender(Some(&value));
    }

    /// Manual edit of the model field.
    pub fn set_model(&mut self, model: &str) {
        self.state.model = model.to_string();
    }

    pub fn set_sample_rate(&mut self, sample_rate: &str) {
        self.state.sample_rate = sample_rate.to_string();
    }

    /// Synthesize `text` with the current model and sample rate.
    ///
    /// `busy` is set for the duration of the request. Holding `&mut self`
    /// means no other submission can run meanwhile, so a `busy` flag seen on
    /// entry belongs to a request whose future was dropped; it is cleared and
    /// the new submission proceeds.
    pub async fn submit(&mut self, text: &str) -> Result<()> {
        if self.state.busy {
            warn!("previous synthesis was abandoned before completing");
            self.state.busy = false;
        }
        if text.trim().is_empty() {
            self.surface.alert("Please enter some text to synthesize.");
            return Err(Error::validation_with_context(
                "Text is required",
                ErrorContext::new().with_field_path("request.text"),
            ));
        }

        let request = SynthesisRequest::from_input(text, &self.state.model, &self.state.sample_rate);
        self.state.busy = true;
        self.release_audio();
        self.set_status(Status::Synthesizing);

        let result = self
            .client
            .synthesize(
                self.settings.backend_url(),
                self.settings.provider_url(),
                &request,
            )
            .await;
        self.state.busy = false;

        match result {
            Ok(result) => {
                self.state.metadata = view::metadata_items(&result.metadata);
                let audio = AudioObject::from_result(&result);
                self.state.player_source = Some(audio.url().to_string());
                self.state.download = Some(audio.download_link());
                if let Err(e) = self.player.play(&audio).await {
                    debug!("autoplay failed: {}", e);
                }
                self.audio = Some(audio);
                self.set_status(Status::Done);
                Ok(())
            }
            Err(e) => {
                warn!("synthesis failed: {}", e);
                self.surface.alert(&format!("TTS failed: {}", e));
                self.set_status(Status::Error("synthesis failed".into()));
                Err(e)
            }
        }
    }

    /// Drop the previous playback session before a new request.
    fn release_audio(&mut self) {
        self.player.clear();
        self.audio = None;
        self.state.player_source = None;
        self.state.download = None;
        self.state.metadata.clear();
    }

    fn rerender(&mut self, voice: Option<&str>) {
        let page = view::render(
            &self.voices,
            &self.facets,
            Selection {
                filters: &self.form,
                voice,
            },
        );
        self.form = page.shown_filters();
        if let Some(model) = &page.model {
            self.state.model = model.clone();
        }
        self.state.page = page;
    }

    fn set_status(&mut self, status: Status) {
        self.surface.status(&status);
        self.state.status = status;
    }
}
