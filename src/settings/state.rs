use super::store::SettingsStore;
use super::types::{keys, FilterField, Filters, DEFAULT_PROVIDER_URL};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// User settings, backed by a [`SettingsStore`].
///
/// Every mutation is written through to the store immediately. The provider
/// URL has two layers: a persisted override that always wins, and the value
/// advertised by the backend's `/api/config`.
pub struct Settings {
    store: Arc<dyn SettingsStore>,
    origin: String,
    backend_url: Option<String>,
    provider_override: Option<String>,
    remote_provider: Option<String>,
    filters: Filters,
}

impl Settings {
    /// Restore settings from `store`. `origin` is the backend URL used when
    /// none is persisted.
    ///
    /// A malformed filter record is ignored and the filters stay empty.
    pub fn load(store: Arc<dyn SettingsStore>, origin: impl Into<String>) -> Result<Self> {
        let backend_url = non_blank(store.get(keys::BACKEND_URL)?);
        let provider_override = non_blank(store.get(keys::PROVIDER_URL)?);
        let filters = store
            .get(keys::FILTERS)?
            .and_then(|raw| serde_json::from_str::<Filters>(&raw).ok())
            .unwrap_or_default();
        debug!(
            store = store.name(),
            backend = ?backend_url,
            provider = ?provider_override,
            "settings restored"
        );
        Ok(Self {
            store,
            origin: origin.into().trim().trim_end_matches('/').to_string(),
            backend_url,
            provider_override,
            remote_provider: None,
            filters,
        })
    }

    /// Effective backend base URL, without trailing slash.
    pub fn backend_url(&self) -> &str {
        self.backend_url
            .as_deref()
            .unwrap_or(&self.origin)
            .trim_end_matches('/')
    }

    /// Effective provider base URL: override, then backend config, then default.
    pub fn provider_url(&self) -> &str {
        self.provider_override
            .as_deref()
            .or(self.remote_provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER_URL)
    }

    pub fn provider_override(&self) -> Option<&str> {
        self.provider_override.as_deref()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        self.store.set(keys::BACKEND_URL, url)?;
        self.backend_url = non_blank(Some(url.to_string()));
        Ok(())
    }

    /// Persist a provider override. A blank value clears the override.
    pub fn set_provider_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        self.store.set(keys::PROVIDER_URL, url)?;
        self.provider_override = non_blank(Some(url.to_string()));
        Ok(())
    }

    /// Record the provider URL advertised by the backend.
    ///
    /// Never persisted and never overrides a stored value.
    pub fn apply_remote_provider(&mut self, url: Option<&str>) {
        self.remote_provider = non_blank(url.map(str::to_string));
        if self.provider_override.is_some() && self.remote_provider.is_some() {
            debug!("persisted provider override wins over backend config");
        }
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) -> Result<()> {
        self.filters.set(field, value);
        self.persist_filters()
    }

    pub fn set_filters(&mut self, filters: Filters) -> Result<()> {
        self.filters = filters;
        self.persist_filters()
    }

    fn persist_filters(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.filters)?;
        self.store.set(keys::FILTERS, &raw).map_err(|e| {
            warn!("failed to persist filters: {}", e);
            e
        })
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    fn load(store: MemoryStore) -> Settings {
        Settings::load(Arc::new(store), "http://origin.test/").unwrap()
    }

    #[test]
    fn defaults_fall_back_to_origin_and_default_provider() {
        let s = load(MemoryStore::new());
        assert_eq!(s.backend_url(), "http://origin.test");
        assert_eq!(s.provider_url(), DEFAULT_PROVIDER_URL);
        assert_eq!(s.filters(), &Filters::default());
    }

    #[test]
    fn malformed_filters_are_ignored() {
        let s = load(MemoryStore::new().with_entry(keys::FILTERS, "{oops"));
        assert_eq!(s.filters(), &Filters::default());
    }

    #[test]
    fn persisted_filters_are_restored() {
        let s = load(
            MemoryStore::new()
                .with_entry(keys::FILTERS, r#"{"architecture":"aura-2","accent":"British"}"#),
        );
        assert_eq!(s.filters().architecture, "aura-2");
        assert_eq!(s.filters().accent, "British");
    }

    #[test]
    fn override_beats_remote_provider() {
        let mut s = load(MemoryStore::new().with_entry(keys::PROVIDER_URL, "https://eu.example"));
        s.apply_remote_provider(Some("https://remote.example"));
        assert_eq!(s.provider_url(), "https://eu.example");

        let mut s = load(MemoryStore::new());
        s.apply_remote_provider(Some("https://remote.example"));
        assert_eq!(s.provider_url(), "https://remote.example");
    }

    #[test]
    fn setters_write_trimmed_values_through() {
        let store = Arc::new(MemoryStore::new());
        let mut s = Settings::load(store.clone(), "http://origin.test").unwrap();
        s.set_backend_url("  http://backend.test/  ").unwrap();
        s.set_filter(FilterField::Language, "en").unwrap();

        assert_eq!(
            store.get(keys::BACKEND_URL).unwrap().as_deref(),
            Some("http://backend.test/")
        );
        assert_eq!(s.backend_url(), "http://backend.test");
        let raw = store.get(keys::FILTERS).unwrap().unwrap();
        let back: Filters = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.language, "en");
    }

    #[test]
    fn blank_provider_clears_override() {
        let mut s = load(MemoryStore::new().with_entry(keys::PROVIDER_URL, "https://eu.example"));
        s.set_provider_url("   ").unwrap();
        assert_eq!(s.provider_override(), None);
        assert_eq!(s.provider_url(), DEFAULT_PROVIDER_URL);
    }
}
