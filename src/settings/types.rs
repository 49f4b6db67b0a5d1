//! Settings value types.

use serde::{Deserialize, Serialize};

/// Provider base URL used when neither the store nor the backend names one.
pub const DEFAULT_PROVIDER_URL: &str = "https://api.deepgram.com";

/// Backend base URL used when nothing is persisted.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Store keys.
pub mod keys {
    pub const BACKEND_URL: &str = "backend_url";
    pub const PROVIDER_URL: &str = "provider_url";
    pub const FILTERS: &str = "filters";
}

/// One of the four voice filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Architecture,
    Language,
    Accent,
    Gender,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Architecture,
        FilterField::Language,
        FilterField::Accent,
        FilterField::Gender,
    ];

    /// Query parameter (and JSON field) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Language => "language",
            Self::Accent => "accent",
            Self::Gender => "gender",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Voice filter selection. Empty string means "Any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub accent: String,
    #[serde(default)]
    pub gender: String,
}

impl Filters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Architecture => &self.architecture,
            FilterField::Language => &self.language,
            FilterField::Accent => &self.accent,
            FilterField::Gender => &self.gender,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Architecture => self.architecture = value,
            FilterField::Language => self.language = value,
            FilterField::Accent => self.accent = value,
            FilterField::Gender => self.gender = value,
        }
    }

    /// Non-blank filters as trimmed `(name, value)` pairs, in field order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|f| {
                let v = self.get(f).trim();
                (!v.is_empty()).then_some((f.as_str(), v))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_blank_and_trim() {
        let filters = Filters {
            architecture: " aura-2 ".into(),
            language: "".into(),
            accent: "   ".into(),
            gender: "feminine".into(),
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("architecture", "aura-2"), ("gender", "feminine")]
        );
        assert!(Filters::default().is_empty());
    }

    #[test]
    fn filters_tolerate_missing_json_fields() {
        let f: Filters = serde_json::from_str(r#"{"language":"en"}"#).unwrap();
        assert_eq!(f.language, "en");
        assert_eq!(f.architecture, "");
    }

    #[test]
    fn filter_field_parse_is_case_insensitive() {
        assert_eq!(FilterField::parse("Accent"), Some(FilterField::Accent));
        assert_eq!(FilterField::parse("speed"), None);
    }
}
