//! Declarative view-model for the voice panel and synthesis output.
//!
//! Everything here is a pure function of fetched data and the current
//! selection; the controller owns state and I/O and only asks this module
//! what the panel should look like.

use crate::backend::{Facets, SynthesisMetadata, Voice};
use crate::settings::Filters;

/// Label of the blank placeholder option in every filter select.
pub const ANY_LABEL: &str = "Any";
/// Architecture preselected when available and nothing was chosen before.
pub const PREFERRED_ARCHITECTURE: &str = "aura-2";
/// Gender choices offered when the backend does not report a gender facet.
pub const DEFAULT_GENDERS: [&str; 2] = ["feminine", "masculine"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A `<select>`: options plus the selected value (`""` is "Any").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl SelectView {
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Build a filter select from facet values.
///
/// The previous selection survives if it is still offered. Otherwise
/// `preferred` is chosen when offered and nothing was selected before.
pub fn facet_select<S: AsRef<str>>(
    values: &[S],
    previous: &str,
    preferred: Option<&str>,
) -> SelectView {
    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(SelectOption {
        value: String::new(),
        label: ANY_LABEL.to_string(),
    });
    options.extend(values.iter().map(|v| SelectOption {
        value: v.as_ref().to_string(),
        label: v.as_ref().to_string(),
    }));

    let previous = previous.trim();
    let mut view = SelectView {
        options,
        selected: String::new(),
    };
    if !previous.is_empty() && view.contains(previous) {
        view.selected = previous.to_string();
    } else if previous.is_empty() {
        if let Some(p) = preferred.filter(|p| view.contains(p)) {
            view.selected = p.to_string();
        }
    }
    view
}

/// One entry of the voice select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOption {
    /// Canonical identifier, or display name when there is none.
    pub value: String,
    /// Display name with an optional ` (accent)` suffix.
    pub label: String,
    pub sample: Option<String>,
}

pub fn voice_options(voices: &[Voice]) -> Vec<VoiceOption> {
    voices
        .iter()
        .map(|v| {
            let label = match v.accent() {
                Some(accent) => format!("{} ({})", v.display_name(), accent),
                None => v.display_name().to_string(),
            };
            VoiceOption {
                value: v.id().to_string(),
                label,
                sample: v.sample().map(str::to_string),
            }
        })
        .collect()
}

/// Current user choices that feed [`render`].
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub filters: &'a Filters,
    /// Chosen voice; `None` picks the first voice.
    pub voice: Option<&'a str>,
}

/// Render description of the filter/voice panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub architecture: SelectView,
    pub language: SelectView,
    pub accent: SelectView,
    pub gender: SelectView,
    pub voices: Vec<VoiceOption>,
    pub selected_voice: Option<String>,
    /// Value the model field must take; `None` leaves it untouched.
    pub model: Option<String>,
    /// Sample link of the selected voice; `None` hides the link.
    pub sample_link: Option<String>,
}

impl PageView {
    pub fn empty() -> Self {
        render(&[], &Facets::default(), Selection {
            filters: &Filters::default(),
            voice: None,
        })
    }

    /// Filter values as shown by the selects.
    pub fn shown_filters(&self) -> Filters {
        Filters {
            architecture: self.architecture.selected.clone(),
            language: self.language.selected.clone(),
            accent: self.accent.selected.clone(),
            gender: self.gender.selected.clone(),
        }
    }

    pub fn voice(&self, value: &str) -> Option<&VoiceOption> {
        self.voices.iter().find(|o| o.value == value)
    }
}

pub fn render(voices: &[Voice], facets: &Facets, selection: Selection<'_>) -> PageView {
    let filters = selection.filters;
    let genders: Vec<&str> = match &facets.genders {
        Some(g) if !g.is_empty() => g.iter().map(String::as_str).collect(),
        _ => DEFAULT_GENDERS.to_vec(),
    };
    let options = voice_options(voices);
    let chosen = selection
        .voice
        .and_then(|v| options.iter().find(|o| o.value == v))
        .or_else(|| options.first());

    PageView {
        architecture: facet_select(
            &facets.architectures,
            &filters.architecture,
            Some(PREFERRED_ARCHITECTURE),
        ),
        language: facet_select(&facets.languages, &filters.language, None),
        accent: facet_select(&facets.accents, &filters.accent, None),
        gender: facet_select(&genders, &filters.gender, None),
        selected_voice: chosen.map(|o| o.value.clone()),
        model: chosen.map(|o| o.value.clone()),
        sample_link: chosen.and_then(|o| o.sample.clone()),
        voices: options,
    }
}

/// One rendered metadata row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataItem {
    pub label: &'static str,
    pub value: String,
}

/// Non-blank metadata fields in display order.
pub fn metadata_items(meta: &SynthesisMetadata) -> Vec<MetadataItem> {
    meta.fields()
        .into_iter()
        .filter_map(|(label, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| MetadataItem {
                label,
                value: value.to_string(),
            })
        })
        .collect()
}

/// `label: value` lines, or `None` when there is nothing to show.
pub fn render_metadata(items: &[MetadataItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|i| format!("{}: {}", i.label, i.value))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::VoiceMetadata;

    fn voice(canonical: Option<&str>, name: &str, accent: Option<&str>, sample: Option<&str>) -> Voice {
        Voice {
            canonical_name: canonical.map(String::from),
            name: Some(name.to_string()),
            metadata: Some(VoiceMetadata {
                accent: accent.map(String::from),
                sample: sample.map(String::from),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn facet_select_has_placeholder_first() {
        let view = facet_select(&["en", "es"], "", None);
        assert_eq!(view.options[0].value, "");
        assert_eq!(view.options[0].label, "Any");
        assert_eq!(view.options.len(), 3);
        assert_eq!(view.selected, "");
    }

    #[test]
    fn facet_select_keeps_previous_when_present() {
        assert_eq!(facet_select(&["en", "es"], "es", None).selected, "es");
        assert_eq!(facet_select(&["en"], "de", None).selected, "");
    }

    #[test]
    fn preferred_only_without_prior_selection() {
        let values = ["aura-1", "aura-2"];
        assert_eq!(facet_select(&values, "", Some("aura-2")).selected, "aura-2");
        assert_eq!(facet_select(&values, "aura-1", Some("aura-2")).selected, "aura-1");
        assert_eq!(facet_select(&["aura-1"], "", Some("aura-2")).selected, "");
    }

    #[test]
    fn voice_option_value_and_label() {
        let opts = voice_options(&[
            voice(Some("aura-2-thalia-en"), "Thalia", Some("American"), None),
            voice(None, "Orion", None, Some("https://x/orion.wav")),
        ]);
        assert_eq!(opts[0].value, "aura-2-thalia-en");
        assert_eq!(opts[0].label, "Thalia (American)");
        assert_eq!(opts[1].value, "Orion");
        assert_eq!(opts[1].label, "Orion");
        assert_eq!(opts[1].sample.as_deref(), Some("https://x/orion.wav"));
    }

    #[test]
    fn render_auto_selects_first_voice() {
        let voices = vec![voice(Some("aura-2-thalia-en"), "Thalia", None, None)];
        let facets = Facets {
            architectures: vec!["aura-2".into()],
            languages: vec!["en".into()],
            ..Default::default()
        };
        let filters = Filters::default();
        let page = render(&voices, &facets, Selection {
            filters: &filters,
            voice: None,
        });
        assert_eq!(page.voices.len(), 1);
        assert_eq!(page.voices[0].label, "Thalia");
        assert_eq!(page.model.as_deref(), Some("aura-2-thalia-en"));
        assert_eq!(page.architecture.selected, "aura-2");
        assert_eq!(page.sample_link, None);
        assert_eq!(page.accent.options.len(), 1);
    }

    #[test]
    fn render_without_voices_leaves_model_alone() {
        let page = PageView::empty();
        assert!(page.voices.is_empty());
        assert_eq!(page.model, None);
        assert_eq!(page.selected_voice, None);
    }

    #[test]
    fn gender_select_uses_facet_or_defaults() {
        let page = PageView::empty();
        assert_eq!(page.gender.options.len(), 3);
        let facets = Facets {
            genders: Some(vec!["feminine".into()]),
            ..Default::default()
        };
        let filters = Filters::default();
        let page = render(&[], &facets, Selection {
            filters: &filters,
            voice: None,
        });
        assert_eq!(page.gender.options.len(), 2);
    }

    #[test]
    fn metadata_omits_blank_fields() {
        let meta = SynthesisMetadata {
            request_id: Some("req-1".into()),
            model_name: Some("  ".into()),
            char_count: Some("5".into()),
            ..Default::default()
        };
        let items = metadata_items(&meta);
        assert_eq!(items.len(), 2);
        assert_eq!(
            render_metadata(&items).as_deref(),
            Some("requestId: req-1\ncharCount: 5")
        );
        assert_eq!(render_metadata(&metadata_items(&SynthesisMetadata::default())), None);
    }
}
