use super::ui::Status;
use crate::audio::DownloadLink;
use crate::view::{MetadataItem, PageView};

/// Everything visible on the page at a given moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: PageView,
    /// Model field; mirrors the selected voice unless edited by hand.
    pub model: String,
    /// Raw sample-rate field.
    pub sample_rate: String,
    pub status: Status,
    /// Submit control disabled while a synthesis is in flight.
    pub busy: bool,
    pub player_source: Option<String>,
    /// `Some` when the download control is visible.
    pub download: Option<DownloadLink>,
    pub metadata: Vec<MetadataItem>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            page: PageView::empty(),
            model: String::new(),
            sample_rate: String::new(),
            status: Status::Idle,
            busy: false,
            player_source: None,
            download: None,
            metadata: Vec::new(),
        }
    }

    pub fn download_visible(&self) -> bool {
        self.download.is_some()
    }

    pub fn sample_link_visible(&self) -> bool {
        self.page.sample_link.is_some()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
