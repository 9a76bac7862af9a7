use crate::history_store::HistoryStore;
use braillevoice_core::history::HistoryEntry;
use braillevoice_core::stats::{Summary, percent_label, summarize};
use braillevoice_core::types::Page;
use chrono::DateTime;

/// What the shell must do after a navigation: write the fragment, set the
/// title, and render the page-specific load.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub page: Page,
    pub fragment: &'static str,
    pub title: &'static str,
    pub load: PageLoad,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad {
    /// Dashboard analytics come from an external source; the shell refreshes
    /// them on this marker.
    RefreshDashboard,
    /// Rendered rows, newest first. Empty means the shell shows the
    /// empty-state message.
    History(Vec<HistoryRow>),
    /// Converter-page summary recomputed from the same history sequence.
    ConverterSummary(Summary),
    None,
}

/// One history entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// 1-based sequence number, newest first.
    pub ordinal: usize,
    pub text: String,
    pub confidence_label: String,
    pub timestamp_label: String,
    pub duration_label: String,
}

pub fn render_history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| HistoryRow {
            ordinal: i + 1,
            text: e.text.clone(),
            confidence_label: percent_label(e.confidence),
            timestamp_label: local_timestamp_label(&e.timestamp),
            duration_label: format!("{}s", e.duration),
        })
        .collect()
}

fn local_timestamp_label(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(ts) => ts.with_timezone(&chrono::Local).format("%c").to_string(),
        // An unparsable stamp is shown as stored rather than dropped.
        Err(_) => iso.to_string(),
    }
}

/// Owns the active page and keeps it in sync with the URL fragment.
pub struct ViewRouter {
    current: Page,
    overlay_open: bool,
    history: HistoryStore,
}

impl ViewRouter {
    /// Initial page is the converter unless the startup fragment names a
    /// different valid page.
    pub fn new(startup_fragment: Option<&str>, history: HistoryStore) -> Self {
        let current = startup_fragment
            .and_then(Page::from_fragment)
            .unwrap_or(Page::Converter);
        Self {
            current,
            overlay_open: false,
            history,
        }
    }

    pub fn current_page(&self) -> Page {
        self.current
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay_open = !self.overlay_open;
    }

    /// Activates a page and returns what the shell should render. Every
    /// navigation closes the mobile overlay.
    pub fn navigate_to_page(&mut self, page: Page) -> anyhow::Result<Navigation> {
        self.current = page;
        self.overlay_open = false;
        self.build_navigation(page)
    }

    /// External navigation (back/forward, manual URL edits). Unrecognized
    /// fragments are ignored: the active page and fragment stay as they are.
    pub fn handle_fragment_change(&mut self, raw: &str) -> anyhow::Result<Option<Navigation>> {
        match Page::from_fragment(raw) {
            Some(page) => self.navigate_to_page(page).map(Some),
            None => Ok(None),
        }
    }

    fn build_navigation(&self, page: Page) -> anyhow::Result<Navigation> {
        let load = match page {
            Page::Dashboard => PageLoad::RefreshDashboard,
            Page::History => PageLoad::History(render_history_rows(&self.history.load()?)),
            Page::Converter => PageLoad::ConverterSummary(summarize(&self.history.load()?)),
            Page::Help | Page::About | Page::Settings => PageLoad::None,
        };

        Ok(Navigation {
            page,
            fragment: page.fragment(),
            title: page.title(),
            load,
        })
    }
}
