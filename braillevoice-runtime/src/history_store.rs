use crate::kv::KvStore;
use anyhow::Context;
use braillevoice_core::history::{HistoryEntry, push_capped};
use std::sync::Arc;

pub const HISTORY_KEY: &str = "brailleHistory";

/// The capped, newest-first record of past conversions.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KvStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// A corrupted record is treated as absent and removed.
    pub fn load(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(vec![]);
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!("discarding malformed history record: {e}");
                self.store.remove(HISTORY_KEY)?;
                Ok(vec![])
            }
        }
    }

    pub fn append(&self, entry: HistoryEntry) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        push_capped(&mut entries, entry);
        let raw = serde_json::to_string_pretty(&entries).context("encode history JSON")?;
        self.store.set(HISTORY_KEY, &raw)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(HISTORY_KEY)
    }

    /// Serializes the full sequence into a downloadable artifact. `None`
    /// when there is nothing to export.
    pub fn export(&self) -> anyhow::Result<Option<HistoryExport>> {
        let entries = self.load()?;
        if entries.is_empty() {
            return Ok(None);
        }

        let json = serde_json::to_string_pretty(&entries).context("encode history export")?;
        let date = chrono::Local::now().format("%Y-%m-%d");
        Ok(Some(HistoryExport {
            file_name: format!("braille-history-{date}.json"),
            json,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    pub file_name: String,
    pub json: String,
}
