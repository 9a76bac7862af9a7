use serde::{Deserialize, Serialize};

/// Only the most recent conversions are kept; the oldest entry is evicted
/// when the cap is exceeded.
pub const HISTORY_CAP: usize = 10;

/// One past conversion's outcome. Entries are immutable once recorded and
/// removed only by a full history clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// ISO-8601 creation time.
    pub timestamp: String,
    pub text: String,
    pub confidence: f64,
    pub duration: f64,
}

/// Inserts `entry` as the newest element (index 0) and enforces the cap.
pub fn push_capped(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.insert(0, entry);
    entries.truncate(HISTORY_CAP);
}
