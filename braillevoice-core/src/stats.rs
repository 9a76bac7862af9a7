use crate::history::HistoryEntry;

/// Aggregate converter-page statistics derived from the history sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    /// Rounded percentage, e.g. `80%`.
    pub avg_accuracy: String,
    /// Mean duration to one decimal place, e.g. `3.0s`.
    pub avg_time: String,
}

pub fn summarize(entries: &[HistoryEntry]) -> Summary {
    if entries.is_empty() {
        return Summary {
            count: 0,
            avg_accuracy: "0%".into(),
            avg_time: "0s".into(),
        };
    }

    let n = entries.len() as f64;
    let avg_confidence = entries.iter().map(|e| e.confidence).sum::<f64>() / n;
    let avg_duration = entries.iter().map(|e| e.duration).sum::<f64>() / n;

    Summary {
        count: entries.len(),
        avg_accuracy: percent_label(avg_confidence),
        avg_time: format!("{avg_duration:.1}s"),
    }
}

/// Formats a 0.0–1.0 confidence as a rounded percentage.
pub fn percent_label(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

/// Formats an audio duration as `m:ss` for the result badge.
pub fn format_audio_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(confidence: f64, duration: f64) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2026-02-01T10:00:00Z".into(),
            text: "text".into(),
            confidence,
            duration,
        }
    }

    #[test]
    fn summarizes_two_entries() {
        let entries = [entry(0.9, 2.0), entry(0.7, 4.0)];
        let summary = summarize(&entries);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_accuracy, "80%");
        assert_eq!(summary.avg_time, "3.0s");
    }

    #[test]
    fn empty_history_yields_zero_labels() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_accuracy, "0%");
        assert_eq!(summary.avg_time, "0s");
    }

    #[test]
    fn rounds_percentages() {
        assert_eq!(percent_label(0.856), "86%");
        assert_eq!(percent_label(0.0), "0%");
        assert_eq!(percent_label(1.0), "100%");
    }

    #[test]
    fn audio_duration_uses_minutes_and_padded_seconds() {
        assert_eq!(format_audio_duration(5.4), "0:05");
        assert_eq!(format_audio_duration(65.0), "1:05");
        assert_eq!(format_audio_duration(-1.0), "0:00");
    }
}
