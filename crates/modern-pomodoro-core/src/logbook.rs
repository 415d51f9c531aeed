//! Bounded notes log, most recent first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::Mode;

/// Maximum number of entries kept. Older entries are evicted.
pub const LOG_CAPACITY: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub text: String,
    pub mode: Mode,
    pub minutes: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogBook {
    entries: Vec<LogEntry>,
}

impl LogBook {
    /// Build from already ordered entries, keeping at most `LOG_CAPACITY`.
    pub fn from_entries(mut entries: Vec<LogEntry>) -> Self {
        entries.truncate(LOG_CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a note. Blank notes are ignored and return `None`.
    pub fn add(&mut self, text: &str, mode: Mode, minutes: f64, now_ms: i64) -> Option<&LogEntry> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.entries.insert(
            0,
            LogEntry {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                mode,
                minutes,
                timestamp: now_ms,
            },
        );
        self.entries.truncate(LOG_CAPACITY);
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first() {
        let mut log = LogBook::default();
        log.add("first", Mode::Pomodoro, 1.0, 1);
        log.add("second", Mode::ShortBreak, 2.0, 2);
        assert_eq!(log.entries()[0].text, "second");
        assert_eq!(log.entries()[1].text, "first");
    }

    #[test]
    fn blank_notes_are_ignored() {
        let mut log = LogBook::default();
        assert!(log.add("   \n", Mode::Pomodoro, 0.0, 1).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let mut log = LogBook::default();
        let entry = log.add("  wrote tests  ", Mode::Pomodoro, 12.5, 7).unwrap();
        assert_eq!(entry.text, "wrote tests");
        assert_eq!(entry.timestamp, 7);
    }

    #[test]
    fn oldest_is_evicted_past_capacity() {
        let mut log = LogBook::default();
        for i in 0..=LOG_CAPACITY {
            log.add(&format!("note {i}"), Mode::Pomodoro, 0.0, i as i64);
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.entries()[0].text, format!("note {LOG_CAPACITY}"));
        assert_eq!(log.entries()[LOG_CAPACITY - 1].text, "note 1");
    }

    #[test]
    fn from_entries_truncates() {
        let mut source = LogBook::default();
        for i in 0..LOG_CAPACITY {
            source.add("x", Mode::Pomodoro, 0.0, i as i64);
        }
        let mut entries = source.entries().to_vec();
        entries.extend(source.entries().iter().cloned());
        assert_eq!(LogBook::from_entries(entries).len(), LOG_CAPACITY);
    }
}
