//! History of successful calculations, newest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of entries kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 40;

/// A past successful calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as the user entered it.
    pub expression: String,
    /// The formatted result.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

/// Bounded list of entries. Once full, recording a new entry evicts the
/// oldest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an entry as the newest one.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entry at `index`, 0 being the newest.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{i}+0"), i.to_string())
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));

        let results: Vec<&str> = history.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["2", "1"]);
        assert_eq!(history.latest(), Some(&entry(2)));
        assert_eq!(history.get(1), Some(&entry(1)));
        assert_eq!(history.get(2), None);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut history = History::default();
        for i in 1..=41 {
            history.push(entry(i));
        }
        assert_eq!(history.len(), 40);
        assert_eq!(history.latest(), Some(&entry(41)));
        assert_eq!(history.get(39), Some(&entry(2)));
        assert!(history.iter().all(|e| e != &entry(1)));
    }

    #[test]
    fn test_custom_and_zero_capacity() {
        let mut history = History::with_capacity(2);
        for i in 0..5 {
            history.push(entry(i));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.capacity(), 2);

        let mut disabled = History::with_capacity(0);
        disabled.push(entry(0));
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn test_entry_serializes() {
        let json = serde_json::to_string(&HistoryEntry::new("5!", "120")).unwrap();
        assert_eq!(json, r#"{"expression":"5!","result":"120"}"#);
    }
}
