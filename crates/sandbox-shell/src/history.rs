//! Command history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One executed line and what it printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub cwd: String,
    pub input: String,
    pub output: Vec<String>,
}

/// Bounded history buffer (newest at back).
#[derive(Clone, Debug)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Record an executed line.
    ///
    /// Blank input and an exact repeat of the newest input are ignored.
    /// Returns whether the entry was kept.
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if self.capacity == 0 || entry.input.trim().is_empty() {
            return false;
        }
        if let Some(last) = self.entries.back() {
            if last.input == entry.input {
                return false;
            }
        }

        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        true
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

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// The newest entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
