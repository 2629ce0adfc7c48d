use std::collections::VecDeque;

use vitals_core::models::{Event, Severity};

/// Recent high and critical error events, newest first.
#[derive(Debug, Clone)]
pub struct ErrorHistory {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl ErrorHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn with_entries(capacity: usize, entries: Vec<Event>) -> Self {
        let mut history = Self::new(capacity);
        history.entries = entries.into_iter().take(capacity).collect();
        history
    }

    /// Remember `event` if it is an error of high severity or worse.
    /// Returns whether it was kept.
    pub fn observe(&mut self, event: &Event) -> bool {
        if !event.is_error() || event.severity < Severity::High {
            return false;
        }
        self.entries.push_front(event.clone());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn recent(&self, n: usize) -> Vec<Event> {
        self.entries.iter().take(n).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
