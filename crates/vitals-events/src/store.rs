//! EventStore: bounded, newest-first, append-only.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use vitals_core::config::StorageConfig;
use vitals_core::models::{Event, NewEvent};

use crate::flush;
use crate::query::EventQuery;

/// In-memory event log. Index 0 is the newest event.
///
/// Events are never mutated after append. They leave the log only when
/// capacity truncation drops the oldest, or via a retention sweep.
#[derive(Debug)]
pub struct EventStore {
    events: VecDeque<Event>,
    capacity: usize,
    flush_every: u64,
    flush_limit: usize,
    appends: u64,
    path: Option<PathBuf>,
}

impl EventStore {
    /// A purely in-memory store.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            flush_every: u64::MAX,
            flush_limit: capacity,
            appends: 0,
            path: None,
        }
    }

    /// A store that flushes to `path` every `flush_every` appends, seeded
    /// with whatever a previous process flushed there.
    pub fn open(config: &StorageConfig, path: PathBuf) -> Self {
        let mut store = Self::new(config.event_capacity);
        store.flush_every = config.flush_every.max(1);
        store.flush_limit = config.flush_limit;
        for event in flush::load(&path) {
            if store.events.len() >= store.capacity {
                break;
            }
            store.events.push_back(event);
        }
        store.path = Some(path);
        store
    }

    /// Assign id and timestamp if absent, prepend, truncate to capacity.
    pub fn append(&mut self, new: NewEvent, now: DateTime<Utc>) -> Event {
        let event = new.into_event(now);
        self.push(event.clone());
        event
    }

    /// Prepend an already-materialized event.
    pub fn push(&mut self, event: Event) {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
        self.appends += 1;
        if self.appends % self.flush_every == 0 {
            self.flush_logged();
        }
    }

    /// Write the newest `flush_limit` events to disk.
    pub fn flush(&self) -> Result<usize, vitals_core::errors::StorageError> {
        match &self.path {
            Some(path) => flush::write(path, self.events.iter().take(self.flush_limit)),
            None => Ok(0),
        }
    }

    /// Flush and log instead of propagating failure.
    pub fn flush_logged(&self) {
        match self.flush() {
            Ok(written) => tracing::debug!(event = "events_flushed", written, "event log flushed"),
            Err(e) => tracing::warn!(
                event = "persistence_failed",
                target_file = "events",
                error = %e,
                "event log flush failed"
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total appends since this store was opened.
    pub fn appends(&self) -> u64 {
        self.appends
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// The `n` most recent events, newest first.
    pub fn latest(&self, n: usize) -> Vec<Event> {
        self.events.iter().take(n).cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events matching `query`, newest first.
    pub fn query(&self, query: &EventQuery, now: DateTime<Utc>) -> Vec<&Event> {
        self.events.iter().filter(|e| query.matches(e, now)).collect()
    }

    pub fn count(&self, query: &EventQuery, now: DateTime<Utc>) -> usize {
        self.events.iter().filter(|e| query.matches(e, now)).count()
    }

    /// Events inside `window` that satisfy `predicate`, newest first.
    pub fn select<P>(&self, now: DateTime<Utc>, window: Duration, predicate: P) -> Vec<&Event>
    where
        P: Fn(&Event) -> bool,
    {
        self.events
            .iter()
            .filter(|e| e.is_within(now, window) && predicate(e))
            .collect()
    }

    /// Drop every event with `timestamp < cutoff`. Returns how many were removed.
    pub fn retain_since(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.events.len();
        self.events.retain(|e| e.timestamp >= cutoff);
        before - self.events.len()
    }
}
