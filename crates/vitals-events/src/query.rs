//! Window and type/severity filters over the in-memory log.

use chrono::{DateTime, Duration, Utc};

use vitals_core::models::{Event, EventKind, Severity};

/// A declarative filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Only events with `now - timestamp < window`.
    pub window: Option<Duration>,
    pub kind: Option<EventKind>,
    /// Only events at or above this severity.
    pub min_severity: Option<Severity>,
    /// Only events of exactly this severity.
    pub severity: Option<Severity>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within(mut self, window: Duration) -> Self {
        self.window = Some(window);
        self
    }

    pub fn within_secs(self, secs: u64) -> Self {
        self.within(Duration::seconds(secs as i64))
    }

    pub fn of_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn at_least(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    pub fn exactly(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn matches(&self, event: &Event, now: DateTime<Utc>) -> bool {
        if let Some(window) = self.window {
            if !event.is_within(now, window) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if event.kind() != kind {
                return false;
            }
        }
        if let Some(min) = self.min_severity {
            if event.severity < min {
                return false;
            }
        }
        if let Some(exact) = self.severity {
            if event.severity != exact {
                return false;
            }
        }
        true
    }
}
