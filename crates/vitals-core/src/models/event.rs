//! Timestamped events and their typed payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Event severity. `warning` and `error` are accepted as aliases of
/// `low` and `medium` so producers can use either vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[serde(alias = "warning")]
    Low,
    #[serde(alias = "error")]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Score penalty applied for each recent event of this severity.
    pub fn penalty(self) -> i64 {
        match self {
            Self::Critical => constants::PENALTY_CRITICAL,
            Self::High => constants::PENALTY_HIGH,
            Self::Medium => constants::PENALTY_MEDIUM,
            Self::Low => constants::PENALTY_LOW,
            Self::Info => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];
}

/// Event type discriminant, one per [`EventPayload`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Dom,
    Network,
    Error,
    Performance,
    Build,
    File,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dom => "dom",
            Self::Network => "network",
            Self::Error => "error",
            Self::Performance => "performance",
            Self::Build => "build",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomActivityKind {
    Mutation,
    StateChange,
}

/// DOM mutation or client state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomActivity {
    pub kind: DomActivityKind,
    pub target: String,
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Result of a network request observed by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSample {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    pub response_time_ms: f64,
}

/// Error detail reported by a client, a build hook, or the alert engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Set when the event was produced by a fired alert rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_rule: Option<String>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            location: None,
            alert_rule: None,
        }
    }
}

/// A runtime performance sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub metric: String,
    pub value: f64,
    /// Heap usage in megabytes, when the producer reports it.
    #[serde(default)]
    pub memory_usage_mb: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildPhase {
    Start,
    End,
    Error,
    Bundle,
}

/// Build lifecycle notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutcome {
    pub phase: BuildPhase,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub bundle_size_bytes: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeKind {
    Created,
    Modified,
    Removed,
}

/// Source file change seen by the watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub change: FileChangeKind,
}

/// Typed event payload, tagged by event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EventPayload {
    Dom(DomActivity),
    Network(NetworkSample),
    Error(ErrorDetail),
    Performance(PerformanceSample),
    Build(BuildOutcome),
    File(FileChange),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Dom(_) => EventKind::Dom,
            Self::Network(_) => EventKind::Network,
            Self::Error(_) => EventKind::Error,
            Self::Performance(_) => EventKind::Performance,
            Self::Build(_) => EventKind::Build,
            Self::File(_) => EventKind::File,
        }
    }
}

/// An immutable, appended event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn is_error(&self) -> bool {
        self.kind() == EventKind::Error
    }

    /// True when `timestamp <= now` and `now - timestamp < window`.
    /// Future-stamped events fall outside every window.
    pub fn is_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.timestamp <= now && now - self.timestamp < window
    }
}

/// An event as submitted by a producer. The store assigns `id` and
/// `timestamp` when they are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: Severity,
    pub source: String,
    pub payload: EventPayload,
}

impl NewEvent {
    pub fn new(severity: Severity, source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: None,
            timestamp: None,
            severity,
            source: source.into(),
            payload,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Shorthand for an error event.
    pub fn error(severity: Severity, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(severity, source, EventPayload::Error(ErrorDetail::new(message)))
    }

    /// Materialize into an [`Event`], filling the id and timestamp if unset.
    pub fn into_event(self, now: DateTime<Utc>) -> Event {
        Event {
            id: self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            timestamp: self.timestamp.unwrap_or(now),
            severity: self.severity,
            source: self.source,
            payload: self.payload,
        }
    }
}
