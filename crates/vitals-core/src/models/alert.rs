use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::Severity;

/// Alert rule severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Severity of the error event logged when the alert fires:
    /// critical stays critical, everything else is logged as a warning.
    pub fn event_severity(self) -> Severity {
        match self {
            Self::Critical => Severity::Critical,
            Self::Warning | Self::Info => Severity::Low,
        }
    }
}

/// A fired alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub triggered_at: DateTime<Utc>,
}
