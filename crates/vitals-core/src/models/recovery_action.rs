use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryActionType {
    Restart,
    Rollback,
    Backup,
    Repair,
}

impl RecoveryActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Rollback => "rollback",
            Self::Backup => "backup",
            Self::Repair => "repair",
        }
    }
}

/// Immutable audit record of a recovery decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub action_type: RecoveryActionType,
    pub reason: String,
    pub success: bool,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl RecoveryAction {
    pub fn new(
        action_type: RecoveryActionType,
        reason: impl Into<String>,
        success: bool,
        details: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: now,
            action_type,
            reason: reason.into(),
            success,
            details,
        }
    }
}
