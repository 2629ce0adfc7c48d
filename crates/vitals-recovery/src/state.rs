//! On-disk recovery state: backups, actions, error history.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitals_core::errors::StorageError;
use vitals_core::models::{BackupSnapshot, Event, RecoveryAction};
use vitals_core::persist;

/// Contents of `recovery-state.json`. Every list is newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryState {
    pub backups: Vec<BackupSnapshot>,
    pub actions: Vec<RecoveryAction>,
    pub error_history: Vec<Event>,
    pub last_trigger: Option<DateTime<Utc>>,
}

impl RecoveryState {
    /// Missing or corrupt files yield an empty state.
    pub fn load(path: &Path) -> Self {
        persist::load_or_else(path, Self::default)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        persist::write_json(path, self)
    }
}
