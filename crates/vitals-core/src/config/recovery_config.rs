use serde::{Deserialize, Serialize};

use super::defaults;

/// Recovery controller and snapshot store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Record a restart intent on every recovery trigger.
    pub auto_restart: bool,
    /// Roll back to the last good backup when the failure streak exceeds 2.
    pub rollback_on_failure: bool,
    pub max_backups: usize,
    pub max_actions: usize,
    pub error_history_capacity: usize,
    /// Window for counting critical errors toward a recovery trigger (seconds).
    pub critical_window_secs: u64,
    /// Minimum spacing between automatic recovery triggers (seconds).
    pub min_trigger_interval_secs: u64,
    /// Root that tracked file paths are relative to.
    pub project_root: String,
    /// Critical files captured by every snapshot.
    pub tracked_files: Vec<String>,
    /// Directories whose absence `repair` reports.
    pub required_dirs: Vec<String>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            auto_restart: defaults::DEFAULT_AUTO_RESTART,
            rollback_on_failure: defaults::DEFAULT_ROLLBACK_ON_FAILURE,
            max_backups: defaults::DEFAULT_MAX_BACKUPS,
            max_actions: defaults::DEFAULT_MAX_ACTIONS,
            error_history_capacity: defaults::DEFAULT_ERROR_HISTORY_CAPACITY,
            critical_window_secs: defaults::DEFAULT_CRITICAL_WINDOW_SECS,
            min_trigger_interval_secs: defaults::DEFAULT_MIN_TRIGGER_INTERVAL_SECS,
            project_root: defaults::DEFAULT_PROJECT_ROOT.to_string(),
            tracked_files: defaults::DEFAULT_TRACKED_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            required_dirs: defaults::DEFAULT_REQUIRED_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
