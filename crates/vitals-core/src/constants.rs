/// Vitals engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score a fresh process starts with.
pub const MAX_HEALTH_SCORE: u8 = 100;

/// Per-event score penalties by severity.
pub const PENALTY_CRITICAL: i64 = 20;
pub const PENALTY_HIGH: i64 = 10;
pub const PENALTY_MEDIUM: i64 = 5;
pub const PENALTY_LOW: i64 = 2;

/// Structural penalties.
pub const PENALTY_SLOW_BUILD: i64 = 10;
pub const PENALTY_LARGE_BUNDLE: i64 = 15;
pub const PENALTY_FAILURE_STREAK: i64 = 30;

/// Number of most recent build samples used for rolling averages.
pub const BUILD_SAMPLE_SIZE: usize = 5;

/// Status band lower bounds.
pub const EXCELLENT_MIN_SCORE: u8 = 90;
pub const GOOD_MIN_SCORE: u8 = 70;
pub const WARNING_MIN_SCORE: u8 = 50;

/// Below this score the recovery controller considers the process critical.
pub const CRITICAL_RECOVERY_SCORE: u8 = 30;

/// A rollback is attempted only when the failure streak exceeds this.
pub const ROLLBACK_FAILURE_STREAK: u32 = 2;

/// Slice sizes returned by the `get-status` control request.
pub const STATUS_BACKUP_LIMIT: usize = 10;
pub const STATUS_ACTION_LIMIT: usize = 10;
pub const STATUS_ERROR_HISTORY_LIMIT: usize = 20;

/// On-disk file names under the log directory.
pub const EVENTS_FILE: &str = "events.json";
pub const HEALTH_FILE: &str = "health.json";
pub const RECOVERY_STATE_FILE: &str = "recovery-state.json";
/// Rule id to last trigger time, so cooldowns survive a restart.
pub const ALERTS_FILE: &str = "alerts.json";
pub const BACKUPS_DIR: &str = "backups";
pub const REPORTS_DIR: &str = "reports";
