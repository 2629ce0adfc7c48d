use serde::{Deserialize, Serialize};

use super::defaults;

/// Event log and state file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding state files, backups, and reports.
    pub log_dir: String,
    /// In-memory event ring buffer size.
    pub event_capacity: usize,
    /// Flush the event log after this many appends.
    pub flush_every: u64,
    /// Newest events written per flush.
    pub flush_limit: usize,
    /// Events replayed to a subscriber on connect.
    pub backfill_count: usize,
    /// Events and reports older than this are swept.
    pub retention_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_dir: defaults::DEFAULT_LOG_DIR.to_string(),
            event_capacity: defaults::DEFAULT_EVENT_CAPACITY,
            flush_every: defaults::DEFAULT_FLUSH_EVERY,
            flush_limit: defaults::DEFAULT_FLUSH_LIMIT,
            backfill_count: defaults::DEFAULT_BACKFILL_COUNT,
            retention_days: defaults::DEFAULT_RETENTION_DAYS,
        }
    }
}
