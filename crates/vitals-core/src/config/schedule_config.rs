use serde::{Deserialize, Serialize};

use super::defaults;

/// Periodic job cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub health_check_interval_secs: u64,
    pub backup_interval_secs: u64,
    pub flush_interval_secs: u64,
    pub retention_sweep_interval_secs: u64,
    /// Daily report time of day, `HH:MM` in UTC.
    pub report_time: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            health_check_interval_secs: defaults::DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
            backup_interval_secs: defaults::DEFAULT_BACKUP_INTERVAL_SECS,
            flush_interval_secs: defaults::DEFAULT_FLUSH_INTERVAL_SECS,
            retention_sweep_interval_secs: defaults::DEFAULT_RETENTION_SWEEP_INTERVAL_SECS,
            report_time: defaults::DEFAULT_REPORT_TIME.to_string(),
        }
    }
}

impl ScheduleConfig {
    /// Parsed report time, if well-formed.
    pub fn report_time_of_day(&self) -> Option<chrono::NaiveTime> {
        chrono::NaiveTime::parse_from_str(&self.report_time, "%H:%M").ok()
    }
}
