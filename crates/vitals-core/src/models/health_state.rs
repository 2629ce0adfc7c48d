use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// Categorical band derived from the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    /// excellent >= 90, good >= 70, warning >= 50, critical below.
    pub fn from_score(score: u8) -> Self {
        if score >= constants::EXCELLENT_MIN_SCORE {
            Self::Excellent
        } else if score >= constants::GOOD_MIN_SCORE {
            Self::Good
        } else if score >= constants::WARNING_MIN_SCORE {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

/// Process-wide health state, overwritten wholesale on every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    pub score: u8,
    pub status: HealthStatus,
    pub issues: Vec<String>,
    pub last_check: DateTime<Utc>,
    pub consecutive_failures: u32,
}

impl HealthState {
    /// Fresh state at process start: full score, no failures.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            score: constants::MAX_HEALTH_SCORE,
            status: HealthStatus::Excellent,
            issues: Vec::new(),
            last_check: now,
            consecutive_failures: 0,
        }
    }
}
