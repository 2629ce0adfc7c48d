use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-severity event counts that mark a window as problematic.
/// `critical` also drives the recovery trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorThresholds {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Default for ErrorThresholds {
    fn default() -> Self {
        Self {
            critical: defaults::DEFAULT_CRITICAL_THRESHOLD,
            high: defaults::DEFAULT_HIGH_THRESHOLD,
            medium: defaults::DEFAULT_MEDIUM_THRESHOLD,
            low: defaults::DEFAULT_LOW_THRESHOLD,
        }
    }
}

/// Health scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Window of events that contribute severity penalties (seconds).
    pub recent_window_secs: u64,
    /// Rolling mean build time above this costs 10 points.
    pub build_time_benchmark_ms: f64,
    /// Rolling mean bundle size above this costs 15 points.
    pub bundle_size_benchmark_bytes: u64,
    /// Failure streak above this costs 30 points.
    pub max_consecutive_failures: u32,
    pub thresholds: ErrorThresholds,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            recent_window_secs: defaults::DEFAULT_RECENT_WINDOW_SECS,
            build_time_benchmark_ms: defaults::DEFAULT_BUILD_TIME_BENCHMARK_MS,
            bundle_size_benchmark_bytes: defaults::DEFAULT_BUNDLE_SIZE_BENCHMARK_BYTES,
            max_consecutive_failures: defaults::DEFAULT_MAX_CONSECUTIVE_FAILURES,
            thresholds: ErrorThresholds::default(),
        }
    }
}
