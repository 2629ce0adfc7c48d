//! Severity and benchmark penalties over the recent window.
//!
//! score = 100 - sum(severity penalties) - structural penalties, clamped to [0, 100].
//! Structural: slow builds -10, large bundles -15, failure streak -30.

use chrono::{DateTime, Duration, Utc};

use vitals_core::config::HealthConfig;
use vitals_core::constants;
use vitals_core::models::{Event, HealthState, HealthStatus, Severity};
use vitals_events::samples;
use vitals_events::EventStore;

/// Computes health from an event store snapshot.
///
/// Holds no accumulating state: the same store, failure streak, and
/// instant always produce the same [`HealthState`].
#[derive(Debug, Clone)]
pub struct HealthScorer {
    config: HealthConfig,
}

impl HealthScorer {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Overwrite `state` wholesale, preserving only the failure streak.
    pub fn recompute(&self, store: &EventStore, state: &mut HealthState, now: DateTime<Utc>) {
        *state = self.score(store, state.consecutive_failures, now);
        tracing::debug!(
            event = "health_recomputed",
            score = state.score,
            status = ?state.status,
            issues = state.issues.len(),
            consecutive_failures = state.consecutive_failures,
            "health recomputed"
        );
    }

    /// Build a fresh [`HealthState`] for the given failure streak.
    pub fn score(
        &self,
        store: &EventStore,
        consecutive_failures: u32,
        now: DateTime<Utc>,
    ) -> HealthState {
        let window = Duration::seconds(self.config.recent_window_secs as i64);
        let recent = store.select(now, window, |_| true);

        let mut score = constants::MAX_HEALTH_SCORE as i64;
        let mut issues = Vec::new();

        for severity in [Severity::Critical, Severity::High, Severity::Medium, Severity::Low] {
            let count = recent.iter().filter(|e| e.severity == severity).count();
            if count > 0 {
                score -= severity.penalty() * count as i64;
                issues.push(format!(
                    "{count} {} event(s) in the last {} min",
                    severity.as_str(),
                    self.config.recent_window_secs / 60
                ));
            }
        }

        if let Some(avg) = rolling_mean(store, samples::build_duration_ms) {
            if avg > self.config.build_time_benchmark_ms {
                score -= constants::PENALTY_SLOW_BUILD;
                issues.push(format!(
                    "average build time {avg:.0} ms exceeds benchmark {:.0} ms",
                    self.config.build_time_benchmark_ms
                ));
            }
        }

        if let Some(avg) = rolling_mean(store, |e| samples::bundle_size_bytes(e).map(|b| b as f64)) {
            if avg > self.config.bundle_size_benchmark_bytes as f64 {
                score -= constants::PENALTY_LARGE_BUNDLE;
                issues.push(format!(
                    "average bundle size {avg:.0} bytes exceeds benchmark {} bytes",
                    self.config.bundle_size_benchmark_bytes
                ));
            }
        }

        if consecutive_failures > self.config.max_consecutive_failures {
            score -= constants::PENALTY_FAILURE_STREAK;
            issues.push(format!(
                "{consecutive_failures} consecutive health checks found errors (limit {})",
                self.config.max_consecutive_failures
            ));
        }

        let score = score.clamp(0, constants::MAX_HEALTH_SCORE as i64) as u8;
        HealthState {
            score,
            status: HealthStatus::from_score(score),
            issues,
            last_check: now,
            consecutive_failures,
        }
    }
}

/// Mean of the newest `BUILD_SAMPLE_SIZE` samples extracted by `sample`.
fn rolling_mean<F>(store: &EventStore, sample: F) -> Option<f64>
where
    F: Fn(&Event) -> Option<f64>,
{
    samples::mean(
        store
            .iter()
            .filter_map(sample)
            .take(constants::BUILD_SAMPLE_SIZE),
    )
}
