//! Condition evaluation. Each returns a human-readable finding when met.

use chrono::{DateTime, Duration, Utc};

use vitals_core::config::AlertCondition;
use vitals_core::models::EventKind;
use vitals_events::samples;
use vitals_events::EventStore;

/// Evaluate `condition` against `store`. `None` means not met.
///
/// Averaging conditions over an empty sample are never met.
pub fn evaluate(condition: &AlertCondition, store: &EventStore, now: DateTime<Utc>) -> Option<String> {
    match *condition {
        AlertCondition::ErrorRate {
            window_secs,
            max_errors,
        } => {
            let count = store
                .select(now, window(window_secs), |e| e.kind() == EventKind::Error)
                .len();
            (count > max_errors)
                .then(|| format!("{count} errors in the last {window_secs}s (limit {max_errors})"))
        }
        AlertCondition::SlowResponse {
            window_secs,
            max_mean_response_ms,
        } => {
            let recent = store.select(now, window(window_secs), |e| e.kind() == EventKind::Network);
            let avg = samples::mean(recent.iter().filter_map(|e| samples::response_time_ms(e)))?;
            (avg > max_mean_response_ms).then(|| {
                format!(
                    "mean response time {avg:.0} ms over the last {window_secs}s (limit {max_mean_response_ms:.0} ms)"
                )
            })
        }
        AlertCondition::MemoryLeak {
            window_secs,
            max_memory_mb,
        } => {
            let peak = store
                .select(now, window(window_secs), |e| e.kind() == EventKind::Performance)
                .into_iter()
                .filter_map(samples::memory_usage_mb)
                .filter(|mb| *mb > max_memory_mb)
                .reduce(f64::max)?;
            Some(format!(
                "memory usage {peak:.0} MB within the last {window_secs}s (limit {max_memory_mb:.0} MB)"
            ))
        }
        AlertCondition::BuildDegradation {
            window_secs,
            max_mean_build_ms,
        } => {
            let recent = store.select(now, window(window_secs), |e| e.kind() == EventKind::Build);
            let avg = samples::mean(recent.iter().filter_map(|e| samples::build_duration_ms(e)))?;
            (avg > max_mean_build_ms).then(|| {
                format!(
                    "mean build time {avg:.0} ms over the last {window_secs}s (limit {max_mean_build_ms:.0} ms)"
                )
            })
        }
    }
}

fn window(secs: u64) -> Duration {
    Duration::seconds(secs as i64)
}
