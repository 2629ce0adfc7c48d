//! Retention sweep: events older than the retention period are removed.

use chrono::{DateTime, Duration, Utc};

use crate::store::EventStore;

/// Remove events older than `retention_days` and return how many were dropped.
pub fn sweep(store: &mut EventStore, now: DateTime<Utc>, retention_days: u32) -> usize {
    let cutoff = now - Duration::days(retention_days as i64);
    let removed = store.retain_since(cutoff);
    if removed > 0 {
        tracing::info!(
            event = "retention_sweep",
            removed,
            retention_days,
            remaining = store.len(),
            "expired events removed"
        );
    }
    removed
}
