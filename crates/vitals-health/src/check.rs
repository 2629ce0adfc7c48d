//! Periodic health check: maintains the consecutive-failure streak.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use vitals_core::models::{EventKind, HealthState};
use vitals_events::{EventQuery, EventStore};

use crate::scorer::HealthScorer;

/// What one health-check interval observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthCheckOutcome {
    pub errors_in_interval: usize,
    pub consecutive_failures: u32,
}

impl HealthScorer {
    /// Count error events in the last `interval`. Any error extends the
    /// failure streak by one; a clean interval shortens it by one, never
    /// below zero. Health is recomputed afterwards.
    pub fn check_interval(
        &self,
        store: &EventStore,
        state: &mut HealthState,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> HealthCheckOutcome {
        let query = EventQuery::new().within(interval).of_kind(EventKind::Error);
        let errors_in_interval = store.count(&query, now);

        if errors_in_interval > 0 {
            state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        } else {
            state.consecutive_failures = state.consecutive_failures.saturating_sub(1);
        }

        self.recompute(store, state, now);
        tracing::info!(
            event = "health_check",
            errors_in_interval,
            consecutive_failures = state.consecutive_failures,
            score = state.score,
            "health check completed"
        );

        HealthCheckOutcome {
            errors_in_interval,
            consecutive_failures: state.consecutive_failures,
        }
    }
}
