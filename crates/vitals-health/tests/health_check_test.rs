use chrono::{DateTime, Duration, TimeZone, Utc};

use vitals_core::config::HealthConfig;
use vitals_core::models::{HealthState, NewEvent, Severity};
use vitals_events::EventStore;
use vitals_health::HealthScorer;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

const INTERVAL: i64 = 300;

#[test]
fn interval_with_errors_extends_streak() {
    let scorer = HealthScorer::new(HealthConfig::default());
    let mut store = EventStore::new(100);
    let mut state = HealthState::new(now());
    store.append(NewEvent::error(Severity::Medium, "c", "x"), now());

    let outcome = scorer.check_interval(&store, &mut state, Duration::seconds(INTERVAL), now());
    assert_eq!(outcome.errors_in_interval, 1);
    assert_eq!(outcome.consecutive_failures, 1);
    assert_eq!(state.consecutive_failures, 1);
}

#[test]
fn clean_intervals_decrement_streak_floored_at_zero() {
    let scorer = HealthScorer::new(HealthConfig::default());
    let store = EventStore::new(100);
    let mut state = HealthState::new(now());
    state.consecutive_failures = 3;

    let mut at = now();
    let mut observed = Vec::new();
    for _ in 0..5 {
        scorer.check_interval(&store, &mut state, Duration::seconds(INTERVAL), at);
        observed.push(state.consecutive_failures);
        at += Duration::seconds(INTERVAL);
    }
    assert_eq!(observed, [2, 1, 0, 0, 0]);
}

#[test]
fn check_recomputes_score_with_new_streak() {
    let config = HealthConfig {
        max_consecutive_failures: 0,
        ..Default::default()
    };
    let scorer = HealthScorer::new(config);
    let mut store = EventStore::new(100);
    let mut state = HealthState::new(now());
    store.append(
        NewEvent::error(Severity::Info, "c", "x").with_timestamp(now() - Duration::seconds(10)),
        now(),
    );

    scorer.check_interval(&store, &mut state, Duration::seconds(INTERVAL), now());
    assert_eq!(state.consecutive_failures, 1);
    assert_eq!(state.score, 70);
    assert_eq!(state.last_check, now());
}
