use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use vitals_core::config::StorageConfig;
use vitals_core::models::{EventKind, EventPayload, NewEvent, PerformanceSample, Severity};
use vitals_events::{retention, EventQuery, EventStore};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
}

fn error(n: usize) -> NewEvent {
    NewEvent::error(Severity::Medium, "test", format!("error {n}"))
}

fn perf(value: f64) -> NewEvent {
    NewEvent::new(
        Severity::Info,
        "browser",
        EventPayload::Performance(PerformanceSample {
            metric: "fcp".into(),
            value,
            memory_usage_mb: None,
        }),
    )
}

#[test]
fn append_prepends_newest_first() {
    let mut store = EventStore::new(10);
    let first = store.append(error(1), t0());
    let second = store.append(error(2), t0() + Duration::seconds(1));

    let ids: Vec<&str> = store.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);
}

#[test]
fn append_keeps_producer_id_and_timestamp() {
    let mut store = EventStore::new(10);
    let at = t0() - Duration::minutes(3);
    let event = store.append(error(1).with_id("evt-1").with_timestamp(at), t0());
    assert_eq!(event.id, "evt-1");
    assert_eq!(event.timestamp, at);
    assert!(store.get("evt-1").is_some());
}

proptest! {
    #[test]
    fn prop_ring_buffer_keeps_most_recent(capacity in 1usize..40, extra in 0usize..40) {
        let mut store = EventStore::new(capacity);
        let total = capacity + extra;
        for n in 0..total {
            store.append(error(n).with_id(format!("e{n}")), t0() + Duration::seconds(n as i64));
        }

        prop_assert_eq!(store.len(), capacity);
        let expected: Vec<String> = (extra..total).rev().map(|n| format!("e{n}")).collect();
        let actual: Vec<String> = store.iter().map(|e| e.id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn query_filters_by_window_kind_and_severity() {
    let now = t0();
    let mut store = EventStore::new(100);
    store.append(error(1).with_timestamp(now - Duration::seconds(30)), now);
    store.append(error(2).with_timestamp(now - Duration::seconds(90)), now);
    store.append(perf(1.0).with_timestamp(now - Duration::seconds(10)), now);
    store.append(
        NewEvent::error(Severity::Critical, "test", "fatal").with_timestamp(now - Duration::seconds(5)),
        now,
    );

    let last_minute_errors = EventQuery::new().within_secs(60).of_kind(EventKind::Error);
    assert_eq!(store.count(&last_minute_errors, now), 2);

    let critical = EventQuery::new().exactly(Severity::Critical);
    assert_eq!(store.count(&critical, now), 1);

    let at_least_medium = EventQuery::new().at_least(Severity::Medium);
    assert_eq!(store.count(&at_least_medium, now), 3);

    let selected = store.select(now, Duration::seconds(60), |e| e.kind() == EventKind::Performance);
    assert_eq!(selected.len(), 1);
}

#[test]
fn latest_returns_newest_slice() {
    let mut store = EventStore::new(100);
    for n in 0..5 {
        store.append(error(n).with_id(format!("e{n}")), t0());
    }
    let latest: Vec<String> = store.latest(2).into_iter().map(|e| e.id).collect();
    assert_eq!(latest, ["e4", "e3"]);
}

#[test]
fn flushes_every_n_appends_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let config = StorageConfig {
        event_capacity: 50,
        flush_every: 3,
        flush_limit: 2,
        ..Default::default()
    };

    let mut store = EventStore::open(&config, path.clone());
    store.append(error(0).with_id("e0"), t0());
    store.append(error(1).with_id("e1"), t0());
    assert!(!path.exists(), "no flush before the third append");
    store.append(error(2).with_id("e2"), t0());
    assert!(path.exists());

    let reopened = EventStore::open(&config, path);
    let ids: Vec<String> = reopened.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, ["e2", "e1"], "only the newest flush_limit events are persisted");
}

#[test]
fn corrupt_event_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, "[{").unwrap();
    let store = EventStore::open(&StorageConfig::default(), path);
    assert!(store.is_empty());
}

#[test]
fn retention_sweep_drops_only_expired_events() {
    let now = t0();
    let mut store = EventStore::new(100);
    store.append(error(0).with_timestamp(now - Duration::days(40)).with_id("old"), now);
    store.append(error(1).with_timestamp(now - Duration::days(2)).with_id("new"), now);

    let removed = retention::sweep(&mut store, now, 30);
    assert_eq!(removed, 1);
    assert!(store.get("old").is_none());
    assert!(store.get("new").is_some());
}

#[test]
fn mean_of_empty_sample_is_none() {
    use vitals_events::samples::mean;
    assert_eq!(mean(Vec::<f64>::new()), None);
    assert_eq!(mean([2.0, 4.0]), Some(3.0));
}
