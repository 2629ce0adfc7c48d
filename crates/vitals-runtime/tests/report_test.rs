mod common;

use std::fs;

use chrono::{Duration, NaiveDate};
use serde_json::json;
use tempfile::TempDir;

use vitals_core::config::ErrorThresholds;
use vitals_core::models::{
    BuildOutcome, BuildPhase, ErrorDetail, EventPayload, HealthState, NetworkSample, NewEvent,
    RecoveryAction, RecoveryActionType, Severity,
};
use vitals_runtime::reports::{self, report_path};
use vitals_runtime::DailyReport;

use common::t0;

fn network(ms: f64) -> NewEvent {
    NewEvent::new(
        Severity::Info,
        "client",
        EventPayload::Network(NetworkSample {
            url: "/api".into(),
            method: None,
            status: Some(200),
            response_time_ms: ms,
        }),
    )
}

fn build(ms: f64) -> NewEvent {
    NewEvent::new(
        Severity::Info,
        "build-hooks",
        EventPayload::Build(BuildOutcome {
            phase: BuildPhase::End,
            success: Some(true),
            duration_ms: Some(ms),
            bundle_size_bytes: None,
            message: None,
        }),
    )
}

#[test]
fn summarizes_only_the_requested_day() {
    let today = t0().date_naive();
    let alert = NewEvent::new(
        Severity::Critical,
        "alert-engine",
        EventPayload::Error(ErrorDetail {
            alert_rule: Some("high_error_rate".into()),
            ..ErrorDetail::new("too many errors")
        }),
    );
    let events = vec![
        network(100.0).into_event(t0()),
        network(300.0).into_event(t0()),
        build(2000.0).into_event(t0()),
        NewEvent::error(Severity::Critical, "client", "a").into_event(t0()),
        alert.into_event(t0()),
        network(9999.0).into_event(t0() - Duration::days(1)),
    ];
    let actions = vec![
        RecoveryAction::new(RecoveryActionType::Backup, "scheduled", true, json!({}), t0()),
        RecoveryAction::new(RecoveryActionType::Backup, "scheduled", true, json!({}), t0()),
        RecoveryAction::new(RecoveryActionType::Rollback, "x", false, json!({}), t0()),
        RecoveryAction::new(
            RecoveryActionType::Repair,
            "x",
            true,
            json!({}),
            t0() - Duration::days(2),
        ),
    ];
    let thresholds = ErrorThresholds {
        critical: 2,
        ..ErrorThresholds::default()
    };

    let report = DailyReport::build(
        today,
        events.iter(),
        actions.iter(),
        &HealthState::new(t0()),
        &thresholds,
        t0(),
    );

    assert_eq!(report.total_events, 5);
    assert_eq!(report.events_by_type["network"], 2);
    assert_eq!(report.events_by_type["error"], 2);
    assert_eq!(report.events_by_severity["critical"], 2);
    assert_eq!(report.alerts_fired, 1);
    assert_eq!(report.alerts_by_rule["high_error_rate"], 1);
    assert_eq!(report.actions_by_type["backup"], 2);
    assert_eq!(report.actions_by_type["rollback"], 1);
    assert!(!report.actions_by_type.contains_key("repair"));
    assert_eq!(report.mean_response_ms, Some(200.0));
    assert_eq!(report.mean_build_ms, Some(2000.0));
    assert_eq!(report.threshold_breaches, vec!["2 critical events (threshold 2)"]);
}

#[test]
fn empty_day_has_no_means() {
    let report = DailyReport::build(
        t0().date_naive(),
        std::iter::empty(),
        std::iter::empty(),
        &HealthState::new(t0()),
        &ErrorThresholds::default(),
        t0(),
    );
    assert_eq!(report.total_events, 0);
    assert_eq!(report.mean_build_ms, None);
    assert_eq!(report.mean_response_ms, None);
    assert!(report.threshold_breaches.is_empty());
}

#[test]
fn write_read_and_sweep() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("reports");
    let old = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let recent = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();

    for date in [old, recent] {
        let report = DailyReport::build(
            date,
            std::iter::empty(),
            std::iter::empty(),
            &HealthState::new(t0()),
            &ErrorThresholds::default(),
            t0(),
        );
        let path = reports::write(&dir, &report).unwrap();
        assert_eq!(path, report_path(&dir, date));
    }
    assert!(dir.join("report-2026-03-01.json").exists());
    fs::write(dir.join("notes.txt"), "keep me").unwrap();

    let removed = reports::sweep(&dir, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()).unwrap();
    assert_eq!(removed, 1);
    assert!(reports::read(&dir, old).unwrap().is_none());
    assert_eq!(reports::read(&dir, recent).unwrap().unwrap().date, recent);
    assert!(dir.join("notes.txt").exists());
}

#[test]
fn sweep_of_missing_dir_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let removed = reports::sweep(&tmp.path().join("absent"), t0().date_naive()).unwrap();
    assert_eq!(removed, 0);
}
