mod common;

use std::fs;

use chrono::Duration;
use tempfile::TempDir;

use vitals_core::config::VitalsConfig;
use vitals_core::models::{HealthState, NewEvent, RecoveryActionType, Severity};
use vitals_events::EventStore;
use vitals_health::HealthScorer;
use vitals_recovery::{RecoveryController, RecoveryPhase};

use common::{project, read, root, t0};

fn failing(score: u8, failures: u32) -> HealthState {
    let mut health = HealthState::new(t0());
    health.score = score;
    health.consecutive_failures = failures;
    health
}

fn rollbacks(controller: &RecoveryController) -> Vec<bool> {
    controller
        .actions()
        .iter()
        .filter(|a| a.action_type == RecoveryActionType::Rollback)
        .map(|a| a.success)
        .collect()
}

fn scorer(config: &VitalsConfig) -> HealthScorer {
    HealthScorer::new(config.health.clone())
}

#[test]
fn assess_bands() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let controller = RecoveryController::new(&config);
    let mut store = EventStore::new(100);

    assert_eq!(controller.assess(&failing(100, 0), &store, t0()), RecoveryPhase::Healthy);
    assert_eq!(controller.assess(&failing(69, 0), &store, t0()), RecoveryPhase::Degraded);
    assert_eq!(controller.assess(&failing(95, 4), &store, t0()), RecoveryPhase::Degraded);
    assert_eq!(controller.assess(&failing(29, 0), &store, t0()), RecoveryPhase::Critical);

    for i in 0..3 {
        store.append(NewEvent::error(Severity::Critical, "browser", format!("c{i}")), t0());
    }
    assert_eq!(controller.assess(&failing(90, 0), &store, t0()), RecoveryPhase::Critical);
    assert_eq!(
        controller.assess(&failing(90, 0), &store, t0() + Duration::seconds(300)),
        RecoveryPhase::Healthy
    );
}

#[test]
fn streak_over_two_rolls_back_to_good_backup() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let root = root(&config);
    let store = EventStore::new(100);
    let mut controller = RecoveryController::new(&config);

    let good = controller.create_backup("scheduled", &HealthState::new(t0()), t0());
    fs::write(root.join("src/main.tsx"), "syntax error(").unwrap();

    let mut health = failing(40, 3);
    let outcome = controller.trigger_recovery("manual", &mut health, &store, &scorer(&config), t0());

    assert_eq!(outcome.rollback, Some(true));
    assert_eq!(rollbacks(&controller), vec![true]);
    assert_eq!(health.consecutive_failures, 0);
    assert_eq!(health.score, 100);
    assert_eq!(read(&root, "src/main.tsx"), "render(<App />);\n");
    assert!(!outcome.backup.metadata.build_success);
    assert_ne!(outcome.backup.id, good.id);
    assert_eq!(controller.snapshots().len(), 2);
}

#[test]
fn streak_over_two_without_good_backup_logs_failed_rollback() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let store = EventStore::new(100);
    let mut controller = RecoveryController::new(&config);

    let mut health = failing(40, 3);
    let outcome = controller.trigger_recovery("manual", &mut health, &store, &scorer(&config), t0());

    assert_eq!(outcome.rollback, Some(false));
    assert_eq!(rollbacks(&controller), vec![false]);
    assert_eq!(health.consecutive_failures, 3);
    let types: Vec<_> = outcome.actions.iter().map(|a| a.action_type).collect();
    assert_eq!(types, vec![RecoveryActionType::Backup, RecoveryActionType::Rollback]);
}

#[test]
fn short_streak_or_disabled_rollback_skips_rollback() {
    let tmp = TempDir::new().unwrap();
    let mut config = project(&tmp);
    let store = EventStore::new(100);

    let mut controller = RecoveryController::new(&config);
    let mut health = failing(40, 2);
    let outcome = controller.trigger_recovery("manual", &mut health, &store, &scorer(&config), t0());
    assert_eq!(outcome.rollback, None);

    config.recovery.rollback_on_failure = false;
    let mut controller = RecoveryController::new(&config);
    let mut health = failing(40, 5);
    let outcome = controller.trigger_recovery("manual", &mut health, &store, &scorer(&config), t0());
    assert_eq!(outcome.rollback, None);
    assert!(rollbacks(&controller).is_empty());
}

#[test]
fn auto_restart_records_intent() {
    let tmp = TempDir::new().unwrap();
    let mut config = project(&tmp);
    config.recovery.auto_restart = true;
    let store = EventStore::new(100);
    let mut controller = RecoveryController::new(&config);

    let mut health = failing(20, 0);
    let outcome = controller.trigger_recovery("manual", &mut health, &store, &scorer(&config), t0());

    assert!(outcome.restart_requested);
    let types: Vec<_> = outcome.actions.iter().map(|a| a.action_type).collect();
    assert_eq!(types, vec![RecoveryActionType::Backup, RecoveryActionType::Restart]);
}

#[test]
fn automatic_trigger_is_throttled() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let store = EventStore::new(100);
    let scorer = scorer(&config);
    let mut controller = RecoveryController::new(&config);

    let mut health = failing(10, 0);
    assert!(controller.check(&mut health, &store, &scorer, t0()).is_some());
    assert!(controller
        .check(&mut health, &store, &scorer, t0() + Duration::seconds(59))
        .is_none());
    assert!(controller
        .check(&mut health, &store, &scorer, t0() + Duration::seconds(60))
        .is_some());

    let mut healthy = HealthState::new(t0());
    assert!(controller
        .check(&mut healthy, &store, &scorer, t0() + Duration::seconds(600))
        .is_none());
    assert_eq!(controller.snapshots().len(), 2);
}

#[test]
fn rollback_to_unknown_backup_fails_and_is_logged() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let mut controller = RecoveryController::new(&config);

    assert!(!controller.rollback_to_backup(Some("missing"), t0()));
    let action = &controller.actions().recent(1)[0];
    assert_eq!(action.action_type, RecoveryActionType::Rollback);
    assert!(!action.success);
    assert_eq!(action.details["code"], "BACKUP_NOT_FOUND");
}

#[test]
fn rollback_by_id_restores_that_snapshot() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let root = root(&config);
    let mut controller = RecoveryController::new(&config);

    let first = controller.create_backup("manual", &failing(50, 1), t0());
    fs::write(root.join("package.json"), r#"{"name":"app","version":"2.0.0"}"#).unwrap();
    controller.create_backup("manual", &HealthState::new(t0()), t0());

    assert!(controller.rollback_to_backup(Some(&first.id), t0()));
    assert_eq!(read(&root, "package.json"), r#"{"name":"app","version":"1.0.0"}"#);
    let action = &controller.actions().recent(1)[0];
    assert_eq!(action.details["files_restored"], 3);
}

#[test]
fn repair_reports_without_editing() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let root = root(&config);
    let mut controller = RecoveryController::new(&config);

    let clean = controller.repair_common_issues(t0());
    assert!(clean.is_clean());
    assert!(controller.actions().recent(1)[0].success);

    fs::remove_dir(root.join("node_modules")).unwrap();
    fs::write(root.join("package.json"), "{ not json").unwrap();
    fs::write(root.join("vite.config.ts"), "   \n").unwrap();

    let report = controller.repair_common_issues(t0());
    assert_eq!(report.issues.len(), 3);
    assert!(report.issues.iter().any(|i| i.contains("node_modules")));
    assert!(report.issues.iter().any(|i| i.starts_with("package.json does not parse")));
    assert!(report.issues.iter().any(|i| i == "vite.config.ts is empty"));
    assert_eq!(read(&root, "package.json"), "{ not json");

    let action = &controller.actions().recent(1)[0];
    assert_eq!(action.action_type, RecoveryActionType::Repair);
    assert!(!action.success);
}

#[test]
fn error_history_keeps_high_and_critical_errors() {
    let tmp = TempDir::new().unwrap();
    let mut config = project(&tmp);
    config.recovery.error_history_capacity = 2;
    let mut controller = RecoveryController::new(&config);
    let mut store = EventStore::new(100);

    for (i, severity) in [Severity::Low, Severity::High, Severity::Critical, Severity::High]
        .into_iter()
        .enumerate()
    {
        let event = store.append(NewEvent::error(severity, "browser", format!("e{i}")), t0());
        controller.observe_event(&event);
    }

    let kept: Vec<_> = controller.error_history().iter().map(|e| e.severity).collect();
    assert_eq!(kept, vec![Severity::High, Severity::Critical]);
}

#[test]
fn state_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    let store = EventStore::new(100);
    {
        let mut controller = RecoveryController::new(&config);
        controller.create_backup("scheduled", &HealthState::new(t0()), t0());
        let mut health = failing(10, 0);
        controller.check(&mut health, &store, &scorer(&config), t0());
    }

    let reopened = RecoveryController::open(&config);
    assert_eq!(reopened.snapshots().len(), 2);
    assert_eq!(reopened.actions().len(), 2);
    assert_eq!(reopened.last_trigger(), Some(t0()));
}

#[test]
fn corrupt_state_file_starts_empty() {
    let tmp = TempDir::new().unwrap();
    let config = project(&tmp);
    fs::create_dir_all(config.log_dir()).unwrap();
    fs::write(config.recovery_state_path(), "{{{{").unwrap();

    let controller = RecoveryController::open(&config);
    assert!(controller.snapshots().is_empty());
    assert!(controller.actions().is_empty());
}
