//! RecoveryController: the recovery state machine.
//!
//! Phases are inferred from health, never stored:
//! - Healthy: score >= 70 and the failure streak within its limit
//! - Degraded: score < 70 or the streak over its limit; issues only
//! - Critical: score < 30, or critical errors in the window at the threshold

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;

use vitals_core::config::{RecoveryConfig, VitalsConfig};
use vitals_core::constants;
use vitals_core::errors::{RecoveryError, VitalsErrorCode};
use vitals_core::models::{
    BackupSnapshot, Event, EventKind, HealthState, RecoveryAction, RecoveryActionType, Severity,
};
use vitals_events::{EventQuery, EventStore};
use vitals_health::HealthScorer;

use crate::action_log::ActionLog;
use crate::error_history::ErrorHistory;
use crate::repair::{self, RepairReport};
use crate::snapshot_store::SnapshotStore;
use crate::state::RecoveryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPhase {
    Healthy,
    Degraded,
    Critical,
}

/// Everything one `trigger_recovery` call did.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryOutcome {
    pub reason: String,
    pub backup: BackupSnapshot,
    pub restart_requested: bool,
    /// `None` when no rollback was attempted.
    pub rollback: Option<bool>,
    pub actions: Vec<RecoveryAction>,
}

#[derive(Debug)]
pub struct RecoveryController {
    config: RecoveryConfig,
    critical_threshold: usize,
    max_consecutive_failures: u32,
    snapshots: SnapshotStore,
    actions: ActionLog,
    errors: ErrorHistory,
    last_trigger: Option<DateTime<Utc>>,
    state_path: PathBuf,
}

impl RecoveryController {
    /// Fresh controller persisting under the configured log directory.
    pub fn new(config: &VitalsConfig) -> Self {
        Self::from_state(config, RecoveryState::default())
    }

    /// Controller seeded from a previous process's `recovery-state.json`.
    pub fn open(config: &VitalsConfig) -> Self {
        let state = RecoveryState::load(&config.recovery_state_path());
        tracing::info!(
            event = "recovery_state_loaded",
            backups = state.backups.len(),
            actions = state.actions.len(),
            "recovery state loaded"
        );
        Self::from_state(config, state)
    }

    fn from_state(config: &VitalsConfig, state: RecoveryState) -> Self {
        let recovery = &config.recovery;
        Self {
            config: recovery.clone(),
            critical_threshold: config.health.thresholds.critical,
            max_consecutive_failures: config.health.max_consecutive_failures,
            snapshots: SnapshotStore::with_backups(recovery, config.backups_dir(), state.backups),
            actions: ActionLog::with_actions(recovery.max_actions, state.actions),
            errors: ErrorHistory::with_entries(recovery.error_history_capacity, state.error_history),
            last_trigger: state.last_trigger,
            state_path: config.recovery_state_path(),
        }
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn actions(&self) -> &ActionLog {
        &self.actions
    }

    pub fn error_history(&self) -> &ErrorHistory {
        &self.errors
    }

    pub fn last_trigger(&self) -> Option<DateTime<Utc>> {
        self.last_trigger
    }

    /// Critical error events inside the critical window.
    pub fn critical_errors(&self, store: &EventStore, now: DateTime<Utc>) -> usize {
        let query = EventQuery::new()
            .within_secs(self.config.critical_window_secs)
            .of_kind(EventKind::Error)
            .exactly(Severity::Critical);
        store.count(&query, now)
    }

    pub fn assess(&self, health: &HealthState, store: &EventStore, now: DateTime<Utc>) -> RecoveryPhase {
        if health.score < constants::CRITICAL_RECOVERY_SCORE
            || self.critical_errors(store, now) >= self.critical_threshold
        {
            RecoveryPhase::Critical
        } else if health.score < constants::GOOD_MIN_SCORE
            || health.consecutive_failures > self.max_consecutive_failures
        {
            RecoveryPhase::Degraded
        } else {
            RecoveryPhase::Healthy
        }
    }

    /// Keep `event` in the error history when it qualifies.
    pub fn observe_event(&mut self, event: &Event) {
        if self.errors.observe(event) {
            self.persist();
        }
    }

    /// Automatic path: trigger recovery when health is Critical and the
    /// previous automatic trigger is older than the minimum interval.
    pub fn check(
        &mut self,
        health: &mut HealthState,
        store: &EventStore,
        scorer: &HealthScorer,
        now: DateTime<Utc>,
    ) -> Option<RecoveryOutcome> {
        if self.assess(health, store, now) != RecoveryPhase::Critical {
            return None;
        }
        let min_interval = Duration::seconds(self.config.min_trigger_interval_secs as i64);
        if let Some(last) = self.last_trigger {
            if now - last < min_interval {
                tracing::debug!(event = "recovery_throttled", "recovery trigger throttled");
                return None;
            }
        }

        let critical = self.critical_errors(store, now);
        let reason = if health.score < constants::CRITICAL_RECOVERY_SCORE {
            format!("health score {} below {}", health.score, constants::CRITICAL_RECOVERY_SCORE)
        } else {
            format!(
                "{critical} critical errors in the last {}s",
                self.config.critical_window_secs
            )
        };
        Some(self.trigger_recovery(&reason, health, store, scorer, now))
    }

    /// Emergency backup, optional restart intent, optional rollback.
    pub fn trigger_recovery(
        &mut self,
        reason: &str,
        health: &mut HealthState,
        store: &EventStore,
        scorer: &HealthScorer,
        now: DateTime<Utc>,
    ) -> RecoveryOutcome {
        tracing::warn!(
            event = "recovery_triggered",
            reason,
            score = health.score,
            consecutive_failures = health.consecutive_failures,
            "recovery triggered"
        );
        self.last_trigger = Some(now);
        let mut actions = Vec::new();

        let (backup, backup_action) = self.capture(&format!("emergency: {reason}"), health, now);
        actions.push(backup_action);

        let restart_requested = self.config.auto_restart;
        if restart_requested {
            actions.push(self.record(RecoveryAction::new(
                RecoveryActionType::Restart,
                reason,
                true,
                json!({ "requested": true }),
                now,
            )));
        }

        let mut rollback = None;
        if self.config.rollback_on_failure
            && health.consecutive_failures > constants::ROLLBACK_FAILURE_STREAK
        {
            let action = self.rollback(None, reason, now);
            if action.success {
                health.consecutive_failures = 0;
                scorer.recompute(store, health, now);
            }
            rollback = Some(action.success);
            actions.push(action);
        }

        self.persist();
        RecoveryOutcome {
            reason: reason.to_string(),
            backup,
            restart_requested,
            rollback,
            actions,
        }
    }

    /// Capture tracked files and log a `backup` action.
    pub fn create_backup(&mut self, reason: &str, health: &HealthState, now: DateTime<Utc>) -> BackupSnapshot {
        let (snapshot, _) = self.capture(reason, health, now);
        self.persist();
        snapshot
    }

    /// Restore `id`, or the newest successful-build backup. Logs a
    /// `rollback` action either way and returns whether it succeeded.
    pub fn rollback_to_backup(&mut self, id: Option<&str>, now: DateTime<Utc>) -> bool {
        let action = self.rollback(id, "requested rollback", now);
        self.persist();
        action.success
    }

    /// Inspect required dirs and tracked config files; logs a `repair` action.
    pub fn repair_common_issues(&mut self, now: DateTime<Utc>) -> RepairReport {
        let report = repair::inspect(
            &PathBuf::from(&self.config.project_root),
            &self.config.required_dirs,
            &self.config.tracked_files,
        );
        for issue in &report.issues {
            tracing::warn!(event = "repair_finding", issue = %issue, "repair finding");
        }
        self.record(RecoveryAction::new(
            RecoveryActionType::Repair,
            "common issue check",
            report.is_clean(),
            json!({ "checked": report.checked, "issues": report.issues }),
            now,
        ));
        self.persist();
        report
    }

    /// Write the current state to `recovery-state.json`; failures are logged.
    pub fn persist(&self) {
        let state = RecoveryState {
            backups: self.snapshots.iter().cloned().collect(),
            actions: self.actions.iter().cloned().collect(),
            error_history: self.errors.iter().cloned().collect(),
            last_trigger: self.last_trigger,
        };
        if let Err(e) = state.save(&self.state_path) {
            tracing::warn!(
                event = "persist_failed",
                path = %self.state_path.display(),
                error = %e,
                "recovery state not persisted"
            );
        }
    }

    fn record(&mut self, action: RecoveryAction) -> RecoveryAction {
        self.actions.record(action.clone());
        action
    }

    fn capture(
        &mut self,
        reason: &str,
        health: &HealthState,
        now: DateTime<Utc>,
    ) -> (BackupSnapshot, RecoveryAction) {
        let snapshot = self.snapshots.create(reason, health, now);
        let action = self.record(RecoveryAction::new(
            RecoveryActionType::Backup,
            reason,
            true,
            json!({
                "backup_id": snapshot.id,
                "files": snapshot.files.len(),
                "build_success": snapshot.metadata.build_success,
            }),
            now,
        ));
        (snapshot, action)
    }

    fn rollback(&mut self, id: Option<&str>, reason: &str, now: DateTime<Utc>) -> RecoveryAction {
        let result = self.snapshots.select(id).and_then(|snapshot| {
            let backup_id = snapshot.id.clone();
            self.snapshots.restore(snapshot).map(|n| (backup_id, n))
        });

        let (success, details) = match &result {
            Ok((backup_id, restored)) => (
                true,
                json!({ "backup_id": backup_id, "files_restored": restored }),
            ),
            Err(e) => {
                tracing::warn!(event = "rollback_failed", error = %e, "rollback failed");
                (false, rollback_failure_details(id, e))
            }
        };
        self.record(RecoveryAction::new(
            RecoveryActionType::Rollback,
            reason,
            success,
            details,
            now,
        ))
    }
}

fn rollback_failure_details(id: Option<&str>, e: &RecoveryError) -> serde_json::Value {
    let restored = match e {
        RecoveryError::RestoreFailed { restored, .. } => *restored,
        _ => 0,
    };
    json!({
        "backup_id": id,
        "error": e.coded_string(),
        "code": e.error_code(),
        "files_restored": restored,
    })
}
