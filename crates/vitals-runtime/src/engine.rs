//! VitalsEngine: the process-owned context every collaborator writes through.

use std::sync::{Arc, Mutex, MutexGuard};

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use vitals_alerts::AlertEngine;
use vitals_core::config::VitalsConfig;
use vitals_core::constants;
use vitals_core::errors::{VitalsError, VitalsResult};
use vitals_core::models::{BackupSnapshot, Event, HealthState, NewEvent, RecoveryAction};
use vitals_core::persist;
use vitals_core::traits::{Clock, SystemClock};
use vitals_events::{retention, EventStore};
use vitals_health::{HealthCheckOutcome, HealthScorer};
use vitals_recovery::{RecoveryController, RecoveryOutcome, RepairReport};

use crate::observer::{ObserverHub, Subscription};
use crate::protocol::ServerMessage;
use crate::reports::{self, DailyReport};
use crate::tracing_setup::events;

/// Buffered messages per subscriber before it starts lagging.
const BROADCAST_CAPACITY: usize = 256;

/// Reply to `get-status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub health: HealthState,
    pub backups: Vec<BackupSnapshot>,
    pub recent_actions: Vec<RecoveryAction>,
    pub error_history: Vec<Event>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetentionSummary {
    pub events_removed: usize,
    pub reports_removed: usize,
}

struct EngineState {
    store: EventStore,
    health: HealthState,
    scorer: HealthScorer,
    alerts: AlertEngine,
    recovery: RecoveryController,
}

/// All mutation goes through one mutex, so two `add_event` chains never
/// interleave.
pub struct VitalsEngine {
    config: VitalsConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<EngineState>,
    hub: ObserverHub,
}

impl VitalsEngine {
    /// Build the engine, restoring events, health, alert cooldowns, and
    /// recovery state from the log directory. Missing or corrupt files start
    /// from defaults.
    pub fn open(config: VitalsConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let store = EventStore::open(&config.storage, config.events_path());
        let mut health =
            persist::load_or_else(&config.health_path(), || HealthState::new(now));
        let scorer = HealthScorer::new(config.health.clone());
        scorer.recompute(&store, &mut health, now);
        let recovery = RecoveryController::open(&config);
        let cooldowns: BTreeMap<String, DateTime<Utc>> =
            persist::load_or_else(&config.alerts_path(), BTreeMap::new);

        events::engine_started(store.len(), recovery.snapshots().len(), health.score);
        Self {
            hub: ObserverHub::new(BROADCAST_CAPACITY),
            state: Mutex::new(EngineState {
                store,
                health,
                alerts: AlertEngine::with_cooldowns(&config.alerts, &cooldowns),
                scorer,
                recovery,
            }),
            clock,
            config,
        }
    }

    pub fn with_system_clock(config: VitalsConfig) -> Self {
        Self::open(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn hub(&self) -> &ObserverHub {
        &self.hub
    }

    fn lock(&self) -> VitalsResult<MutexGuard<'_, EngineState>> {
        self.state
            .lock()
            .map_err(|e| VitalsError::Poisoned(e.to_string()))
    }

    /// Append, recompute, evaluate alerts, broadcast, check for recovery,
    /// persist health. The whole chain runs under the engine lock.
    pub fn add_event(&self, new: NewEvent) -> VitalsResult<Event> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = self.clock.now();

        let event = state.store.append(new, now);
        state.recovery.observe_event(&event);
        state.scorer.recompute(&state.store, &mut state.health, now);
        self.hub.publish(ServerMessage::Event {
            event: event.clone(),
        });

        let fired = state.alerts.evaluate(&state.store, now);
        for alert in &fired {
            let logged = state.store.append(AlertEngine::alert_event(alert), now);
            state.recovery.observe_event(&logged);
            self.hub.publish(ServerMessage::Event { event: logged });
            self.hub.publish(ServerMessage::Alert {
                alert: alert.clone(),
            });
        }
        if !fired.is_empty() {
            self.persist_cooldowns(&state.alerts);
            state.scorer.recompute(&state.store, &mut state.health, now);
        }

        self.check_recovery(state, now);
        self.publish_health(&state.health);
        Ok(event)
    }

    /// Periodic health check over the configured interval, followed by the
    /// recovery check.
    pub fn run_health_check(&self) -> VitalsResult<HealthCheckOutcome> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = self.clock.now();

        let interval = Duration::seconds(self.config.schedule.health_check_interval_secs as i64);
        let outcome = state
            .scorer
            .check_interval(&state.store, &mut state.health, interval, now);
        self.check_recovery(state, now);
        self.publish_health(&state.health);
        Ok(outcome)
    }

    /// Manual trigger; not subject to the automatic throttle.
    pub fn trigger_recovery(&self, reason: &str) -> VitalsResult<RecoveryOutcome> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = self.clock.now();

        let outcome = state.recovery.trigger_recovery(
            reason,
            &mut state.health,
            &state.store,
            &state.scorer,
            now,
        );
        self.publish_recovery(&outcome);
        self.publish_health(&state.health);
        Ok(outcome)
    }

    pub fn create_backup(&self, reason: &str) -> VitalsResult<BackupSnapshot> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let backup = state
            .recovery
            .create_backup(reason, &state.health, self.clock.now());
        self.publish_latest_action(state);
        Ok(backup)
    }

    /// Restore a backup. A successful rollback changes what is on disk, so
    /// health is recomputed and broadcast after it.
    pub fn rollback(&self, backup_id: Option<&str>) -> VitalsResult<bool> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = self.clock.now();

        let success = state.recovery.rollback_to_backup(backup_id, now);
        self.publish_latest_action(state);
        if success {
            state.scorer.recompute(&state.store, &mut state.health, now);
            self.publish_health(&state.health);
        }
        Ok(success)
    }

    pub fn repair(&self) -> VitalsResult<RepairReport> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let report = state.recovery.repair_common_issues(self.clock.now());
        self.publish_latest_action(state);
        Ok(report)
    }

    pub fn health(&self) -> VitalsResult<HealthState> {
        Ok(self.lock()?.health.clone())
    }

    pub fn recent_events(&self, n: usize) -> VitalsResult<Vec<Event>> {
        Ok(self.lock()?.store.latest(n))
    }

    pub fn status(&self) -> VitalsResult<StatusReport> {
        let state = self.lock()?;
        Ok(StatusReport {
            health: state.health.clone(),
            backups: state.recovery.snapshots().recent(constants::STATUS_BACKUP_LIMIT),
            recent_actions: state.recovery.actions().recent(constants::STATUS_ACTION_LIMIT),
            error_history: state
                .recovery
                .error_history()
                .recent(constants::STATUS_ERROR_HISTORY_LIMIT),
        })
    }

    /// Register a subscriber. The backfill and the receiver are taken under
    /// the lock, so no event falls between them.
    pub fn subscribe(&self) -> VitalsResult<Subscription> {
        let state = self.lock()?;
        Ok(self
            .hub
            .subscribe(state.store.latest(self.config.storage.backfill_count)))
    }

    pub fn flush_events(&self) -> VitalsResult<usize> {
        let state = self.lock()?;
        Ok(state.store.flush()?)
    }

    /// Drop expired events and delete report files past the retention period.
    pub fn retention_sweep(&self) -> VitalsResult<RetentionSummary> {
        let mut state = self.lock()?;
        let now = self.clock.now();
        let retention_days = self.config.storage.retention_days;

        let events_removed = retention::sweep(&mut state.store, now, retention_days);
        if events_removed > 0 {
            state.store.flush_logged();
        }
        let cutoff = (now - Duration::days(retention_days as i64)).date_naive();
        let reports_removed = reports::sweep(&self.config.reports_dir(), cutoff)?;

        Ok(RetentionSummary {
            events_removed,
            reports_removed,
        })
    }

    /// Build and write the report for `date`.
    pub fn generate_report(&self, date: NaiveDate) -> VitalsResult<DailyReport> {
        let report = {
            let state = self.lock()?;
            DailyReport::build(
                date,
                state.store.iter(),
                state.recovery.actions().iter(),
                &state.health,
                &self.config.health.thresholds,
                self.clock.now(),
            )
        };
        let path = reports::write(&self.config.reports_dir(), &report)?;
        events::report_written(&date.to_string(), &path.display().to_string());
        Ok(report)
    }

    /// Flush events and persist health and recovery state.
    pub fn persist_all(&self) -> VitalsResult<()> {
        let state = self.lock()?;
        state.store.flush()?;
        persist::write_json(&self.config.health_path(), &state.health)?;
        state.recovery.persist();
        self.persist_cooldowns(&state.alerts);
        Ok(())
    }

    fn persist_cooldowns(&self, alerts: &AlertEngine) {
        if let Err(e) = persist::write_json(&self.config.alerts_path(), &alerts.cooldowns()) {
            events::persist_failed("alerts", &e.to_string());
        }
    }

    fn publish_latest_action(&self, state: &EngineState) {
        if let Some(action) = state.recovery.actions().latest() {
            self.hub.publish(ServerMessage::Action {
                action: action.clone(),
            });
        }
    }

    fn check_recovery(&self, state: &mut EngineState, now: DateTime<Utc>) {
        if let Some(outcome) =
            state
                .recovery
                .check(&mut state.health, &state.store, &state.scorer, now)
        {
            self.publish_recovery(&outcome);
        }
    }

    fn publish_recovery(&self, outcome: &RecoveryOutcome) {
        if outcome.restart_requested {
            self.hub.publish(ServerMessage::RestartRequested {
                reason: outcome.reason.clone(),
            });
        }
        self.hub.publish(ServerMessage::Recovery {
            outcome: outcome.clone(),
        });
    }

    /// Persist health after a recompute and broadcast it.
    fn publish_health(&self, health: &HealthState) {
        if let Err(e) = persist::write_json(&self.config.health_path(), health) {
            events::persist_failed("health", &e.to_string());
        }
        self.hub.publish(ServerMessage::Health {
            health: health.clone(),
        });
    }
}

impl std::fmt::Debug for VitalsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VitalsEngine")
            .field("log_dir", &self.config.storage.log_dir)
            .field("subscribers", &self.hub.subscriber_count())
            .finish()
    }
}
