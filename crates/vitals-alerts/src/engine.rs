//! AlertEngine: ordered rule evaluation with cooldowns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use vitals_core::config::AlertConfig;
use vitals_core::models::{Alert, ErrorDetail, EventPayload, NewEvent};
use vitals_events::EventStore;

use crate::conditions;
use crate::rule::AlertRule;

/// Source tag on events produced by fired alerts.
pub const ALERT_SOURCE: &str = "alert-engine";

#[derive(Debug, Clone)]
pub struct AlertEngine {
    rules: Vec<AlertRule>,
}

impl AlertEngine {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            rules: config.rules.iter().cloned().map(AlertRule::new).collect(),
        }
    }

    /// Rules seeded with persisted `last_triggered` times, keyed by rule id.
    /// Ids no longer configured are ignored.
    pub fn with_cooldowns(config: &AlertConfig, cooldowns: &BTreeMap<String, DateTime<Utc>>) -> Self {
        let mut engine = Self::new(config);
        for rule in &mut engine.rules {
            rule.last_triggered = cooldowns.get(rule.id()).copied();
        }
        engine
    }

    /// `last_triggered` of every rule that has fired, keyed by rule id.
    pub fn cooldowns(&self) -> BTreeMap<String, DateTime<Utc>> {
        self.rules
            .iter()
            .filter_map(|r| r.last_triggered.map(|at| (r.id().to_string(), at)))
            .collect()
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    /// Evaluate every rule in configured order and return the alerts that fired.
    ///
    /// Rules still in cooldown are skipped without evaluating their condition.
    /// Cooldown is keyed by rule, so an alert's own logged event can never
    /// re-fire the same rule inside its cooldown.
    pub fn evaluate(&mut self, store: &EventStore, now: DateTime<Utc>) -> Vec<Alert> {
        let mut fired = Vec::new();
        for rule in &mut self.rules {
            if rule.in_cooldown(now) {
                continue;
            }
            let Some(finding) = conditions::evaluate(&rule.config.condition, store, now) else {
                continue;
            };
            rule.last_triggered = Some(now);

            let alert = Alert {
                id: uuid::Uuid::new_v4().to_string(),
                rule_id: rule.config.id.clone(),
                rule_name: rule.config.name.clone(),
                severity: rule.config.severity,
                message: format!("{}: {finding}", rule.config.name),
                triggered_at: now,
            };
            tracing::warn!(
                event = "alert_fired",
                rule_id = %alert.rule_id,
                severity = ?alert.severity,
                message = %alert.message,
                "alert fired"
            );
            fired.push(alert);
        }
        fired
    }

    /// The error event logged for a fired alert.
    pub fn alert_event(alert: &Alert) -> NewEvent {
        NewEvent::new(
            alert.severity.event_severity(),
            ALERT_SOURCE,
            EventPayload::Error(ErrorDetail {
                message: alert.message.clone(),
                stack: None,
                location: None,
                alert_rule: Some(alert.rule_id.clone()),
            }),
        )
        .with_timestamp(alert.triggered_at)
    }
}
