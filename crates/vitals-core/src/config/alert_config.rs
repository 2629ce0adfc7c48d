//! Alert rule catalog configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::AlertSeverity;

/// Predicate evaluated over the event store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertCondition {
    /// More than `max_errors` error events in the window.
    ErrorRate { window_secs: u64, max_errors: usize },
    /// Mean network response time in the window above the threshold.
    SlowResponse {
        window_secs: u64,
        max_mean_response_ms: f64,
    },
    /// Any performance sample in the window reports memory above the threshold.
    MemoryLeak { window_secs: u64, max_memory_mb: f64 },
    /// Mean build duration in the window above the threshold.
    BuildDegradation {
        window_secs: u64,
        max_mean_build_ms: f64,
    },
}

/// One configured rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRuleConfig {
    pub id: String,
    pub name: String,
    pub condition: AlertCondition,
    pub severity: AlertSeverity,
    pub cooldown_secs: u64,
}

/// Alert engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Evaluated in order on every new event.
    pub rules: Vec<AlertRuleConfig>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// The reference catalog: error rate, slow response, memory leak, build degradation.
pub fn default_rules() -> Vec<AlertRuleConfig> {
    vec![
        AlertRuleConfig {
            id: "high_error_rate".into(),
            name: "High error rate".into(),
            condition: AlertCondition::ErrorRate {
                window_secs: defaults::DEFAULT_ERROR_RATE_WINDOW_SECS,
                max_errors: defaults::DEFAULT_ERROR_RATE_MAX,
            },
            severity: AlertSeverity::Critical,
            cooldown_secs: defaults::DEFAULT_ALERT_COOLDOWN_SECS,
        },
        AlertRuleConfig {
            id: "slow_response".into(),
            name: "Slow response".into(),
            condition: AlertCondition::SlowResponse {
                window_secs: defaults::DEFAULT_SLOW_RESPONSE_WINDOW_SECS,
                max_mean_response_ms: defaults::DEFAULT_SLOW_RESPONSE_MS,
            },
            severity: AlertSeverity::Warning,
            cooldown_secs: defaults::DEFAULT_ALERT_COOLDOWN_SECS,
        },
        AlertRuleConfig {
            id: "memory_leak".into(),
            name: "Memory leak".into(),
            condition: AlertCondition::MemoryLeak {
                window_secs: defaults::DEFAULT_MEMORY_WINDOW_SECS,
                max_memory_mb: defaults::DEFAULT_MEMORY_MAX_MB,
            },
            severity: AlertSeverity::Critical,
            cooldown_secs: defaults::DEFAULT_ALERT_COOLDOWN_SECS * 2,
        },
        AlertRuleConfig {
            id: "build_degradation".into(),
            name: "Build degradation".into(),
            condition: AlertCondition::BuildDegradation {
                window_secs: defaults::DEFAULT_BUILD_WINDOW_SECS,
                max_mean_build_ms: defaults::DEFAULT_BUILD_MAX_MEAN_MS,
            },
            severity: AlertSeverity::Warning,
            cooldown_secs: defaults::DEFAULT_ALERT_COOLDOWN_SECS * 6,
        },
    ]
}
