//! Top-level Vitals configuration with layered resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    AlertConfig, HealthConfig, ObservabilityConfig, RecoveryConfig, ScheduleConfig,
    StorageConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Name of the project config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "vitals.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VITALS_*`)
/// 2. Project config (`vitals.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VitalsConfig {
    pub health: HealthConfig,
    pub alerts: AlertConfig,
    pub recovery: RecoveryConfig,
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub observability: ObservabilityConfig,
}

impl VitalsConfig {
    /// Load configuration for the project at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let mut config = if project_config_path.exists() {
            let content = std::fs::read_to_string(&project_config_path).map_err(|_| {
                ConfigError::FileNotFound {
                    path: project_config_path.display().to_string(),
                }
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &str, message: &str) -> ConfigError {
            ConfigError::ValidationFailed {
                field: field.to_string(),
                message: message.to_string(),
            }
        }

        if self.storage.event_capacity == 0 {
            return Err(invalid("storage.event_capacity", "must be greater than 0"));
        }
        if self.storage.flush_every == 0 {
            return Err(invalid("storage.flush_every", "must be greater than 0"));
        }
        if self.recovery.max_backups == 0 {
            return Err(invalid("recovery.max_backups", "must be greater than 0"));
        }
        if self.recovery.max_actions == 0 {
            return Err(invalid("recovery.max_actions", "must be greater than 0"));
        }
        if self.health.build_time_benchmark_ms <= 0.0 {
            return Err(invalid(
                "health.build_time_benchmark_ms",
                "must be greater than 0",
            ));
        }
        if self.health.bundle_size_benchmark_bytes == 0 {
            return Err(invalid(
                "health.bundle_size_benchmark_bytes",
                "must be greater than 0",
            ));
        }
        if self.health.thresholds.critical == 0 {
            return Err(invalid(
                "health.thresholds.critical",
                "must be greater than 0",
            ));
        }
        if self.schedule.health_check_interval_secs == 0 {
            return Err(invalid(
                "schedule.health_check_interval_secs",
                "must be greater than 0",
            ));
        }
        if self.schedule.report_time_of_day().is_none() {
            return Err(invalid("schedule.report_time", "must be HH:MM"));
        }

        let mut seen = HashSet::new();
        for rule in &self.alerts.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "alerts.rules".to_string(),
                    message: format!("duplicate rule id '{}'", rule.id),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `VITALS_LOG_DIR`, `VITALS_MAX_BACKUPS`, etc.
    fn apply_env_overrides(config: &mut VitalsConfig) {
        if let Ok(val) = std::env::var("VITALS_LOG_DIR") {
            config.storage.log_dir = val;
        }
        if let Ok(val) = std::env::var("VITALS_EVENT_CAPACITY") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.event_capacity = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_RETENTION_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.storage.retention_days = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_MAX_BACKUPS") {
            if let Ok(v) = val.parse::<usize>() {
                config.recovery.max_backups = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_AUTO_RESTART") {
            if let Ok(v) = val.parse::<bool>() {
                config.recovery.auto_restart = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_ROLLBACK_ON_FAILURE") {
            if let Ok(v) = val.parse::<bool>() {
                config.recovery.rollback_on_failure = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_HEALTH_CHECK_INTERVAL_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.schedule.health_check_interval_secs = v;
            }
        }
        if let Ok(val) = std::env::var("VITALS_LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }

    /// Directory holding all persisted state.
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.log_dir)
    }

    pub fn events_path(&self) -> PathBuf {
        self.log_dir().join(constants::EVENTS_FILE)
    }

    pub fn health_path(&self) -> PathBuf {
        self.log_dir().join(constants::HEALTH_FILE)
    }

    pub fn recovery_state_path(&self) -> PathBuf {
        self.log_dir().join(constants::RECOVERY_STATE_FILE)
    }

    pub fn alerts_path(&self) -> PathBuf {
        self.log_dir().join(constants::ALERTS_FILE)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.log_dir().join(constants::BACKUPS_DIR)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.log_dir().join(constants::REPORTS_DIR)
    }

    pub fn project_root(&self) -> PathBuf {
        PathBuf::from(&self.recovery.project_root)
    }
}
