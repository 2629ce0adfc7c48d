//! Configuration system for Vitals.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod alert_config;
pub mod defaults;
pub mod health_config;
pub mod observability_config;
pub mod recovery_config;
pub mod schedule_config;
pub mod storage_config;
pub mod vitals_config;

pub use alert_config::{AlertCondition, AlertConfig, AlertRuleConfig};
pub use health_config::{ErrorThresholds, HealthConfig};
pub use observability_config::ObservabilityConfig;
pub use recovery_config::RecoveryConfig;
pub use schedule_config::ScheduleConfig;
pub use storage_config::StorageConfig;
pub use vitals_config::VitalsConfig;
