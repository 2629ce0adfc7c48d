use chrono::{DateTime, Duration, Utc};

use vitals_core::config::AlertRuleConfig;

/// A configured rule plus the instant it last fired.
#[derive(Debug, Clone)]
pub struct AlertRule {
    pub config: AlertRuleConfig,
    pub last_triggered: Option<DateTime<Utc>>,
}

impl AlertRule {
    pub fn new(config: AlertRuleConfig) -> Self {
        Self {
            config,
            last_triggered: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.config.cooldown_secs as i64)
    }

    /// True while `now - last_triggered < cooldown`.
    pub fn in_cooldown(&self, now: DateTime<Utc>) -> bool {
        match self.last_triggered {
            Some(last) => now - last < self.cooldown(),
            None => false,
        }
    }
}
