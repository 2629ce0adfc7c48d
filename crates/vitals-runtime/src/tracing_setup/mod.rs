//! Tracing setup: fmt subscriber filtered by `VITALS_LOG`.

pub mod events;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use vitals_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Install the global subscriber. `VITALS_LOG` wins over the configured
/// level; JSON output when `json_logs` is set. Later calls are no-ops.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("VITALS_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        install(filter, config.json_logs);
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| install(EnvFilter::new(filter), false));
}

fn install(filter: EnvFilter, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
