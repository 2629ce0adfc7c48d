//! # vitals-core
//!
//! Foundation crate for the Vitals health and recovery engine.
//! Defines the event model, health state, backups, recovery actions,
//! errors, config, the clock abstraction, and JSON persistence helpers.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod persist;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VitalsConfig;
pub use errors::{VitalsError, VitalsResult};
pub use models::{Event, EventKind, EventPayload, HealthState, HealthStatus, NewEvent, Severity};
pub use traits::{Clock, ManualClock, SystemClock};
