//! # vitals-alerts
//!
//! Evaluates the configured rule catalog against the event store on every
//! new event. A rule whose condition holds fires once, then stays silent
//! until its cooldown has elapsed.

pub mod conditions;
pub mod engine;
pub mod rule;

pub use engine::AlertEngine;
pub use rule::AlertRule;
