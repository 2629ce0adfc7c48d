//! # vitals-health
//!
//! Derives the 0-100 health score, status band, and issue list from the
//! event store, and tracks the consecutive-failure streak across
//! health-check intervals.

pub mod check;
pub mod scorer;

pub use check::HealthCheckOutcome;
pub use scorer::HealthScorer;
