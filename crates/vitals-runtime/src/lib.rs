//! # vitals-runtime
//!
//! The process-owned [`VitalsEngine`] context. Every collaborator (channel
//! handlers, build hooks, file watcher, scheduled jobs) writes through it,
//! and each `add_event` runs append, recompute, alerts, broadcast, and the
//! recovery check as one chain under a single lock.

pub mod adapters;
pub mod engine;
pub mod observer;
pub mod protocol;
pub mod reports;
pub mod scheduler;
pub mod tracing_setup;

pub use adapters::{BuildHooks, FileWatcher};
pub use engine::{RetentionSummary, StatusReport, VitalsEngine};
pub use observer::{ObserverHub, Subscription};
pub use protocol::{ClientMessage, ServerMessage};
pub use reports::DailyReport;
pub use scheduler::{run_scheduler, Job, RecurringTask, Scheduler};
