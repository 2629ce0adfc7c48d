//! # vitals-recovery
//!
//! Snapshot store, action log, error history, and the recovery state machine
//! that ties them to health.
//!
//! - [`SnapshotStore`]: bounded ring of tracked-file captures with on-disk artifacts
//! - [`ActionLog`]: bounded audit trail of recovery decisions
//! - [`RecoveryController`]: Healthy / Degraded / Critical assessment, trigger,
//!   rollback, repair

pub mod action_log;
pub mod checksum;
pub mod controller;
pub mod error_history;
pub mod repair;
pub mod snapshot_store;
pub mod state;

pub use action_log::ActionLog;
pub use controller::{RecoveryController, RecoveryOutcome, RecoveryPhase};
pub use error_history::ErrorHistory;
pub use repair::RepairReport;
pub use snapshot_store::SnapshotStore;
pub use state::RecoveryState;
