//! Structured log events for engine-level operations.
//!
//! Each function emits a `tracing` event with structured fields.

use crate::scheduler::Job;

/// Log engine start-up with what was restored from disk.
pub fn engine_started(events: usize, backups: usize, score: u8) {
    tracing::info!(
        event = "engine_started",
        events,
        backups,
        score,
        "engine started"
    );
}

/// Log a rejected inbound channel message.
pub fn message_rejected(code: &str, error: &str) {
    tracing::warn!(
        event = "message_rejected",
        code = %code,
        error = %error,
        "inbound message rejected"
    );
}

/// Log a completed scheduled job.
pub fn job_completed(job: Job) {
    tracing::debug!(event = "job_completed", job = ?job, "scheduled job completed");
}

/// Log a failed scheduled job.
pub fn job_failed(job: Job, error: &str) {
    tracing::warn!(event = "job_failed", job = ?job, error = %error, "scheduled job failed");
}

/// Log a written daily report.
pub fn report_written(date: &str, path: &str) {
    tracing::info!(event = "report_written", date = %date, path = %path, "daily report written");
}

/// Log a persistence failure for engine-owned state.
pub fn persist_failed(what: &str, error: &str) {
    tracing::warn!(event = "persist_failed", what = %what, error = %error, "state not persisted");
}

/// Log a blocking task that panicked or was cancelled.
pub fn blocking_task_failed(what: &str, error: &str) {
    tracing::error!(event = "blocking_task_failed", what = %what, error = %error, "blocking task failed");
}

/// Log scheduler shutdown.
pub fn scheduler_stopped() {
    tracing::info!(event = "scheduler_stopped", "scheduler stopped");
}
