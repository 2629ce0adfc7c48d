//! Rollback and restore failures.

use super::error_code::{self, VitalsErrorCode};

/// Errors raised while selecting or restoring a backup snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("no backup with a successful build is available")]
    NoSuitableBackup,

    #[error("backup {id} not found")]
    BackupNotFound { id: String },

    #[error("checksum mismatch for {path} in backup {backup_id}")]
    ChecksumMismatch { backup_id: String, path: String },

    #[error("restoring {path} failed after {restored} file(s): {message}")]
    RestoreFailed {
        path: String,
        restored: usize,
        message: String,
    },
}

impl VitalsErrorCode for RecoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuitableBackup => error_code::NO_SUITABLE_BACKUP,
            Self::BackupNotFound { .. } => error_code::BACKUP_NOT_FOUND,
            Self::ChecksumMismatch { .. } => error_code::CHECKSUM_MISMATCH,
            Self::RestoreFailed { .. } => error_code::RESTORE_FAILED,
        }
    }
}
