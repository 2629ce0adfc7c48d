//! Persistence errors for state files and backup artifacts.

use super::error_code::{self, VitalsErrorCode};

/// Disk read/write failures. In-memory state stays authoritative when these occur.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("serialization error for {path}: {message}")]
    Serialization { path: String, message: String },
}

impl StorageError {
    pub fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn serialization(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl VitalsErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::STORAGE_ERROR,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
        }
    }
}
