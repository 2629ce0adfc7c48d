//! Top-level error aggregating every subsystem error via `From` conversions.

use super::error_code::{self, VitalsErrorCode};
use super::{ConfigError, ProtocolError, RecoveryError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Recovery error: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("engine state lock poisoned: {0}")]
    Poisoned(String),
}

pub type VitalsResult<T> = Result<T, VitalsError>;

impl VitalsErrorCode for VitalsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Recovery(e) => e.error_code(),
            Self::Protocol(e) => e.error_code(),
            Self::Poisoned(_) => error_code::LOCK_POISONED,
        }
    }
}
