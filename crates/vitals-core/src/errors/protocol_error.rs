//! Ingestion errors for inbound real-time channel messages.

use super::error_code::{self, VitalsErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {message}")]
    Malformed { message: String },
}

impl VitalsErrorCode for ProtocolError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_MESSAGE
    }
}
