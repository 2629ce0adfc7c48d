//! Error handling for Vitals.
//! One error enum per concern, `thiserror` only, aggregated by [`VitalsError`].

pub mod config_error;
pub mod error_code;
pub mod protocol_error;
pub mod recovery_error;
pub mod storage_error;
pub mod vitals_error;

pub use config_error::ConfigError;
pub use error_code::VitalsErrorCode;
pub use protocol_error::ProtocolError;
pub use recovery_error::RecoveryError;
pub use storage_error::StorageError;
pub use vitals_error::{VitalsError, VitalsResult};
