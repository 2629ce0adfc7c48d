//! VitalsErrorCode trait for wire-level error reporting.

/// Every error enum provides a stable code string so observers on the
/// real-time channel can branch on failures without parsing messages.
pub trait VitalsErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted wire string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const NO_SUITABLE_BACKUP: &str = "NO_SUITABLE_BACKUP";
pub const BACKUP_NOT_FOUND: &str = "BACKUP_NOT_FOUND";
pub const CHECKSUM_MISMATCH: &str = "CHECKSUM_MISMATCH";
pub const RESTORE_FAILED: &str = "RESTORE_FAILED";
pub const MALFORMED_MESSAGE: &str = "MALFORMED_MESSAGE";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
