//! JSON state files under the log directory.
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous version intact.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageError;

/// Serialize `value` as pretty JSON and atomically replace `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json =
        serde_json::to_vec_pretty(value).map_err(|e| StorageError::serialization(path, e))?;
    write_atomic(path, &json)
}

/// Read and deserialize `path`. Returns `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StorageError::serialization(path, e))
}

/// Write `bytes` to `path` via a temp file and rename, creating parent dirs.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, bytes).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))
}

/// Load `path`, or build a fallback when it is missing or unreadable.
/// Corrupt files are logged, not fatal.
pub fn load_or_else<T: DeserializeOwned>(path: &Path, fallback: impl FnOnce() -> T) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => fallback(),
        Err(e) => {
            tracing::warn!(
                event = "state_load_failed",
                path = %path.display(),
                error = %e,
                "state file unreadable, starting from defaults"
            );
            fallback()
        }
    }
}
