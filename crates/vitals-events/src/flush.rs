//! Durable slice of the event log.

use std::path::Path;

use vitals_core::errors::StorageError;
use vitals_core::models::Event;
use vitals_core::persist;

/// Persist `events` (newest first). Returns the number written.
pub fn write<'a>(
    path: &Path,
    events: impl Iterator<Item = &'a Event>,
) -> Result<usize, StorageError> {
    let slice: Vec<&Event> = events.collect();
    persist::write_json(path, &slice)?;
    Ok(slice.len())
}

/// Load a previously flushed slice. Missing or corrupt files yield nothing.
pub fn load(path: &Path) -> Vec<Event> {
    persist::load_or_else(path, Vec::new)
}
