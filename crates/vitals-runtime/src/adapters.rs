//! Thin adapters mapping plugin lifecycle callbacks onto `add_event`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use vitals_core::errors::VitalsResult;
use vitals_core::models::{
    BuildOutcome, BuildPhase, ErrorDetail, Event, EventPayload, FileChange, FileChangeKind,
    NewEvent, Severity,
};

use crate::engine::VitalsEngine;

pub const BUILD_SOURCE: &str = "build-hooks";
pub const FILE_WATCHER_SOURCE: &str = "file-watcher";

/// Build lifecycle hooks. Build duration is measured from the last
/// `build_start` when the caller does not supply one.
#[derive(Debug)]
pub struct BuildHooks {
    engine: Arc<VitalsEngine>,
    started_at: Mutex<Option<DateTime<Utc>>>,
}

impl BuildHooks {
    pub fn new(engine: Arc<VitalsEngine>) -> Self {
        Self {
            engine,
            started_at: Mutex::new(None),
        }
    }

    pub fn build_start(&self) -> VitalsResult<Event> {
        *self.started_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(self.engine.now());
        self.emit(Severity::Info, BuildOutcome {
            phase: BuildPhase::Start,
            success: None,
            duration_ms: None,
            bundle_size_bytes: None,
            message: None,
        })
    }

    /// A finished build. Failed builds are logged at medium severity.
    pub fn build_end(&self, success: bool, duration_ms: Option<f64>) -> VitalsResult<Event> {
        let duration_ms = duration_ms.or_else(|| self.elapsed_ms());
        let severity = if success { Severity::Info } else { Severity::Medium };
        self.emit(severity, BuildOutcome {
            phase: BuildPhase::End,
            success: Some(success),
            duration_ms,
            bundle_size_bytes: None,
            message: None,
        })
    }

    /// A build error, logged as a high-severity error event.
    pub fn build_error(&self, message: &str, location: Option<&str>) -> VitalsResult<Event> {
        let detail = ErrorDetail {
            location: location.map(str::to_string),
            ..ErrorDetail::new(message)
        };
        self.engine.add_event(NewEvent::new(
            Severity::High,
            BUILD_SOURCE,
            EventPayload::Error(detail),
        ))
    }

    pub fn bundle_generated(&self, bundle_size_bytes: u64) -> VitalsResult<Event> {
        self.emit(Severity::Info, BuildOutcome {
            phase: BuildPhase::Bundle,
            success: Some(true),
            duration_ms: None,
            bundle_size_bytes: Some(bundle_size_bytes),
            message: None,
        })
    }

    fn elapsed_ms(&self) -> Option<f64> {
        let started = self
            .started_at
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()?;
        Some((self.engine.now() - started).num_milliseconds().max(0) as f64)
    }

    fn emit(&self, severity: Severity, outcome: BuildOutcome) -> VitalsResult<Event> {
        self.engine
            .add_event(NewEvent::new(severity, BUILD_SOURCE, EventPayload::Build(outcome)))
    }
}

/// File-system watcher adapter. Paths under `root` are recorded relative to it.
#[derive(Debug)]
pub struct FileWatcher {
    engine: Arc<VitalsEngine>,
    root: PathBuf,
}

impl FileWatcher {
    pub fn new(engine: Arc<VitalsEngine>, root: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            root: root.into(),
        }
    }

    pub fn file_changed(&self, path: &Path, change: FileChangeKind) -> VitalsResult<Event> {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.engine.add_event(NewEvent::new(
            Severity::Info,
            FILE_WATCHER_SOURCE,
            EventPayload::File(FileChange {
                path: rel.display().to_string(),
                change,
            }),
        ))
    }
}
