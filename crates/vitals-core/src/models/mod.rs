//! Data model shared by every component.

pub mod alert;
pub mod backup_snapshot;
pub mod event;
pub mod health_state;
pub mod recovery_action;

pub use alert::{Alert, AlertSeverity};
pub use backup_snapshot::{BackupFile, BackupMetadata, BackupSnapshot};
pub use event::{
    BuildOutcome, BuildPhase, DomActivity, DomActivityKind, ErrorDetail, Event, EventKind,
    EventPayload, FileChange, FileChangeKind, NetworkSample, NewEvent, PerformanceSample,
    Severity,
};
pub use health_state::{HealthState, HealthStatus};
pub use recovery_action::{RecoveryAction, RecoveryActionType};
