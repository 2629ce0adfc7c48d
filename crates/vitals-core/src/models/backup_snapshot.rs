use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked file captured in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupFile {
    /// Path relative to the project root.
    pub path: String,
    pub content: String,
    /// Hex BLAKE3 digest of `content`.
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub reason: String,
    /// True iff the failure streak was zero at capture time.
    pub build_success: bool,
    pub health_score: u8,
}

/// Point-in-time capture of the tracked files. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub files: Vec<BackupFile>,
    pub metadata: BackupMetadata,
}
