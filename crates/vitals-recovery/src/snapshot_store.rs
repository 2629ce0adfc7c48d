//! SnapshotStore: bounded ring of tracked-file captures.
//!
//! Each snapshot keeps file content in memory and also writes one artifact
//! per file to `{backups_dir}/{backupId}-{sanitizedPath}`. Evicting a
//! snapshot deletes its artifacts.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use vitals_core::config::RecoveryConfig;
use vitals_core::errors::{RecoveryError, StorageError};
use vitals_core::models::{BackupFile, BackupMetadata, BackupSnapshot, HealthState};
use vitals_core::persist;

use crate::checksum;

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Index 0 is the newest snapshot.
    backups: VecDeque<BackupSnapshot>,
    max_backups: usize,
    backups_dir: PathBuf,
    project_root: PathBuf,
    tracked_files: Vec<String>,
}

impl SnapshotStore {
    pub fn new(config: &RecoveryConfig, backups_dir: PathBuf) -> Self {
        Self {
            backups: VecDeque::new(),
            max_backups: config.max_backups,
            backups_dir,
            project_root: PathBuf::from(&config.project_root),
            tracked_files: config.tracked_files.clone(),
        }
    }

    /// Seed with persisted snapshots (newest first), keeping at most `max_backups`.
    pub fn with_backups(
        config: &RecoveryConfig,
        backups_dir: PathBuf,
        backups: Vec<BackupSnapshot>,
    ) -> Self {
        let mut store = Self::new(config, backups_dir);
        store.backups = backups.into_iter().take(store.max_backups).collect();
        store
    }

    /// Capture every tracked file that exists. Missing files are skipped.
    pub fn create(&mut self, reason: &str, health: &HealthState, now: DateTime<Utc>) -> BackupSnapshot {
        let id = uuid::Uuid::new_v4().to_string();
        let mut files = Vec::with_capacity(self.tracked_files.len());

        for rel in &self.tracked_files {
            let source = self.project_root.join(rel);
            let content = match fs::read(&source) {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(_) => {
                        tracing::warn!(
                            event = "backup_file_skipped",
                            path = %source.display(),
                            "tracked file is not UTF-8, skipping"
                        );
                        continue;
                    }
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!(
                        event = "backup_file_skipped",
                        path = %source.display(),
                        error = %e,
                        "tracked file unreadable, skipping"
                    );
                    continue;
                }
            };

            let artifact = self.artifact_path(&id, rel);
            if let Err(e) = persist::write_atomic(&artifact, content.as_bytes()) {
                tracing::warn!(event = "backup_artifact_failed", error = %e, "backup artifact not written");
            }

            files.push(BackupFile {
                path: rel.clone(),
                checksum: checksum::digest(&content),
                content,
            });
        }

        let snapshot = BackupSnapshot {
            id,
            timestamp: now,
            files,
            metadata: BackupMetadata {
                reason: reason.to_string(),
                build_success: health.consecutive_failures == 0,
                health_score: health.score,
            },
        };
        tracing::info!(
            event = "backup_created",
            backup_id = %snapshot.id,
            reason,
            files = snapshot.files.len(),
            build_success = snapshot.metadata.build_success,
            health_score = snapshot.metadata.health_score,
            "backup created"
        );

        self.backups.push_front(snapshot.clone());
        while self.backups.len() > self.max_backups {
            if let Some(evicted) = self.backups.pop_back() {
                self.remove_artifacts(&evicted);
            }
        }
        snapshot
    }

    /// The snapshot `id`, or the newest one captured with a successful build.
    pub fn select(&self, id: Option<&str>) -> Result<&BackupSnapshot, RecoveryError> {
        match id {
            Some(id) => self.get(id).ok_or_else(|| RecoveryError::BackupNotFound {
                id: id.to_string(),
            }),
            None => self
                .latest_good()
                .ok_or(RecoveryError::NoSuitableBackup),
        }
    }

    /// Overwrite every file in `snapshot` under the project root.
    ///
    /// Every path must be relative, free of `..`, and currently tracked, and
    /// all checksums must verify, before any file is touched. Each file is
    /// written atomically; a failed write does not undo earlier ones, and
    /// the remaining files are still attempted. Returns the number restored.
    pub fn restore(&self, snapshot: &BackupSnapshot) -> Result<usize, RecoveryError> {
        if let Some((file, reason)) = snapshot
            .files
            .iter()
            .find_map(|f| self.reject_path(&f.path).map(|reason| (f, reason)))
        {
            tracing::warn!(
                event = "restore_path_rejected",
                backup_id = %snapshot.id,
                path = %file.path,
                reason,
                "restore refused"
            );
            return Err(RecoveryError::RestoreFailed {
                path: file.path.clone(),
                restored: 0,
                message: reason.to_string(),
            });
        }

        if let Some(bad) = snapshot.files.iter().find(|f| !checksum::verify(f)) {
            return Err(RecoveryError::ChecksumMismatch {
                backup_id: snapshot.id.clone(),
                path: bad.path.clone(),
            });
        }

        let mut restored = 0;
        let mut first_failure: Option<(String, StorageError)> = None;
        for file in &snapshot.files {
            match persist::write_atomic(&self.project_root.join(&file.path), file.content.as_bytes()) {
                Ok(()) => restored += 1,
                Err(e) => {
                    tracing::warn!(
                        event = "restore_file_failed",
                        backup_id = %snapshot.id,
                        path = %file.path,
                        error = %e,
                        "file restore failed"
                    );
                    first_failure.get_or_insert((file.path.clone(), e));
                }
            }
        }

        match first_failure {
            None => Ok(restored),
            Some((path, e)) => Err(RecoveryError::RestoreFailed {
                path,
                restored,
                message: e.to_string(),
            }),
        }
    }

    /// Why `rel` may not be written under the project root, if it may not.
    fn reject_path(&self, rel: &str) -> Option<&'static str> {
        let path = Path::new(rel);
        if path.is_absolute() || path.has_root() {
            return Some("path is absolute");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Some("path escapes the project root");
        }
        if !self.tracked_files.iter().any(|t| t == rel) {
            return Some("path is not a tracked file");
        }
        None
    }

    pub fn get(&self, id: &str) -> Option<&BackupSnapshot> {
        self.backups.iter().find(|b| b.id == id)
    }

    pub fn latest_good(&self) -> Option<&BackupSnapshot> {
        self.backups.iter().find(|b| b.metadata.build_success)
    }

    pub fn recent(&self, n: usize) -> Vec<BackupSnapshot> {
        self.backups.iter().take(n).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackupSnapshot> {
        self.backups.iter()
    }

    pub fn len(&self) -> usize {
        self.backups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backups.is_empty()
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    pub fn artifact_path(&self, backup_id: &str, rel: &str) -> PathBuf {
        self.backups_dir
            .join(format!("{backup_id}-{}", sanitize_path(rel)))
    }

    fn remove_artifacts(&self, snapshot: &BackupSnapshot) {
        for file in &snapshot.files {
            let artifact = self.artifact_path(&snapshot.id, &file.path);
            match fs::remove_file(&artifact) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    event = "backup_artifact_remove_failed",
                    path = %artifact.display(),
                    error = %e,
                    "evicted backup artifact not removed"
                ),
            }
        }
        tracing::debug!(event = "backup_evicted", backup_id = %snapshot.id, "backup evicted");
    }
}

/// Flatten a relative path into a single file name.
pub fn sanitize_path(rel: &str) -> String {
    rel.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}
