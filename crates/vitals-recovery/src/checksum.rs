//! BLAKE3 content digests for snapshot files.

use vitals_core::models::BackupFile;

/// Hex BLAKE3 digest of `content`.
pub fn digest(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// True when the stored checksum still matches the stored content.
pub fn verify(file: &BackupFile) -> bool {
    digest(&file.content) == file.checksum
}
