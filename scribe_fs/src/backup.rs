//! Pre-edit snapshot store.
//!
//! Every destructive edit is preceded by a byte-for-byte copy of the
//! target file into a centralized store that mirrors the file's location
//! relative to the backup root. Backups are written once and never read
//! back or deleted by the service; they exist for manual recovery.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Directory name the store lives under, inside the backup root.
const BACKUP_NAMESPACE: &str = ".scribe";
/// Subdirectory collecting files whose own location is outside the
/// backup root, where no mirrored relative path exists.
const EXTERNAL_DIR: &str = "external";

/// Errors produced while snapshotting a file.
#[derive(Debug)]
pub enum BackupError {
    /// Directory creation or copy failed
    Io(io::Error),
    /// Target has no parent directory or file name (e.g. a bare root)
    InvalidTarget(PathBuf),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Io(e) => write!(f, "backup failed: {}", e),
            BackupError::InvalidTarget(p) => {
                write!(f, "cannot back up '{}': not a regular file path", p.display())
            }
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BackupError {
    fn from(err: io::Error) -> Self {
        BackupError::Io(err)
    }
}

pub type BackupResult<T> = Result<T, BackupError>;

/// Snapshot `path` into the backup store, returning the snapshot path.
///
/// The copy lands at
/// `<backup_root>/.scribe/<dir relative to backup root>/<name>.backup.<millis>`.
/// Files outside the backup root are collected under `external/`
/// instead of mirroring a relative path that would escape the store.
/// Directory creation is idempotent; any failure aborts the enclosing
/// edit before the target file is touched.
pub fn create_backup(path: &Path, backup_root: &Path) -> BackupResult<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| BackupError::InvalidTarget(path.to_path_buf()))?;
    let parent = path
        .parent()
        .ok_or_else(|| BackupError::InvalidTarget(path.to_path_buf()))?;

    let store = backup_root.join(BACKUP_NAMESPACE);
    let backup_dir = match parent.strip_prefix(backup_root) {
        Ok(relative) => store.join(relative),
        Err(_) => store.join(EXTERNAL_DIR),
    };

    fs::create_dir_all(&backup_dir)?;

    let backup_path = backup_dir.join(format!("{}.backup.{}", file_name, timestamp_millis()));
    fs::copy(path, &backup_path)?;

    Ok(backup_path)
}

/// Milliseconds since the Unix epoch. A clock before the epoch degrades
/// to 0 rather than failing the backup.
fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
