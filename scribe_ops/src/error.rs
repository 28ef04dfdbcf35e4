use std::fmt;
use std::io;
use std::path::PathBuf;

use scribe_edit::EditError;
use scribe_fs::{BackupError, PathError};

/// Failures an operation can report across the service boundary.
///
/// All of these are recoverable at the operation boundary; none crash
/// the process. Encoding loss is deliberately absent: corruption found
/// during verification is reported as data, not as an error.
#[derive(Debug)]
pub enum OpError {
    /// Path rejected by the resolver
    Path(PathError),
    /// Target file does not exist
    NotFound(PathBuf),
    /// Line range rejected by the edit engine
    Range(EditError),
    /// Pre-edit backup failed; the edit did not run
    Backup(BackupError),
    /// Underlying read/write/rename failure
    Io(io::Error),
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpError::Path(e) => write!(f, "{}", e),
            OpError::NotFound(p) => write!(f, "file not found: {}", p.display()),
            OpError::Range(e) => write!(f, "invalid line range: {}", e),
            OpError::Backup(e) => write!(f, "{}", e),
            OpError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for OpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpError::Path(e) => Some(e),
            OpError::Range(e) => Some(e),
            OpError::Backup(e) => Some(e),
            OpError::Io(e) => Some(e),
            OpError::NotFound(_) => None,
        }
    }
}

impl From<PathError> for OpError {
    fn from(err: PathError) -> Self {
        OpError::Path(err)
    }
}

impl From<EditError> for OpError {
    fn from(err: EditError) -> Self {
        OpError::Range(err)
    }
}

impl From<BackupError> for OpError {
    fn from(err: BackupError) -> Self {
        OpError::Backup(err)
    }
}

impl From<io::Error> for OpError {
    fn from(err: io::Error) -> Self {
        OpError::Io(err)
    }
}

pub type OpResult<T> = Result<T, OpError>;
