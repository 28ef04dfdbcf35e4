//! # scribe_fs - Filesystem utilities for the scribe editing service
//!
//! Encoding-safe persistence for Windows-1252 files edited through a
//! UTF-8 boundary.
//!
//! Modules:
//! - `codec` for UTF-8 <-> Windows-1252 conversion and corruption scans
//! - `resolve` for absolute-path validation and sandbox enforcement
//! - `write` for atomic temp-file-and-rename persistence
//! - `backup` for the pre-edit snapshot store

mod backup;
mod codec;
mod resolve;
mod write;

pub use backup::{BackupError, BackupResult, create_backup};
pub use codec::{
    CORRUPTION_MARKER, ENCODING_NAME, FALLBACK_BYTE, Verification, count_corruption_markers,
    decode, encode, verify_file,
};
pub use resolve::{PathError, PathResult, resolve_path};
pub use write::write_atomic;
