//! Atomic file persistence.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = ".tmp";

/// Write `bytes` to `path` atomically.
///
/// Content goes to a sibling temp file first and is renamed over the
/// target, so an interrupted write leaves either the old content or the
/// new content on disk, never a truncated mix. Unix permissions of an
/// existing target survive the swap. Returns the number of bytes
/// written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<u64> {
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    if path.exists() {
        if let Err(e) = preserve_permissions(path, &temp_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        e
    })?;

    Ok(bytes.len() as u64)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp = path.to_path_buf();
    let name = temp.file_name().and_then(|n| n.to_str()).unwrap_or("file");
    temp.set_file_name(format!("{}{}", name, TEMP_SUFFIX));
    temp
}

/// Copy permissions from source to target.
#[cfg(unix)]
fn preserve_permissions(source: &Path, target: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    fs::set_permissions(target, metadata.permissions())
}

#[cfg(not(unix))]
fn preserve_permissions(_source: &Path, _target: &Path) -> io::Result<()> {
    Ok(())
}
