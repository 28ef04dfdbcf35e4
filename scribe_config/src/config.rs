use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable confining path resolution to a directory tree.
pub const SANDBOX_ROOT_VAR: &str = "SCRIBE_SANDBOX_ROOT";
/// Environment variable naming the directory the backup store lives under.
pub const BACKUP_ROOT_VAR: &str = "SCRIBE_BACKUP_ROOT";

/// Immutable runtime configuration for the editing service.
///
/// Built once at process start from the environment and passed by
/// reference into the path resolver, backup manager and operation
/// handlers. Nothing re-reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory outside of which path resolution is refused.
    /// `None` means unrestricted.
    pub sandbox_root: Option<PathBuf>,
    /// Directory the backup store lives under.
    pub backup_root: PathBuf,
}

impl Config {
    /// Read `SCRIBE_SANDBOX_ROOT` and `SCRIBE_BACKUP_ROOT` from the
    /// process environment.
    ///
    /// An unset sandbox root means no restriction; an unset backup root
    /// falls back to the working directory. Relative overrides are
    /// resolved against the working directory.
    pub fn from_env() -> ConfigResult<Self> {
        let cwd = env::current_dir()?;

        let sandbox_root = match env::var_os(SANDBOX_ROOT_VAR) {
            Some(raw) if raw.is_empty() => {
                return Err(ConfigError::Env(format!("{} is set but empty", SANDBOX_ROOT_VAR)));
            }
            Some(raw) => Some(absolutize(Path::new(&raw), &cwd)),
            None => None,
        };

        let backup_root = match env::var_os(BACKUP_ROOT_VAR) {
            Some(raw) if raw.is_empty() => {
                return Err(ConfigError::Env(format!("{} is set but empty", BACKUP_ROOT_VAR)));
            }
            Some(raw) => absolutize(Path::new(&raw), &cwd),
            None => cwd,
        };

        Ok(Self { sandbox_root, backup_root })
    }

    /// Configuration with explicit roots, for embedders and tests.
    pub fn with_roots(sandbox_root: Option<PathBuf>, backup_root: PathBuf) -> Self {
        Self { sandbox_root, backup_root }
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
