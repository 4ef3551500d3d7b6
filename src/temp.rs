//! Work directories for provisioning operations
//!
//! Temp dirs are never created under the current working directory (e.g. when
//! TMPDIR=tmp or TMPDIR=./tmp), and every operation gets its own randomly
//! named directory that is removed when the returned [`TempDir`] drops.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{Result, fs as fs_error};

/// Prefix of work directory names
pub const WORK_DIR_PREFIX: &str = "fpack-";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create a private work directory for one operation
pub fn work_dir() -> Result<TempDir> {
    let base = temp_dir_base();
    tempfile::Builder::new()
        .prefix(WORK_DIR_PREFIX)
        .tempdir_in(&base)
        .map_err(|e| fs_error::write_failed(&base, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_work_dirs_are_unique_and_removed() {
        let first = work_dir().unwrap();
        let second = work_dir().unwrap();
        assert_ne!(first.path(), second.path());

        let name = first.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(WORK_DIR_PREFIX));

        let path = first.path().to_path_buf();
        drop(first);
        assert!(!path.exists());
    }
}
