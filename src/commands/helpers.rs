//! Command helper utilities

use std::path::PathBuf;

use console::Style;

use crate::error::{Result, fs as fs_error};
use crate::home::InstallationHome;
use crate::installer::InstallSummary;
use crate::repository::LocalRepository;

/// Resolve the installation home from the optional argument
///
/// If a home is provided, use it. Otherwise, use the current directory.
pub fn resolve_home_path(home: Option<PathBuf>) -> Result<PathBuf> {
    match home {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| fs_error::io_error(format!("Failed to get current directory: {e}"))),
    }
}

pub fn open_home(home: Option<PathBuf>) -> Result<InstallationHome> {
    InstallationHome::open(&resolve_home_path(home)?)
}

/// Repository from the argument, or the default location
pub fn open_repository(repository: Option<PathBuf>) -> Result<LocalRepository> {
    let root = match repository {
        Some(path) => path,
        None => LocalRepository::default_root()?,
    };
    Ok(LocalRepository::new(root))
}

pub fn print_summary(action: &str, summary: &InstallSummary) {
    let done = Style::new().green().bold();
    println!(
        "{} {} feature pack(s), {} package(s), {} file(s)",
        done.apply_to(action),
        summary.feature_packs,
        summary.packages,
        summary.files
    );
}
