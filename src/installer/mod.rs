//! Package content installation
//!
//! Materializes a provisioned state into a target directory. Installation
//! is a full re-provision: the target is emptied (except for the record
//! directory) and every provisioned package's `content/` tree is copied in,
//! feature packs in dependency order and packages in resolution order, so
//! later packages overwrite files of earlier ones.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::common::fs::{CopyOptions, clear_dir_except, copy_dir_recursive};
use crate::config::feature_pack::package_content_dir;
use crate::domain::ProvisionedState;
use crate::error::{Result, fs as fs_error};
use crate::home::RECORD_DIR;
use crate::layout::LayoutDescription;
use crate::progress::ProgressDisplay;

/// What an installation wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub feature_packs: usize,
    pub packages: usize,
    pub files: usize,
}

/// Install the content of `state` into `target`
pub fn install(
    layout: &LayoutDescription,
    state: &ProvisionedState,
    target: &Path,
    progress: &ProgressDisplay,
) -> Result<InstallSummary> {
    fs::create_dir_all(target).map_err(|e| fs_error::write_failed(target, e))?;
    clear_dir_except(target, &[RECORD_DIR])?;

    let mut summary = InstallSummary::default();
    for feature_pack in &state.feature_packs {
        let ga = feature_pack.coordinate.ga();
        let Some(dir) = layout.dir(&ga) else {
            return Err(fs_error::io_error(format!(
                "feature pack {} is not part of the layout",
                feature_pack.coordinate
            )));
        };

        for package in &feature_pack.packages {
            progress.update_package(&feature_pack.coordinate.to_string(), &package.name);

            let content = package_content_dir(dir, &package.name);
            let files = install_content(&content, target)?;
            debug!(
                feature_pack = %feature_pack.coordinate,
                package = %package.name,
                files,
                "Installed package"
            );

            summary.files += files;
            summary.packages += 1;
            progress.inc_package();
        }
        summary.feature_packs += 1;
    }

    Ok(summary)
}

/// Copy one package's content tree, returning the number of files copied
fn install_content(content: &Path, target: &Path) -> Result<usize> {
    if !content.is_dir() {
        return Ok(0);
    }

    let files = WalkDir::new(content)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count();

    copy_dir_recursive(content, target, &CopyOptions::default())
        .map_err(|e| fs_error::write_failed(target, e))?;

    Ok(files)
}
