//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use crate::error::{Result, fs as fs_error};

#[derive(Default, Clone)]
pub struct CopyOptions {
    /// Top-level entry names to skip
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn excluding(names: &[&str]) -> Self {
        Self {
            exclude: names.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Copy a directory recursively, overwriting files that already exist
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options
            .exclude
            .iter()
            .any(|excluded| file_name.to_str() == Some(excluded.as_str()))
        {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&entry_path, &dst_path, &CopyOptions::default())?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Copy `src` into `dst` when `src` exists, mapping failures to fpack errors
pub fn merge_dir_into(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Ok(());
    }
    copy_dir_recursive(src, dst, &CopyOptions::default()).map_err(|e| fs_error::write_failed(dst, e))
}

/// Whether a directory has no entries at all
pub fn is_dir_empty(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| fs_error::read_failed(dir, e))?;
    Ok(entries.next().is_none())
}

/// Remove every entry of `dir` except the top-level names in `keep`
pub fn clear_dir_except(dir: &Path, keep: &[&str]) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| fs_error::read_failed(dir, e))? {
        let entry = entry.map_err(|e| fs_error::read_failed(dir, e))?;
        let name = entry.file_name();
        if keep.iter().any(|k| name.to_str() == Some(k)) {
            continue;
        }

        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| fs_error::write_failed(&path, e))?;
    }

    Ok(())
}
