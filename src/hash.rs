//! BLAKE3 hashing of installation trees

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| fs_error::read_failed(path, e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| fs_error::read_failed(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Hash every file under `root`, keyed by `/`-separated relative path
///
/// Top-level entries named in `skip` are left out with everything below
/// them.
pub fn hash_tree(root: &Path, skip: &[&str]) -> Result<BTreeMap<String, String>> {
    let mut hashes = BTreeMap::new();
    if !root.is_dir() {
        return Ok(hashes);
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() != 1 || !skip.iter().any(|name| entry.file_name() == *name)
    });

    for entry in walker {
        let entry = entry.map_err(|e| fs_error::read_failed(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        hashes.insert(relative, hash_file(entry.path())?);
    }

    Ok(hashes)
}
