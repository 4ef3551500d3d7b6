//! Feature-pack archive unpacking
//!
//! A feature pack arrives either as a directory (used as-is) or as a
//! gzip-compressed tarball. Tarballs may wrap their content in a single
//! top-level directory; it is stripped so the spec file always ends up at the
//! root of the target directory.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::config::feature_pack::SPEC_FILE;
use crate::error::{FpackError, Result, fs as fs_error, layout as layout_error};

/// Unpack the feature pack at `source` into `target`
///
/// `target` must not exist yet.
pub fn unpack(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        return copy_dir_recursive(source, target, &CopyOptions::default())
            .map_err(|e| fs_error::write_failed(target, e));
    }

    let staging = staging_dir(target);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| fs_error::write_failed(&staging, e))?;
    }
    fs::create_dir_all(&staging).map_err(|e| fs_error::write_failed(&staging, e))?;

    if let Err(err) = unpack_tarball(source, &staging) {
        // Best effort, the unpack error is what matters
        let _ = fs::remove_dir_all(&staging);
        return Err(err);
    }

    let root = content_root(&staging)?;
    fs::rename(&root, target).map_err(|e| fs_error::write_failed(target, e))?;
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| fs_error::write_failed(&staging, e))?;
    }
    Ok(())
}

fn staging_dir(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".unpack");
    target.with_file_name(name)
}

fn unpack_tarball(source: &Path, staging: &Path) -> Result<()> {
    let display = source.display().to_string();
    let file = File::open(source).map_err(|e| fs_error::read_failed(source, e))?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let entries = archive
        .entries()
        .map_err(|e| layout_error::unpack_failed(&display, e))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| layout_error::unpack_failed(&display, e))?;
        let relative = entry
            .path()
            .map_err(|e| layout_error::unpack_failed(&display, e))?
            .into_owned();

        if !is_safe_relative(&relative) {
            return Err(escapes(&display, &relative));
        }

        // Links may only point at siblings or below
        if matches!(
            entry.header().entry_type(),
            EntryType::Symlink | EntryType::Link
        ) {
            let target = entry
                .link_name()
                .map_err(|e| layout_error::unpack_failed(&display, e))?;
            if target.is_some_and(|target| !is_safe_relative(&target)) {
                return Err(escapes(&display, &relative));
            }
        }

        let unpacked = entry
            .unpack_in(staging)
            .map_err(|e| layout_error::unpack_failed(&display, e))?;
        if !unpacked {
            return Err(escapes(&display, &relative));
        }
    }

    Ok(())
}

fn escapes(archive: &str, entry: &Path) -> FpackError {
    layout_error::unpack_failed(
        archive,
        format!("entry '{}' escapes the target directory", entry.display()),
    )
}

fn is_safe_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// The directory holding the spec file: the staging root itself, or its
/// single top-level directory
fn content_root(staging: &Path) -> Result<PathBuf> {
    if staging.join(SPEC_FILE).is_file() {
        return Ok(staging.to_path_buf());
    }

    let entries: Vec<PathBuf> = fs::read_dir(staging)
        .map_err(|e| fs_error::read_failed(staging, e))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .collect();

    match entries.as_slice() {
        [only] if only.is_dir() && only.join(SPEC_FILE).is_file() => Ok(only.clone()),
        _ => Err(layout_error::unpack_failed(
            staging.display().to_string(),
            format!("archive has no {SPEC_FILE}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::write_tarball;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tar::{Builder, Header};
    use tempfile::TempDir;

    fn feature_pack_dir(root: &Path) -> PathBuf {
        let dir = root.join("fp");
        fs::create_dir_all(dir.join("packages/main/content")).unwrap();
        fs::write(dir.join(SPEC_FILE), "coordinate: g:a:1.0\n").unwrap();
        fs::write(dir.join("packages/main/content/file.txt"), "hello").unwrap();
        dir
    }

    #[test]
    fn test_unpack_directory() {
        let temp = TempDir::new().unwrap();
        let source = feature_pack_dir(temp.path());
        let target = temp.path().join("out");

        unpack(&source, &target).unwrap();

        assert!(target.join(SPEC_FILE).is_file());
        assert_eq!(
            fs::read_to_string(target.join("packages/main/content/file.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_unpack_flat_tarball() {
        let temp = TempDir::new().unwrap();
        let source = feature_pack_dir(temp.path());
        let tarball = temp.path().join("fp.tgz");
        write_tarball(&source, &tarball, None);

        let target = temp.path().join("out");
        unpack(&tarball, &target).unwrap();

        assert!(target.join(SPEC_FILE).is_file());
        assert!(target.join("packages/main/content/file.txt").is_file());
        assert!(!temp.path().join("out.unpack").exists());
    }

    #[test]
    fn test_unpack_strips_single_top_level_dir() {
        let temp = TempDir::new().unwrap();
        let source = feature_pack_dir(temp.path());
        let tarball = temp.path().join("fp.tgz");
        write_tarball(&source, &tarball, Some("a-1.0"));

        let target = temp.path().join("out");
        unpack(&tarball, &target).unwrap();

        assert!(target.join(SPEC_FILE).is_file());
        assert!(!target.join("a-1.0").exists());
    }

    #[test]
    fn test_unpack_without_spec_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("empty");
        fs::create_dir_all(source.join("stuff")).unwrap();
        fs::write(source.join("stuff/x"), "x").unwrap();
        let tarball = temp.path().join("bad.tgz");
        write_tarball(&source, &tarball, None);

        let err = unpack(&tarball, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, FpackError::ArchiveUnpackFailed { .. }));
    }

    #[test]
    fn test_unpack_corrupt_archive_fails() {
        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("corrupt.tgz");
        fs::write(&tarball, b"definitely not gzip").unwrap();

        let err = unpack(&tarball, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, FpackError::ArchiveUnpackFailed { .. }));
    }

    #[test]
    fn test_unsafe_paths_detected() {
        assert!(is_safe_relative(Path::new("packages/a/content/x")));
        assert!(!is_safe_relative(Path::new("../escape")));
        assert!(!is_safe_relative(Path::new("/etc/passwd")));
    }

    fn spec_header(size: usize) -> Header {
        let mut header = Header::new_gnu();
        header.set_size(size as u64);
        header.set_mode(0o644);
        header
    }

    fn symlink(path: &str, target: &Path) -> Header {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
        header.set_mode(0o777);
        header.set_path(path).unwrap();
        header.set_link_name(target).unwrap();
        header.set_cksum();
        header
    }

    /// A tarball with a spec file followed by `extra` entries
    fn tarball_with(path: &Path, extra: impl FnOnce(&mut Builder<GzEncoder<File>>)) {
        let file = File::create(path).unwrap();
        let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
        let spec = b"coordinate: g:a:1.0\n";
        let mut header = spec_header(spec.len());
        builder
            .append_data(&mut header, SPEC_FILE, &spec[..])
            .unwrap();
        extra(&mut builder);
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_unpack_rejects_symlink_out_of_target() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir_all(&outside).unwrap();

        let tarball = temp.path().join("evil.tgz");
        tarball_with(&tarball, |builder| {
            builder.append(&symlink("link", &outside), std::io::empty()).unwrap();

            let content = b"escaped";
            let mut header = spec_header(content.len());
            builder
                .append_data(&mut header, "link/escaped.txt", &content[..])
                .unwrap();
        });

        let err = unpack(&tarball, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, FpackError::ArchiveUnpackFailed { .. }));
        assert!(!outside.join("escaped.txt").exists());
        assert!(!temp.path().join("out").exists());
        assert!(!temp.path().join("out.unpack").exists());
    }

    #[test]
    fn test_unpack_rejects_parent_dir_entry() {
        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("evil.tgz");
        tarball_with(&tarball, |builder| {
            let content = b"escaped";
            let mut header = spec_header(content.len());
            let name = b"../escaped.txt";
            header.as_gnu_mut().unwrap().name[..name.len()].copy_from_slice(name);
            header.set_cksum();
            builder.append(&header, &content[..]).unwrap();
        });

        let err = unpack(&tarball, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, FpackError::ArchiveUnpackFailed { .. }));
        assert!(err.to_string().contains("escapes the target directory"));
        assert!(!temp.path().join("escaped.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_keeps_relative_symlink() {
        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("links.tgz");
        tarball_with(&tarball, |builder| {
            let content = b"lib";
            let mut header = spec_header(content.len());
            builder
                .append_data(&mut header, "lib/libx.so.1", &content[..])
                .unwrap();

            builder
                .append(&symlink("lib/libx.so", Path::new("libx.so.1")), std::io::empty())
                .unwrap();
        });

        let target = temp.path().join("out");
        unpack(&tarball, &target).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("lib/libx.so")).unwrap(),
            "lib"
        );
    }
}
