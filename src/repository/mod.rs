//! Artifact resolution
//!
//! The layout builder never looks for feature packs itself; it asks an
//! [`ArtifactResolver`] to turn a coordinate into a local file or directory.
//! [`LocalRepository`] resolves coordinates against a Maven-style directory
//! tree:
//!
//! ```text
//! <root>/org/example/base/1.0.0/base-1.0.0.tgz
//!        ^^^^^^^^^^^ ^^^^ ^^^^^ ^^^^^^^^^^^^^^
//!        group       art. vers. artifact-version[-classifier].extension
//! ```

use std::path::{Path, PathBuf};

use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::domain::Coordinate;
use crate::error::{Result, config as config_error, fs as fs_error, layout as layout_error};

/// Environment variable overriding the default repository location
pub const REPOSITORY_ENV: &str = "FPACK_REPOSITORY";

/// Repository directory under the user's home
const DEFAULT_REPOSITORY_DIR: &str = ".fpack/repository";

/// Turns a coordinate into a local path
pub trait ArtifactResolver {
    /// # Errors
    ///
    /// Returns [`crate::error::FpackError::ArtifactNotFound`] when the
    /// coordinate cannot be resolved.
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf>;
}

/// A repository on the local file system
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository at `$FPACK_REPOSITORY`, or `~/.fpack/repository`
    pub fn default_root() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(REPOSITORY_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| config_error::invalid("Could not determine home directory"))?;
        Ok(home.join(DEFAULT_REPOSITORY_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the artifact for `coordinate` lives, whether or not it exists
    pub fn artifact_path(&self, coordinate: &Coordinate) -> PathBuf {
        let mut path = self.root.clone();
        for segment in coordinate.group.split('.') {
            path.push(segment);
        }

        let mut file_name = format!("{}-{}", coordinate.artifact, coordinate.version);
        if !coordinate.classifier.is_empty() {
            file_name.push('-');
            file_name.push_str(&coordinate.classifier);
        }
        file_name.push('.');
        file_name.push_str(&coordinate.extension);

        path.join(&coordinate.artifact)
            .join(&coordinate.version)
            .join(file_name)
    }

    /// Deploy an archive or a feature-pack directory under `coordinate`
    pub fn deploy(&self, coordinate: &Coordinate, source: &Path) -> Result<PathBuf> {
        let target = self.artifact_path(coordinate);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, e))?;
        }

        if source.is_dir() {
            copy_dir_recursive(source, &target, &CopyOptions::default())
                .map_err(|e| fs_error::write_failed(&target, e))?;
        } else {
            std::fs::copy(source, &target).map_err(|e| fs_error::write_failed(&target, e))?;
        }

        Ok(target)
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let path = self.artifact_path(coordinate);
        if path.exists() {
            Ok(path)
        } else {
            Err(layout_error::artifact_not_found(
                coordinate,
                path.display().to_string(),
            ))
        }
    }
}
