//! Test fixtures for building feature packs
//!
//! Tests describe a feature pack with [`FeaturePackBuilder`] and deploy it
//! into a [`LocalRepository`]. Coordinates with a `tgz` extension are
//! deployed as gzip-compressed tarballs, anything else as a plain directory.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::FeaturePackBuilder;
//!
//! let repo = LocalRepository::new(temp.path().join("repo"));
//! FeaturePackBuilder::new(coordinate)
//!     .default_package(PackageSpec::new("main"))
//!     .file("main", "bin/run.sh", "#!/bin/sh\n")
//!     .deploy(&repo);
//! ```

#![allow(clippy::expect_used)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::feature_pack::{self, RESOURCES_DIR};
use crate::domain::{Coordinate, FeaturePackConfig, FeaturePackDependencySpec, FeaturePackSpec, PackageSpec};
use crate::repository::LocalRepository;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Builder for feature packs used in tests
#[derive(Debug, Clone)]
pub struct FeaturePackBuilder {
    spec: FeaturePackSpec,
    files: Vec<(PathBuf, String)>,
}

impl FeaturePackBuilder {
    pub fn new(coordinate: Coordinate) -> Self {
        Self::from_spec(FeaturePackSpec::new(coordinate))
    }

    /// Start from a ready-made spec, which is written as-is
    pub fn from_spec(spec: FeaturePackSpec) -> Self {
        Self {
            spec,
            files: Vec::new(),
        }
    }

    /// Add a package that is part of the defaults
    #[must_use]
    pub fn default_package(mut self, package: PackageSpec) -> Self {
        self.spec.default_packages.push(package.name.clone());
        self.spec.add_package(package);
        self
    }

    /// Add a package that is only installed on request or as a dependency
    #[must_use]
    pub fn package(mut self, package: PackageSpec) -> Self {
        self.spec.add_package(package);
        self
    }

    #[must_use]
    pub fn dependency(mut self, name: &str, config: FeaturePackConfig) -> Self {
        self.spec.dependencies.push(FeaturePackDependencySpec {
            name: name.to_string(),
            config,
        });
        self
    }

    #[must_use]
    pub fn plugin(mut self, coordinate: Coordinate) -> Self {
        self.spec.plugins.push(coordinate);
        self
    }

    /// Add a content file to a package
    #[must_use]
    pub fn file(mut self, package: &str, path: &str, content: &str) -> Self {
        let relative = Path::new(feature_pack::PACKAGES_DIR)
            .join(package)
            .join(feature_pack::CONTENT_DIR)
            .join(path);
        self.files.push((relative, content.to_string()));
        self
    }

    /// Add a shared resource file
    #[must_use]
    pub fn resource(mut self, path: &str, content: &str) -> Self {
        self.files
            .push((Path::new(RESOURCES_DIR).join(path), content.to_string()));
        self
    }

    /// Write the feature pack into `dir`
    ///
    /// # Panics
    ///
    /// Panics if any file cannot be written.
    pub fn write_to(&self, dir: &Path) {
        feature_pack::write_spec(dir, &self.spec).expect("Failed to write spec");
        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            fs::write(&path, content).expect("Failed to write file");
        }
    }

    /// Deploy under the spec's own coordinate
    pub fn deploy(&self, repo: &LocalRepository) -> PathBuf {
        self.deploy_as(repo, &self.spec.coordinate)
    }

    /// Deploy under `coordinate`, whatever the spec says
    ///
    /// # Panics
    ///
    /// Panics if the feature pack cannot be deployed.
    pub fn deploy_as(&self, repo: &LocalRepository, coordinate: &Coordinate) -> PathBuf {
        let staging = create_temp_dir();
        let dir = staging.path().join("fp");
        self.write_to(&dir);

        if coordinate.extension == "tgz" {
            let tarball = staging.path().join("fp.tgz");
            write_tarball(&dir, &tarball, None);
            repo.deploy(coordinate, &tarball)
                .expect("Failed to deploy tarball")
        } else {
            repo.deploy(coordinate, &dir)
                .expect("Failed to deploy directory")
        }
    }
}

/// Write the files under `source` into a gzip-compressed tarball
///
/// Entries are named relative to `source`, under `prefix` when given.
///
/// # Panics
///
/// Panics if the tarball cannot be written.
pub fn write_tarball(source: &Path, tarball: &Path, prefix: Option<&str>) {
    let file = File::create(tarball).expect("Failed to create tarball");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.expect("Failed to walk source");
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("Entry outside source");
        let name = match prefix {
            Some(prefix) => Path::new(prefix).join(relative),
            None => relative.to_path_buf(),
        };
        builder
            .append_path_with_name(entry.path(), name)
            .expect("Failed to append file");
    }

    builder
        .into_inner()
        .expect("Failed to finish tarball")
        .finish()
        .expect("Failed to finish gzip stream");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ArtifactResolver;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().is_absolute());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_deploy_directory() {
        let temp = create_temp_dir();
        let repo = LocalRepository::new(temp.path());
        let coord = Coordinate::new("g", "a", "1.0");
        FeaturePackBuilder::new(coord.clone())
            .default_package(PackageSpec::new("main"))
            .file("main", "a.txt", "a")
            .deploy(&repo);

        let path = repo.resolve(&coord).unwrap();
        assert!(path.is_dir());
        assert!(path.join("packages/main/content/a.txt").is_file());
        let spec = feature_pack::load_spec(&path).unwrap();
        assert_eq!(spec.default_packages, vec!["main".to_string()]);
    }

    #[test]
    fn test_deploy_tarball() {
        let temp = create_temp_dir();
        let repo = LocalRepository::new(temp.path());
        let coord = Coordinate::new("g", "a", "1.0").with_extension("tgz");
        FeaturePackBuilder::new(coord.clone()).deploy(&repo);

        let path = repo.resolve(&coord).unwrap();
        assert!(path.is_file());
        assert_eq!(path.extension().unwrap(), "tgz");
    }
}
