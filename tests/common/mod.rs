//! Common test utilities for fpack integration tests
//!
//! Feature packs are written as YAML files and deployed into a temporary
//! local repository as gzip-compressed tarballs, the way real feature packs
//! are shipped.

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub const GROUP: &str = "org.example";

/// Coordinate of a test feature pack
pub fn coordinate(artifact: &str, version: &str) -> String {
    format!("{GROUP}:{artifact}:tgz:{version}")
}

/// A repository plus an installation home in one temporary directory
pub struct TestEnv {
    /// Temporary directory
    pub temp: TempDir,
    /// Local repository root
    pub repo: PathBuf,
    /// Installation home
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let repo = temp.path().join("repo");
        let home = temp.path().join("home");
        Self { temp, repo, home }
    }

    /// `fpack` against this repository and home, isolated from the caller's
    /// environment
    pub fn fpack(&self) -> Command {
        self.fpack_in(&self.home)
    }

    /// `fpack` against this repository and another home
    pub fn fpack_in(&self, home: &Path) -> Command {
        let mut cmd = fpack_cmd();
        cmd.env_remove("FPACK_HOME")
            .env_remove("FPACK_REPOSITORY")
            .env_remove("RUST_LOG")
            .arg("--home")
            .arg(home)
            .arg("--repository")
            .arg(&self.repo);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn home_file(&self, path: &str) -> PathBuf {
        self.home.join(path)
    }

    pub fn read_home_file(&self, path: &str) -> String {
        fs::read_to_string(self.home_file(path)).expect("Failed to read file")
    }

    /// Parsed `.fpack/provisioned-state.json` of a home
    pub fn state_of(&self, home: &Path) -> serde_json::Value {
        let content = fs::read_to_string(home.join(".fpack/provisioned-state.json"))
            .expect("Failed to read provisioned state");
        serde_json::from_str(&content).expect("Failed to parse provisioned state")
    }

    /// Provisioned package names of one feature pack
    pub fn packages(&self, home: &Path, artifact: &str) -> Vec<String> {
        let state = self.state_of(home);
        let prefix = format!("{GROUP}:{artifact}:");
        state["feature-packs"]
            .as_array()
            .into_iter()
            .flatten()
            .filter(|fp| fp["coordinate"].as_str().is_some_and(|c| c.starts_with(&prefix)))
            .flat_map(|fp| fp["packages"].as_array().cloned().unwrap_or_default())
            .filter_map(|p| p["name"].as_str().map(str::to_string))
            .collect()
    }

    /// Sorted `(coordinate, package)` pairs of a home's provisioned state
    pub fn package_pairs(&self, home: &Path) -> Vec<(String, String)> {
        let state = self.state_of(home);
        let mut pairs: Vec<(String, String)> = state["feature-packs"]
            .as_array()
            .into_iter()
            .flatten()
            .flat_map(|fp| {
                let coordinate = fp["coordinate"].as_str().unwrap_or_default().to_string();
                fp["packages"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(move |p| {
                        p["name"]
                            .as_str()
                            .map(|name| (coordinate.clone(), name.to_string()))
                    })
            })
            .collect();
        pairs.sort();
        pairs
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn fpack_cmd() -> Command {
    Command::cargo_bin("fpack").expect("fpack binary")
}

/// A feature pack under construction
pub struct FeaturePack {
    artifact: String,
    version: String,
    dependencies: Vec<String>,
    default_packages: Vec<String>,
    packages: Vec<(String, String)>,
    files: Vec<(String, String, String)>,
}

impl FeaturePack {
    pub fn new(artifact: &str, version: &str) -> Self {
        Self {
            artifact: artifact.to_string(),
            version: version.to_string(),
            dependencies: Vec::new(),
            default_packages: Vec::new(),
            packages: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Depend on another test feature pack, excluding some of its packages
    pub fn dependency(mut self, name: &str, artifact: &str, version: &str, excluded: &[&str]) -> Self {
        let mut entry = format!(
            "  - name: {name}\n    config:\n      coordinate: {}\n",
            coordinate(artifact, version)
        );
        if !excluded.is_empty() {
            entry.push_str(&format!("      excluded: [{}]\n", excluded.join(", ")));
        }
        self.dependencies.push(entry);
        self
    }

    /// Add a default package; `body` is the package.yaml content after the name
    pub fn default_package(mut self, name: &str, body: &str) -> Self {
        self.default_packages.push(name.to_string());
        self.package(name, body)
    }

    /// Add a package that is not installed by default
    pub fn package(mut self, name: &str, body: &str) -> Self {
        self.packages.push((name.to_string(), body.to_string()));
        self
    }

    pub fn file(mut self, package: &str, path: &str, content: &str) -> Self {
        self.files
            .push((package.to_string(), path.to_string(), content.to_string()));
        self
    }

    pub fn coordinate(&self) -> String {
        coordinate(&self.artifact, &self.version)
    }

    /// Write the feature pack into `dir`
    pub fn write_to(&self, dir: &Path) {
        let mut spec = format!("coordinate: {}\n", self.coordinate());
        if !self.dependencies.is_empty() {
            spec.push_str("dependencies:\n");
            for dependency in &self.dependencies {
                spec.push_str(dependency);
            }
        }
        if !self.default_packages.is_empty() {
            spec.push_str(&format!("default-packages: [{}]\n", self.default_packages.join(", ")));
        }
        write(&dir.join("feature-pack.yaml"), &spec);

        for (name, body) in &self.packages {
            let package_dir = dir.join("packages").join(name);
            write(&package_dir.join("package.yaml"), &format!("name: {name}\n{body}"));
        }
        for (package, path, content) in &self.files {
            write(
                &dir.join("packages").join(package).join("content").join(path),
                content,
            );
        }
    }

    /// Deploy as a tarball into the test repository
    pub fn deploy(&self, env: &TestEnv) {
        let staging = env
            .temp
            .path()
            .join("staging")
            .join(format!("{}-{}", self.artifact, self.version));
        self.write_to(&staging);

        let target = env
            .repo
            .join(GROUP.replace('.', "/"))
            .join(&self.artifact)
            .join(&self.version)
            .join(format!("{}-{}.tgz", self.artifact, self.version));
        fs::create_dir_all(target.parent().expect("artifact dir")).expect("Failed to create artifact dir");

        let file = File::create(&target).expect("Failed to create tarball");
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        builder
            .append_dir_all(format!("{}-{}", self.artifact, self.version), &staging)
            .expect("Failed to append feature pack");
        builder
            .into_inner()
            .expect("Failed to finish tarball")
            .finish()
            .expect("Failed to finish gzip stream");
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}
