//! Feature-pack spec files
//!
//! An unpacked feature pack looks like this:
//!
//! ```text
//! feature-pack.yaml
//! packages/<name>/package.yaml
//! packages/<name>/content/...
//! resources/...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{FeaturePackSpec, PackageSpec};
use crate::error::{Result, fs as fs_error, layout as layout_error};

/// Feature-pack spec file name
pub const SPEC_FILE: &str = "feature-pack.yaml";

/// Directory holding one subdirectory per package
pub const PACKAGES_DIR: &str = "packages";

/// Package descriptor file name
pub const PACKAGE_FILE: &str = "package.yaml";

/// Package subdirectory copied into the installation root
pub const CONTENT_DIR: &str = "content";

/// Shared resources merged across the dependency graph
pub const RESOURCES_DIR: &str = "resources";

/// Content directory of one package inside an unpacked feature pack
pub fn package_content_dir(feature_pack_dir: &Path, package: &str) -> PathBuf {
    feature_pack_dir
        .join(PACKAGES_DIR)
        .join(package)
        .join(CONTENT_DIR)
}

/// Load and validate the spec of an unpacked feature pack
pub fn load_spec(dir: &Path) -> Result<FeaturePackSpec> {
    let spec_path = dir.join(SPEC_FILE);
    let mut spec: FeaturePackSpec = read_yaml(&spec_path)?;

    let packages_dir = dir.join(PACKAGES_DIR);
    if packages_dir.is_dir() {
        let mut package_dirs: Vec<PathBuf> = fs::read_dir(&packages_dir)
            .map_err(|e| fs_error::read_failed(&packages_dir, e))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        package_dirs.sort();

        for package_dir in package_dirs {
            let package: PackageSpec = read_yaml(&package_dir.join(PACKAGE_FILE))?;
            let dir_name = package_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            spec.packages.insert(dir_name, package);
        }
    }

    spec.validate()?;
    Ok(spec)
}

/// Write a spec and its package descriptors into `dir`
pub fn write_spec(dir: &Path, spec: &FeaturePackSpec) -> Result<()> {
    write_yaml(&dir.join(SPEC_FILE), spec)?;
    for package in spec.packages.values() {
        let package_dir = dir.join(PACKAGES_DIR).join(&package.name);
        write_yaml(&package_dir.join(PACKAGE_FILE), package)?;
    }
    Ok(())
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Err(layout_error::spec_parse_failed(
            path.display().to_string(),
            "file is missing",
        ));
    }
    let content = fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| layout_error::spec_parse_failed(path.display().to_string(), e))
}

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, e))?;
    }
    let yaml = serde_yaml::to_string(value)?;
    fs::write(path, yaml).map_err(|e| fs_error::write_failed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, FeaturePackConfig, FeaturePackDependencySpec, PackageDependency};
    use crate::error::FpackError;
    use tempfile::TempDir;

    #[test]
    fn test_load_spec_reads_packages() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SPEC_FILE),
            r#"
coordinate: org.example:base:tgz:1.0.0
dependencies:
  - name: core
    config:
      coordinate: org.example:core:tgz:1.0.0
      excluded: [docs]
default-packages: [main]
plugins: [org.example:cli-plugin:1.0.0]
"#,
        )
        .unwrap();
        let main = temp.path().join("packages/main");
        fs::create_dir_all(&main).unwrap();
        fs::write(
            main.join(PACKAGE_FILE),
            "name: main\nexternal:\n  core:\n    - name: runtime\n",
        )
        .unwrap();

        let spec = load_spec(temp.path()).unwrap();

        assert_eq!(spec.coordinate.to_string(), "org.example:base:tgz:1.0.0");
        assert_eq!(spec.default_packages, vec!["main".to_string()]);
        assert_eq!(spec.plugins.len(), 1);
        assert!(spec.dependency("core").unwrap().config.is_excluded("docs"));
        assert_eq!(spec.package("main").unwrap().external["core"][0].name, "runtime");
    }

    #[test]
    fn test_missing_spec_file() {
        let temp = TempDir::new().unwrap();
        let err = load_spec(temp.path()).unwrap_err();
        assert!(matches!(err, FpackError::SpecParseFailed { .. }));
    }

    #[test]
    fn test_malformed_spec_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SPEC_FILE), "coordinate: [not, a, string]\n").unwrap();
        let err = load_spec(temp.path()).unwrap_err();
        assert!(matches!(err, FpackError::SpecParseFailed { .. }));
    }

    #[test]
    fn test_package_name_must_match_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SPEC_FILE), "coordinate: g:a:1.0\n").unwrap();
        let dir = temp.path().join("packages/main");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PACKAGE_FILE), "name: other\n").unwrap();

        let err = load_spec(temp.path()).unwrap_err();
        assert!(matches!(err, FpackError::SpecInvalid { .. }));
    }

    #[test]
    fn test_write_then_load() {
        let temp = TempDir::new().unwrap();
        let mut spec = FeaturePackSpec::new(Coordinate::new("g", "a", "1.0"));
        spec.dependencies.push(FeaturePackDependencySpec {
            name: "dep".to_string(),
            config: FeaturePackConfig::new(Coordinate::new("g", "b", "1.0")),
        });
        spec.default_packages.push("p".to_string());
        spec.add_package(
            PackageSpec::new("p")
                .with_dependency(PackageDependency::optional("q"))
                .with_parameter("port", "1"),
        );
        spec.add_package(PackageSpec::new("q"));

        write_spec(temp.path(), &spec).unwrap();
        let loaded = load_spec(temp.path()).unwrap();

        assert_eq!(loaded, spec);
    }
}
