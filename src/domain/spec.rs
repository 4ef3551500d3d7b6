//! Declared content of feature packs and packages
//!
//! These types mirror `feature-pack.yaml` and `packages/<name>/package.yaml`
//! inside a feature pack. They carry no behavior beyond lookups and
//! structural validation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, FeaturePackConfig};
use crate::error::{Result, layout as layout_error};

/// A reference from one package to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDependency {
    pub name: String,

    /// Optional dependencies may be left out when the target is excluded
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl PackageDependency {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }
}

/// A parameter a package declares, with its default value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageParameter {
    pub name: String,
    pub default: String,
}

/// One named unit of installable content
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageSpec {
    pub name: String,

    /// Packages of the same feature pack
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PackageDependency>,

    /// Packages of other feature packs, keyed by the owning feature pack's
    /// dependency name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external: BTreeMap<String, Vec<PackageDependency>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<PackageParameter>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dependency(mut self, dependency: PackageDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    #[must_use]
    pub fn with_external(mut self, group: impl Into<String>, dependency: PackageDependency) -> Self {
        self.external.entry(group.into()).or_default().push(dependency);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.parameters.push(PackageParameter {
            name: name.into(),
            default: default.into(),
        });
        self
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Structural checks that need no knowledge of the owning feature pack
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(layout_error::spec_invalid(
                "package",
                "package name cannot be empty",
            ));
        }

        if self.dependencies.iter().any(|dep| dep.name == self.name) {
            return Err(layout_error::spec_invalid(
                &self.name,
                "package cannot depend on itself",
            ));
        }

        if self.external.keys().any(|group| group.trim().is_empty()) {
            return Err(layout_error::spec_invalid(
                &self.name,
                "external dependency group name cannot be empty",
            ));
        }

        let mut seen = BTreeSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(layout_error::spec_invalid(
                    &self.name,
                    format!("parameter '{}' is declared more than once", param.name),
                ));
            }
        }

        Ok(())
    }
}

/// A named dependency of one feature pack on another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePackDependencySpec {
    pub name: String,
    pub config: FeaturePackConfig,
}

/// Declared content of one feature pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeaturePackSpec {
    pub coordinate: Coordinate,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<FeaturePackDependencySpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_packages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Coordinate>,

    /// Loaded from the `packages/` directory, not from the spec file
    #[serde(skip)]
    pub packages: BTreeMap<String, PackageSpec>,
}

impl FeaturePackSpec {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            dependencies: Vec::new(),
            default_packages: Vec::new(),
            plugins: Vec::new(),
            packages: BTreeMap::new(),
        }
    }

    pub fn package(&self, name: &str) -> Option<&PackageSpec> {
        self.packages.get(name)
    }

    pub fn dependency(&self, name: &str) -> Option<&FeaturePackDependencySpec> {
        self.dependencies.iter().find(|dep| dep.name == name)
    }

    pub fn add_package(&mut self, package: PackageSpec) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Check that every name the spec uses resolves inside it
    ///
    /// External groups must name a declared feature-pack dependency and
    /// default packages must exist. Dependency targets are left to the
    /// resolver, which reports them as missing packages.
    pub fn validate(&self) -> Result<()> {
        let owner = &self.coordinate;

        let mut dependency_names = BTreeSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(layout_error::spec_invalid(
                    owner,
                    "feature-pack dependency name cannot be empty",
                ));
            }
            if !dependency_names.insert(dep.name.as_str()) {
                return Err(layout_error::spec_invalid(
                    owner,
                    format!("feature-pack dependency '{}' is declared more than once", dep.name),
                ));
            }
            if dep.config.ga() == owner.ga() {
                return Err(layout_error::spec_invalid(
                    owner,
                    format!("feature-pack dependency '{}' points at itself", dep.name),
                ));
            }
        }

        for name in &self.default_packages {
            if !self.packages.contains_key(name) {
                return Err(layout_error::spec_invalid(
                    owner,
                    format!("default package '{name}' does not exist"),
                ));
            }
        }

        for (key, package) in &self.packages {
            package.validate()?;
            if key != &package.name {
                return Err(layout_error::spec_invalid(
                    owner,
                    format!("package directory '{key}' declares name '{}'", package.name),
                ));
            }
            for group in package.external.keys() {
                if !dependency_names.contains(group.as_str()) {
                    return Err(layout_error::spec_invalid(
                        owner,
                        format!(
                            "package '{}' uses unknown feature-pack dependency '{group}'",
                            package.name
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}
