//! Requests to include feature packs
//!
//! A [`FeaturePackConfig`] says which packages of one feature pack should be
//! provisioned: the declared defaults (when `inherit` is set), plus
//! explicit inclusions, minus explicit exclusions. Inclusions and exclusions
//! are never both present on the same config; the builder enforces this.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Ga};
use crate::error::{FpackError, Result, config as config_error};

fn default_inherit() -> bool {
    true
}

/// A request to include one feature pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeaturePackConfig")]
pub struct FeaturePackConfig {
    coordinate: Coordinate,
    inherit: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    included: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded: Vec<String>,
}

/// Unvalidated shape read from YAML/JSON
#[derive(Deserialize)]
struct RawFeaturePackConfig {
    coordinate: Coordinate,
    #[serde(default = "default_inherit")]
    inherit: bool,
    #[serde(default)]
    included: Vec<String>,
    #[serde(default)]
    excluded: Vec<String>,
}

impl TryFrom<RawFeaturePackConfig> for FeaturePackConfig {
    type Error = FpackError;

    fn try_from(raw: RawFeaturePackConfig) -> Result<Self> {
        let mut builder = FeaturePackConfig::builder(raw.coordinate).inherit_packages(raw.inherit);
        for name in raw.included {
            builder = builder.include_package(name)?;
        }
        for name in raw.excluded {
            builder = builder.exclude_package(name)?;
        }
        Ok(builder.build())
    }
}

impl FeaturePackConfig {
    /// Request the feature pack with its default packages
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            inherit: true,
            included: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub fn builder(coordinate: Coordinate) -> FeaturePackConfigBuilder {
        FeaturePackConfigBuilder {
            config: Self::new(coordinate),
        }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn ga(&self) -> Ga {
        self.coordinate.ga()
    }

    /// Whether the declared default packages are part of the request
    pub fn inherits(&self) -> bool {
        self.inherit
    }

    /// Explicitly included package names, in configuration order
    pub fn included(&self) -> &[String] {
        &self.included
    }

    /// Explicitly excluded package names, in configuration order
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn is_included(&self, package: &str) -> bool {
        self.included.iter().any(|name| name == package)
    }

    pub fn is_excluded(&self, package: &str) -> bool {
        self.excluded.iter().any(|name| name == package)
    }

    /// Same package selection, different version
    #[must_use]
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            coordinate: self.coordinate.with_version(version),
            ..self.clone()
        }
    }
}

/// Builder that keeps inclusions and exclusions mutually exclusive
#[derive(Debug, Clone)]
pub struct FeaturePackConfigBuilder {
    config: FeaturePackConfig,
}

impl FeaturePackConfigBuilder {
    #[must_use]
    pub fn inherit_packages(mut self, inherit: bool) -> Self {
        self.config.inherit = inherit;
        self
    }

    /// Add an explicit inclusion
    ///
    /// # Errors
    ///
    /// Fails if the config already excludes packages.
    pub fn include_package(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if self.config.is_excluded(&name) {
            return Err(config_error::invalid(format!(
                "package '{name}' of {} is both included and excluded",
                self.config.coordinate
            )));
        }
        if !self.config.excluded.is_empty() {
            return Err(config_error::invalid(format!(
                "{} cannot include '{name}': a config either includes or excludes packages, not both",
                self.config.coordinate
            )));
        }
        if !self.config.is_included(&name) {
            self.config.included.push(name);
        }
        Ok(self)
    }

    /// Add an explicit exclusion
    ///
    /// # Errors
    ///
    /// Fails if the config already includes packages.
    pub fn exclude_package(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if self.config.is_included(&name) {
            return Err(config_error::invalid(format!(
                "package '{name}' of {} is both included and excluded",
                self.config.coordinate
            )));
        }
        if !self.config.included.is_empty() {
            return Err(config_error::invalid(format!(
                "{} cannot exclude '{name}': a config either includes or excludes packages, not both",
                self.config.coordinate
            )));
        }
        if !self.config.is_excluded(&name) {
            self.config.excluded.push(name);
        }
        Ok(self)
    }

    pub fn build(self) -> FeaturePackConfig {
        self.config
    }
}

/// The desired overall installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvisioningConfig {
    #[serde(default)]
    pub feature_packs: Vec<FeaturePackConfig>,
}

impl ProvisioningConfig {
    pub fn new(feature_packs: Vec<FeaturePackConfig>) -> Self {
        Self { feature_packs }
    }

    pub fn is_empty(&self) -> bool {
        self.feature_packs.is_empty()
    }

    pub fn find(&self, ga: &Ga) -> Option<&FeaturePackConfig> {
        self.feature_packs.iter().find(|config| &config.ga() == ga)
    }

    pub fn contains(&self, ga: &Ga) -> bool {
        self.find(ga).is_some()
    }

    pub fn push(&mut self, config: FeaturePackConfig) {
        self.feature_packs.push(config);
    }

    /// Remove the config for a slot, returning it
    pub fn remove(&mut self, ga: &Ga) -> Option<FeaturePackConfig> {
        let index = self
            .feature_packs
            .iter()
            .position(|config| &config.ga() == ga)?;
        Some(self.feature_packs.remove(index))
    }

    /// Replace the config for a slot in place, returning the previous one
    pub fn replace(&mut self, config: FeaturePackConfig) -> Option<FeaturePackConfig> {
        let ga = config.ga();
        let slot = self.feature_packs.iter_mut().find(|c| c.ga() == ga)?;
        Some(std::mem::replace(slot, config))
    }
}
