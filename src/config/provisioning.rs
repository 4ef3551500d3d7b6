//! Provisioning files
//!
//! A provisioning file is the user-level request: the feature packs to
//! install and parameter overrides for their packages. The installation home
//! keeps the last accepted one as `.fpack/provisioning.yaml`, and `export`
//! writes the reconciled configuration in the same format.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ProvisioningConfig;
use crate::error::{Result, config as config_error, fs as fs_error};
use crate::resolver::params::ParameterOverrides;

/// `provisioning.yaml` content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvisioningFile {
    #[serde(flatten)]
    pub config: ProvisioningConfig,

    #[serde(default, skip_serializing_if = "ParameterOverrides::is_empty")]
    pub parameters: ParameterOverrides,
}

impl ProvisioningFile {
    pub fn new(config: ProvisioningConfig, parameters: ParameterOverrides) -> Self {
        Self { config, parameters }
    }

    /// Parse a provisioning file from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: Self = serde_yaml::from_str(yaml)?;
        file.validate()?;
        Ok(file)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::FpackError::ConfigParseFailed { reason, .. } => {
                config_error::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, e))?;
        }
        fs::write(path, self.to_yaml()?).map_err(|e| fs_error::write_failed(path, e))
    }

    /// A provisioning file requests each feature-pack slot at most once
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for config in &self.config.feature_packs {
            if !seen.insert(config.ga()) {
                return Err(config_error::invalid(format!(
                    "feature pack {} is listed more than once",
                    config.ga()
                )));
            }
        }
        Ok(())
    }
}
