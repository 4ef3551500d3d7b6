//! Lineup input files
//!
//! A lineup file carries a schema and the fragments to order against it:
//!
//! ```yaml
//! schema:
//!   - path: [server]
//!   - path: [server, interface]
//!     id: name
//! configs:
//!   - spot: interface
//!     params: {name: public}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FpackError, Result, config as config_error};
use crate::lineup::{FeatureConfig, FeatureConfigDescription, Schema};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupFile {
    pub schema: Vec<FeatureConfigDescription>,

    #[serde(default)]
    pub configs: Vec<FeatureConfig>,
}

impl LineupFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            FpackError::ConfigParseFailed { reason, .. } => {
                config_error::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Validated schema of this file
    pub fn schema(&self) -> Result<Schema> {
        Schema::new(self.schema.clone())
    }
}
