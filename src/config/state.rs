//! Provisioned-state record (`.fpack/provisioned-state.json`)
//!
//! Holds what the last successful operation installed, along with the
//! reconciled configuration that produced it so `export` can write it back
//! without rebuilding the layout.

use serde::{Deserialize, Serialize};

use crate::domain::{ProvisionedState, ProvisioningConfig};
use crate::error::{FpackError, Result};

/// Record file name under the installation home's record directory
pub const STATE_FILE: &str = "provisioned-state.json";

/// Provisioned state plus the reconciled configuration behind it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedRecord {
    /// Reconciled configuration, dependencies first
    #[serde(default)]
    pub config: ProvisioningConfig,

    #[serde(flatten)]
    pub state: ProvisionedState,
}

impl ProvisionedRecord {
    pub fn new(config: ProvisioningConfig, state: ProvisionedState) -> Self {
        Self { config, state }
    }

    /// Parse a record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FpackError::ConfigParseFailed {
            path: STATE_FILE.to_string(),
            reason: e.to_string(),
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| FpackError::ConfigParseFailed {
            path: STATE_FILE.to_string(),
            reason: e.to_string(),
        })?;
        json.push('\n');
        Ok(json)
    }
}
