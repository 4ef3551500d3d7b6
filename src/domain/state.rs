//! Computed installation content

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Ga};

/// A package selected for installation, with its resolved parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedPackage {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

/// Packages selected from one feature pack, dependencies first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedFeaturePack {
    pub coordinate: Coordinate,
    pub packages: Vec<ProvisionedPackage>,
}

impl ProvisionedFeaturePack {
    pub fn package(&self, name: &str) -> Option<&ProvisionedPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }
}

/// The final computed installation content, feature packs in install order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvisionedState {
    pub feature_packs: Vec<ProvisionedFeaturePack>,
}

impl ProvisionedState {
    pub fn is_empty(&self) -> bool {
        self.feature_packs.is_empty()
    }

    pub fn feature_pack(&self, ga: &Ga) -> Option<&ProvisionedFeaturePack> {
        self.feature_packs.iter().find(|fp| &fp.coordinate.ga() == ga)
    }

    /// Every (coordinate, package) pair, independent of traversal order
    pub fn package_pairs(&self) -> BTreeSet<(Coordinate, String)> {
        self.feature_packs
            .iter()
            .flat_map(|fp| {
                fp.packages
                    .iter()
                    .map(|p| (fp.coordinate.clone(), p.name.clone()))
            })
            .collect()
    }

    pub fn package_count(&self) -> usize {
        self.feature_packs.iter().map(|fp| fp.packages.len()).sum()
    }
}
