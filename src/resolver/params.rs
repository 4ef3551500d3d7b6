//! Package parameter resolution
//!
//! The resolver asks a [`PackageParameterResolver`] for a per-package
//! [`ParameterResolver`]. A declared parameter takes the override when one
//! exists, otherwise its declared default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Ga};

/// Resolves parameter values of one package
pub trait ParameterResolver {
    fn resolve(&self, param: &str) -> Option<String>;
}

/// Hands out parameter resolvers per feature pack and package
pub trait PackageParameterResolver {
    /// `None` means the package has no overrides
    fn resolver_for(&self, feature_pack: &Coordinate, package: &str)
    -> Option<&dyn ParameterResolver>;
}

/// Parameter values for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageParameters(pub BTreeMap<String, String>);

impl ParameterResolver for PackageParameters {
    fn resolve(&self, param: &str) -> Option<String> {
        self.0.get(param).cloned()
    }
}

/// User-supplied overrides, keyed by feature-pack slot so they survive
/// version upgrades
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterOverrides(BTreeMap<Ga, BTreeMap<String, PackageParameters>>);

impl ParameterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn set(
        &mut self,
        ga: Ga,
        package: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(ga)
            .or_default()
            .entry(package.into())
            .or_default()
            .0
            .insert(param.into(), value.into());
    }

    /// Drop every override of one feature-pack slot
    pub fn remove_feature_pack(&mut self, ga: &Ga) {
        self.0.remove(ga);
    }
}

impl PackageParameterResolver for ParameterOverrides {
    fn resolver_for(
        &self,
        feature_pack: &Coordinate,
        package: &str,
    ) -> Option<&dyn ParameterResolver> {
        self.0
            .get(&feature_pack.ga())
            .and_then(|packages| packages.get(package))
            .map(|params| params as &dyn ParameterResolver)
    }
}
