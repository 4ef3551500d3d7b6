//! Package dependency resolution
//!
//! Turns a [`LayoutDescription`] and its reconciled [`ProvisioningConfig`]
//! into the concrete [`ProvisionedState`]: which packages of which feature
//! pack get installed, and with which parameter values.
//!
//! ## Algorithm
//!
//! Feature packs are processed in configuration order. Each one is seeded
//! with its default packages (when the config inherits them) followed by
//! its explicit inclusions, and every seed is resolved depth first:
//!
//! 1. Local dependencies (same feature pack) are resolved before external
//!    ones (other feature packs, external groups in name order).
//! 2. A package excluded by its feature pack's config satisfies nothing. A
//!    required reference to it is an error, an optional one is dropped.
//! 3. A package is registered after its dependencies (post-order), so the
//!    provisioned package lists are installable front to back.
//!
//! Per-package visiting state is kept per feature pack:
//!
//! - **absent**: not seen yet
//! - **in progress**: on the current resolution path
//! - **done**: registered
//!
//! Reaching an in-progress package again counts as satisfied, so package
//! cycles resolve instead of failing. The package that closed the cycle is
//! then registered before the one it depends on.
//!
//! Per-feature-pack state is created lazily the first time a package of
//! that feature pack is referenced, and kept for the whole resolution.

pub mod params;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    Coordinate, FeaturePackConfig, FeaturePackSpec, Ga, PackageSpec, ProvisionedFeaturePack,
    ProvisionedPackage, ProvisionedState, ProvisioningConfig,
};
use crate::error::{Result, layout as layout_error, package as package_error};
use crate::layout::LayoutDescription;

use params::PackageParameterResolver;

/// Outcome of resolving one package reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The package is, or is being, provisioned
    Satisfied,
    /// The package is excluded and the reference could do without it
    Unsatisfied,
}

/// Who asked for a package
#[derive(Debug, Clone, Copy)]
enum Reference<'r> {
    /// Default or explicitly included package of the feature pack itself
    Seed,
    /// Dependency of a package in the same feature pack
    Local { from: &'r str, optional: bool },
    /// Dependency of a package in another feature pack
    External {
        feature_pack: &'r Coordinate,
        from: &'r str,
        optional: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Resolution state of one feature pack
#[derive(Debug)]
struct FeaturePackState<'a> {
    spec: &'a FeaturePackSpec,
    config: &'a FeaturePackConfig,
    visits: HashMap<String, Visit>,
    packages: Vec<ProvisionedPackage>,
}

/// Resolves the packages of a layout
pub struct PackageResolver<'a> {
    layout: &'a LayoutDescription,
    config: &'a ProvisioningConfig,
    parameters: Option<&'a dyn PackageParameterResolver>,
    states: BTreeMap<Ga, FeaturePackState<'a>>,
}

impl<'a> PackageResolver<'a> {
    /// `parameters` may be left out when no package declares parameters
    pub fn new(
        layout: &'a LayoutDescription,
        config: &'a ProvisioningConfig,
        parameters: Option<&'a dyn PackageParameterResolver>,
    ) -> Self {
        Self {
            layout,
            config,
            parameters,
            states: BTreeMap::new(),
        }
    }

    /// Compute the provisioned state
    ///
    /// # Errors
    ///
    /// - [`crate::error::FpackError::PackageNotFound`] when a seed or a
    ///   dependency names a package without a spec
    /// - [`crate::error::FpackError::UnsatisfiedPackageDependency`] and
    ///   [`crate::error::FpackError::UnsatisfiedExternalPackageDependency`]
    ///   when a required dependency is excluded
    /// - [`crate::error::FpackError::PackageParameterResolverNotProvided`]
    ///   when a package declares parameters and no resolver was given
    pub fn resolve(mut self) -> Result<ProvisionedState> {
        let config = self.config;
        for fp_config in &config.feature_packs {
            let ga = fp_config.ga();
            let spec = self.state(&ga)?.spec;

            let mut seeds: Vec<&str> = Vec::new();
            if fp_config.inherits() {
                seeds.extend(spec.default_packages.iter().map(String::as_str));
            }
            seeds.extend(fp_config.included().iter().map(String::as_str));

            for name in seeds {
                if fp_config.is_excluded(name) {
                    continue;
                }
                self.resolve_package(&ga, name, Reference::Seed)?;
            }
        }

        let mut state = ProvisionedState::default();
        for fp_config in &config.feature_packs {
            let packages = self
                .states
                .remove(&fp_config.ga())
                .map(|fp| fp.packages)
                .unwrap_or_default();
            state.feature_packs.push(ProvisionedFeaturePack {
                coordinate: fp_config.coordinate().clone(),
                packages,
            });
        }
        Ok(state)
    }

    fn state(&mut self, ga: &Ga) -> Result<&mut FeaturePackState<'a>> {
        match self.states.entry(ga.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let spec = self
                    .layout
                    .spec(ga)
                    .ok_or_else(|| layout_error::spec_invalid(ga, "not part of the layout"))?;
                let config = self.config.find(ga).ok_or_else(|| {
                    layout_error::spec_invalid(ga, "missing from the provisioning configuration")
                })?;
                Ok(entry.insert(FeaturePackState {
                    spec,
                    config,
                    visits: HashMap::new(),
                    packages: Vec::new(),
                }))
            }
        }
    }

    fn resolve_package(
        &mut self,
        ga: &Ga,
        name: &str,
        reference: Reference<'_>,
    ) -> Result<Resolution> {
        let state = self.state(ga)?;
        if state.visits.contains_key(name) {
            return Ok(Resolution::Satisfied);
        }

        let spec = state.spec;
        let coordinate = &spec.coordinate;
        if state.config.is_excluded(name) {
            return match reference {
                Reference::Seed
                | Reference::Local { optional: true, .. }
                | Reference::External { optional: true, .. } => Ok(Resolution::Unsatisfied),
                Reference::Local { from, .. } => {
                    Err(package_error::unsatisfied(coordinate, from, name))
                }
                Reference::External {
                    feature_pack, from, ..
                } => Err(package_error::unsatisfied_external(
                    feature_pack,
                    from,
                    coordinate,
                    name,
                )),
            };
        }

        let package = spec
            .package(name)
            .ok_or_else(|| package_error::not_found(coordinate, name))?;
        state.visits.insert(name.to_string(), Visit::InProgress);

        for dependency in &package.dependencies {
            self.resolve_package(
                ga,
                &dependency.name,
                Reference::Local {
                    from: name,
                    optional: dependency.optional,
                },
            )?;
        }

        for (group, dependencies) in &package.external {
            let target = spec
                .dependency(group)
                .ok_or_else(|| {
                    layout_error::spec_invalid(
                        coordinate,
                        format!("package '{name}' uses unknown feature-pack dependency '{group}'"),
                    )
                })?
                .config
                .ga();
            for dependency in dependencies {
                self.resolve_package(
                    &target,
                    &dependency.name,
                    Reference::External {
                        feature_pack: coordinate,
                        from: name,
                        optional: dependency.optional,
                    },
                )?;
            }
        }

        let parameters = self.resolve_parameters(coordinate, package)?;

        let state = self.state(ga)?;
        state.packages.push(ProvisionedPackage {
            name: name.to_string(),
            parameters,
        });
        state.visits.insert(name.to_string(), Visit::Done);
        Ok(Resolution::Satisfied)
    }

    fn resolve_parameters(
        &self,
        coordinate: &Coordinate,
        package: &PackageSpec,
    ) -> Result<BTreeMap<String, String>> {
        if !package.has_parameters() {
            return Ok(BTreeMap::new());
        }

        let provider = self.parameters.ok_or_else(|| {
            package_error::parameter_resolver_not_provided(coordinate, &package.name)
        })?;
        let overrides = provider.resolver_for(coordinate, &package.name);

        Ok(package
            .parameters
            .iter()
            .map(|param| {
                let value = overrides
                    .and_then(|resolver| resolver.resolve(&param.name))
                    .unwrap_or_else(|| param.default.clone());
                (param.name.clone(), value)
            })
            .collect())
    }
}

/// Resolve the packages of `layout` under `config`
pub fn resolve(
    layout: &LayoutDescription,
    config: &ProvisioningConfig,
    parameters: Option<&dyn PackageParameterResolver>,
) -> Result<ProvisionedState> {
    PackageResolver::new(layout, config, parameters).resolve()
}
