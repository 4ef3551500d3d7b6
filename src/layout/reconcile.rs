//! Reconciliation of multiple requests for one feature pack
//!
//! While the layout is discovered, the same feature pack may be requested
//! by the caller (a *direct* request) and by any number of feature packs
//! depending on it (*transitive* requests). [`reconcile`] turns all of them
//! into one canonical [`FeaturePackConfig`] per slot:
//!
//! - transitive requests are combined pairwise with [`merge`];
//! - a direct request then replaces the merged result, see [`enforce`].

use std::collections::BTreeMap;

use crate::domain::{FeaturePackConfig, FeaturePackSpec, Ga, ProvisioningConfig};
use crate::error::{Result, config as config_error};

/// Every request recorded while the layout was discovered
#[derive(Debug, Default)]
pub struct Requests {
    direct: BTreeMap<Ga, FeaturePackConfig>,
    transitive: BTreeMap<Ga, Vec<FeaturePackConfig>>,
}

impl Requests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request made by the caller
    ///
    /// # Errors
    ///
    /// A slot can only be requested directly once.
    pub fn add_direct(&mut self, config: FeaturePackConfig) -> Result<()> {
        let ga = config.ga();
        if self.direct.contains_key(&ga) {
            return Err(config_error::invalid(format!(
                "feature pack {ga} is requested more than once"
            )));
        }
        self.direct.insert(ga, config);
        Ok(())
    }

    /// Record a request made by a feature-pack dependency declaration
    pub fn add_transitive(&mut self, config: FeaturePackConfig) {
        self.transitive.entry(config.ga()).or_default().push(config);
    }

    pub fn direct(&self, ga: &Ga) -> Option<&FeaturePackConfig> {
        self.direct.get(ga)
    }

    pub fn transitive(&self, ga: &Ga) -> &[FeaturePackConfig] {
        self.transitive.get(ga).map_or(&[][..], Vec::as_slice)
    }
}

/// Combine two requests for the same slot arriving on independent paths
///
/// Inclusions are unioned. An exclusion survives only if neither side
/// includes the package and every side that inherits the defaults excludes
/// it too. When the result would both include and exclude packages, the
/// inherited defaults are spelled out as inclusions instead.
pub fn merge(
    left: &FeaturePackConfig,
    right: &FeaturePackConfig,
    defaults: &[String],
) -> Result<FeaturePackConfig> {
    let inherit = left.inherits() || right.inherits();

    let mut included: Vec<String> = left.included().to_vec();
    for name in right.included() {
        if !included.contains(name) {
            included.push(name.clone());
        }
    }

    let vetoes = |side: &FeaturePackConfig, name: &str| side.inherits() && !side.is_excluded(name);
    let mut excluded: Vec<String> = Vec::new();
    for name in left.excluded().iter().chain(right.excluded()) {
        if included.contains(name) || excluded.contains(name) {
            continue;
        }
        if vetoes(left, name) || vetoes(right, name) {
            continue;
        }
        excluded.push(name.clone());
    }

    if !included.is_empty() && !excluded.is_empty() {
        if inherit {
            let mut expanded: Vec<String> = defaults
                .iter()
                .filter(|name| !excluded.contains(name))
                .cloned()
                .collect();
            for name in included {
                if !expanded.contains(&name) {
                    expanded.push(name);
                }
            }
            included = expanded;
        }
        excluded.clear();
        return assemble(left, false, included, excluded);
    }

    assemble(left, inherit, included, excluded)
}

fn assemble(
    like: &FeaturePackConfig,
    inherit: bool,
    included: Vec<String>,
    excluded: Vec<String>,
) -> Result<FeaturePackConfig> {
    let mut builder =
        FeaturePackConfig::builder(like.coordinate().clone()).inherit_packages(inherit);
    for name in included {
        builder = builder.include_package(name)?;
    }
    for name in excluded {
        builder = builder.exclude_package(name)?;
    }
    Ok(builder.build())
}

/// A direct request replaces whatever transitive requests derived
pub fn enforce(
    direct: Option<&FeaturePackConfig>,
    transitive: Option<FeaturePackConfig>,
) -> Option<FeaturePackConfig> {
    direct.cloned().or(transitive)
}

/// One canonical configuration per slot, listed in `order`
pub fn reconcile(
    requests: &Requests,
    specs: &BTreeMap<Ga, FeaturePackSpec>,
    order: &[Ga],
) -> Result<ProvisioningConfig> {
    let mut reconciled = ProvisioningConfig::default();
    for ga in order {
        let defaults = specs
            .get(ga)
            .map_or(&[][..], |spec| spec.default_packages.as_slice());

        let mut merged: Option<FeaturePackConfig> = None;
        for request in requests.transitive(ga) {
            merged = Some(match merged {
                Some(acc) => merge(&acc, request, defaults)?,
                None => request.clone(),
            });
        }

        if let Some(config) = enforce(requests.direct(ga), merged) {
            reconciled.push(config);
        }
    }
    Ok(reconciled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::error::FpackError;

    fn coord() -> Coordinate {
        Coordinate::new("g", "a", "1.0")
    }

    fn excluding(names: &[&str]) -> FeaturePackConfig {
        let mut builder = FeaturePackConfig::builder(coord());
        for name in names {
            builder = builder.exclude_package(*name).unwrap();
        }
        builder.build()
    }

    fn including(inherit: bool, names: &[&str]) -> FeaturePackConfig {
        let mut builder = FeaturePackConfig::builder(coord()).inherit_packages(inherit);
        for name in names {
            builder = builder.include_package(*name).unwrap();
        }
        builder.build()
    }

    fn defaults() -> Vec<String> {
        vec!["main".to_string(), "docs".to_string()]
    }

    #[test]
    fn test_merge_keeps_common_exclusions() {
        let merged = merge(&excluding(&["docs", "x"]), &excluding(&["docs"]), &defaults()).unwrap();
        assert!(merged.inherits());
        assert_eq!(merged.excluded(), ["docs".to_string()]);
        assert!(merged.included().is_empty());
    }

    #[test]
    fn test_merge_exclusion_vetoed_by_plain_request() {
        let merged = merge(&excluding(&["docs"]), &FeaturePackConfig::new(coord()), &defaults()).unwrap();
        assert!(merged.inherits());
        assert!(merged.excluded().is_empty());
    }

    #[test]
    fn test_merge_non_inheriting_side_does_not_veto() {
        let merged = merge(&excluding(&["docs"]), &including(false, &[]), &defaults()).unwrap();
        assert!(merged.inherits());
        assert_eq!(merged.excluded(), ["docs".to_string()]);
    }

    #[test]
    fn test_merge_inclusion_beats_exclusion() {
        let merged = merge(&excluding(&["docs"]), &including(false, &["docs"]), &defaults()).unwrap();
        assert!(merged.is_included("docs"));
        assert!(merged.excluded().is_empty());
    }

    #[test]
    fn test_merge_expands_defaults_when_both_lists_survive() {
        let merged = merge(&excluding(&["docs"]), &including(false, &["tools"]), &defaults()).unwrap();

        assert!(!merged.inherits());
        assert!(merged.excluded().is_empty());
        assert_eq!(
            merged.included(),
            ["main".to_string(), "tools".to_string()]
        );
    }

    #[test]
    fn test_merge_unions_inclusions() {
        let merged = merge(
            &including(false, &["a", "b"]),
            &including(false, &["b", "c"]),
            &defaults(),
        ).unwrap();
        assert!(!merged.inherits());
        assert_eq!(
            merged.included(),
            ["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_enforce_direct_wins() {
        let direct = excluding(&["docs"]);
        let result = enforce(Some(&direct), Some(FeaturePackConfig::new(coord())));
        assert_eq!(result, Some(direct));

        let transitive = FeaturePackConfig::new(coord());
        assert_eq!(enforce(None, Some(transitive.clone())), Some(transitive));
        assert_eq!(enforce(None, None), None);
    }

    #[test]
    fn test_duplicate_direct_request() {
        let mut requests = Requests::new();
        requests.add_direct(FeaturePackConfig::new(coord())).unwrap();
        let err = requests
            .add_direct(FeaturePackConfig::new(coord()))
            .unwrap_err();
        assert!(matches!(err, FpackError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_reconcile_follows_order() {
        let core = Coordinate::new("g", "core", "1.0");
        let base = Coordinate::new("g", "base", "1.0");

        let mut requests = Requests::new();
        requests.add_direct(FeaturePackConfig::new(base.clone())).unwrap();
        requests.add_transitive(
            FeaturePackConfig::builder(core.clone())
                .exclude_package("docs")
                .unwrap()
                .build(),
        );

        let mut specs = BTreeMap::new();
        specs.insert(core.ga(), FeaturePackSpec::new(core.clone()));
        specs.insert(base.ga(), FeaturePackSpec::new(base.clone()));

        let config = reconcile(&requests, &specs, &[core.ga(), base.ga()]).unwrap();

        assert_eq!(config.feature_packs.len(), 2);
        assert_eq!(config.feature_packs[0].coordinate(), &core);
        assert!(config.feature_packs[0].is_excluded("docs"));
        assert_eq!(config.feature_packs[1].coordinate(), &base);
    }

    #[test]
    fn test_reconciled_configs_never_include_and_exclude() {
        let requests_list = [
            excluding(&["docs"]),
            including(false, &["tools"]),
            excluding(&["main"]),
            including(true, &["extra"]),
        ];
        for left in &requests_list {
            for right in &requests_list {
                let merged = merge(left, right, &defaults()).unwrap();
                assert!(
                    merged.included().is_empty() || merged.excluded().is_empty(),
                    "{merged:?}"
                );
            }
        }
    }
}
