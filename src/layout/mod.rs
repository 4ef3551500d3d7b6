//! Feature-pack layout discovery
//!
//! The [`LayoutBuilder`] starts from the feature packs a caller requested,
//! walks their feature-pack dependencies depth first, and unpacks every
//! feature pack it meets into the work directory:
//!
//! ```text
//! <work>/layout/<group>/<artifact>/<version>/   unpacked feature pack
//! <work>/resources/                             merged shared resources
//! ```
//!
//! Each feature-pack slot ([`Ga`]) appears in a layout exactly once and in a
//! single version. Requests for the same slot arriving on different paths
//! are combined by [`reconcile`] once the walk is complete.

pub mod reconcile;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::archive;
use crate::common::fs::merge_dir_into;
use crate::config::feature_pack::{self, RESOURCES_DIR};
use crate::domain::{Coordinate, FeaturePackConfig, FeaturePackSpec, Ga, ProvisioningConfig};
use crate::error::{Result, fs as fs_error, layout as layout_error};
use crate::repository::ArtifactResolver;

use reconcile::{Requests, reconcile};

/// Directory under the work dir holding unpacked feature packs
const LAYOUT_DIR: &str = "layout";

/// Every feature pack needed for one provisioning operation
#[derive(Debug, Clone)]
pub struct LayoutDescription {
    specs: BTreeMap<Ga, FeaturePackSpec>,
    order: Vec<Ga>,
    dirs: BTreeMap<Ga, PathBuf>,
    resources_dir: PathBuf,
    plugins: Vec<Coordinate>,
}

impl LayoutDescription {
    pub fn spec(&self, ga: &Ga) -> Option<&FeaturePackSpec> {
        self.specs.get(ga)
    }

    /// Feature-pack specs in dependency order, dependencies first
    pub fn specs(&self) -> impl Iterator<Item = &FeaturePackSpec> {
        self.order.iter().filter_map(|ga| self.specs.get(ga))
    }

    /// Where the feature pack of `ga` was unpacked
    pub fn dir(&self, ga: &Ga) -> Option<&Path> {
        self.dirs.get(ga).map(PathBuf::as_path)
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Plugin coordinates declared across the layout, without duplicates
    pub fn plugins(&self) -> &[Coordinate] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// A layout together with the reconciled configuration
#[derive(Debug, Clone)]
pub struct Layout {
    pub description: LayoutDescription,

    /// One configuration per slot, dependencies first
    pub config: ProvisioningConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Builds a [`Layout`] from requested feature-pack configurations
pub struct LayoutBuilder<'a, R: ArtifactResolver> {
    resolver: &'a R,
    work_dir: PathBuf,
    specs: BTreeMap<Ga, FeaturePackSpec>,
    dirs: BTreeMap<Ga, PathBuf>,
    visits: HashMap<Ga, Visit>,
    order: Vec<Ga>,
    plugins: Vec<Coordinate>,
    requests: Requests,
}

impl<'a, R: ArtifactResolver> LayoutBuilder<'a, R> {
    /// `work_dir` must be private to this build; it is filled but never
    /// cleaned up here
    pub fn new(resolver: &'a R, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            work_dir: work_dir.into(),
            specs: BTreeMap::new(),
            dirs: BTreeMap::new(),
            visits: HashMap::new(),
            order: Vec::new(),
            plugins: Vec::new(),
            requests: Requests::new(),
        }
    }

    /// Discover, unpack and reconcile everything `requested` needs
    pub fn build(mut self, requested: &[FeaturePackConfig]) -> Result<Layout> {
        for config in requested {
            self.requests.add_direct(config.clone())?;
        }

        let resources_dir = self.work_dir.join(RESOURCES_DIR);
        std::fs::create_dir_all(&resources_dir)
            .map_err(|e| fs_error::write_failed(&resources_dir, e))?;

        for config in requested {
            self.visit(config.coordinate(), &resources_dir)?;
        }

        let config = reconcile(&self.requests, &self.specs, &self.order)?;

        Ok(Layout {
            description: LayoutDescription {
                specs: self.specs,
                order: self.order,
                dirs: self.dirs,
                resources_dir,
                plugins: self.plugins,
            },
            config,
        })
    }

    fn visit(&mut self, coordinate: &Coordinate, resources_dir: &Path) -> Result<()> {
        let ga = coordinate.ga();

        if let Some(registered) = self.specs.get(&ga) {
            if registered.coordinate.version != coordinate.version {
                return Err(layout_error::version_conflict(
                    &ga,
                    &registered.coordinate.version,
                    &coordinate.version,
                ));
            }
        }
        if self.visits.contains_key(&ga) {
            return Ok(());
        }
        self.visits.insert(ga.clone(), Visit::InProgress);

        let dir = self.unpack(coordinate)?;
        let spec = feature_pack::load_spec(&dir)?;
        if &spec.coordinate != coordinate {
            return Err(layout_error::spec_invalid(
                coordinate,
                format!("spec declares coordinate {}", spec.coordinate),
            ));
        }

        for plugin in &spec.plugins {
            if !self.plugins.contains(plugin) {
                self.plugins.push(plugin.clone());
            }
        }

        let dependencies: Vec<FeaturePackConfig> =
            spec.dependencies.iter().map(|dep| dep.config.clone()).collect();
        self.specs.insert(ga.clone(), spec);
        self.dirs.insert(ga.clone(), dir.clone());

        for dependency in dependencies {
            let target = dependency.coordinate().clone();
            self.requests.add_transitive(dependency);
            self.visit(&target, resources_dir)?;
        }

        merge_dir_into(&dir.join(RESOURCES_DIR), resources_dir)?;
        self.order.push(ga.clone());
        self.visits.insert(ga, Visit::Done);
        Ok(())
    }

    fn unpack(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let source = self.resolver.resolve(coordinate)?;

        let mut target = self.work_dir.join(LAYOUT_DIR);
        for segment in [&coordinate.group, &coordinate.artifact, &coordinate.version] {
            target.push(segment);
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, e))?;
        }

        archive::unpack(&source, &target)?;
        Ok(target)
    }
}
