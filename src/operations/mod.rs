//! Provisioning operations
//!
//! A [`Provisioner`] drives every operation against one installation home:
//!
//! 1. Update the requested configuration (install, uninstall, upgrade, ...)
//! 2. Build the layout in a private work directory
//! 3. Resolve the provisioned state
//! 4. Install it into the home
//! 5. Save the records
//!
//! Records are written only after step 4 succeeds. The work directory is
//! removed when the operation ends, whether it succeeded or not.

pub mod diff;

pub use diff::DiffReport;

use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::{ProvisionedRecord, ProvisioningFile};
use crate::domain::{Coordinate, FeaturePackConfig, Ga, ProvisionedState};
use crate::error::{Result, home as home_error};
use crate::hash::hash_tree;
use crate::home::{InstallationHome, RECORD_DIR};
use crate::installer::{self, InstallSummary};
use crate::layout::{Layout, LayoutBuilder};
use crate::progress::ProgressDisplay;
use crate::repository::ArtifactResolver;
use crate::resolver;
use crate::temp;

/// Scratch installation used by diff, inside the work directory
const SCRATCH_DIR: &str = "scratch";

/// Result of a successful provisioning run
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub state: ProvisionedState,
    pub summary: InstallSummary,
}

/// Runs provisioning operations against one installation home
pub struct Provisioner<'a, R: ArtifactResolver> {
    home: &'a InstallationHome,
    artifacts: &'a R,
    show_progress: bool,
}

impl<'a, R: ArtifactResolver> Provisioner<'a, R> {
    pub fn new(home: &'a InstallationHome, artifacts: &'a R) -> Self {
        Self {
            home,
            artifacts,
            show_progress: false,
        }
    }

    /// Show a progress bar while installing
    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Add one feature pack to the installation
    pub fn install(&self, config: FeaturePackConfig) -> Result<Provisioned> {
        let mut requested = self.home.requested()?;
        if requested.config.contains(&config.ga()) {
            return Err(home_error::already_installed(config.ga()));
        }

        info!(feature_pack = %config.coordinate(), "Installing feature pack");
        requested.config.push(config);
        self.apply(requested)
    }

    /// Remove one feature pack
    ///
    /// Returns `None` when nothing remains and the home was cleared.
    pub fn uninstall(&self, ga: &Ga) -> Result<Option<Provisioned>> {
        let mut requested = self.home.requested()?;
        if requested.config.remove(ga).is_none() {
            return Err(home_error::unknown_feature_pack(ga));
        }
        requested.parameters.remove_feature_pack(ga);

        info!(feature_pack = %ga, "Uninstalling feature pack");
        if requested.config.is_empty() {
            info!(home = %self.home.root.display(), "Nothing left, clearing installation");
            self.home.clear()?;
            return Ok(None);
        }

        self.apply(requested).map(Some)
    }

    /// Replace the requested configuration as a whole
    pub fn provision(&self, requested: ProvisioningFile) -> Result<Provisioned> {
        requested.validate()?;
        info!(
            feature_packs = requested.config.feature_packs.len(),
            "Provisioning from configuration"
        );
        self.apply(requested)
    }

    /// Move an installed feature pack to the version of `coordinate`
    pub fn upgrade(&self, coordinate: &Coordinate) -> Result<Provisioned> {
        let mut requested = self.home.requested()?;
        let ga = coordinate.ga();
        let Some(current) = requested.config.find(&ga) else {
            return Err(home_error::unknown_feature_pack(ga));
        };

        let upgraded = current.with_version(&coordinate.version);
        info!(
            from = %current.coordinate(),
            to = %upgraded.coordinate(),
            "Upgrading feature pack"
        );
        requested.config.replace(upgraded);
        self.apply(requested)
    }

    /// Compare the installation against a fresh provisioning of its
    /// requested configuration
    pub fn diff(&self) -> Result<DiffReport> {
        if !self.home.is_provisioned() {
            return Err(home_error::not_provisioned(self.home.root.display().to_string()));
        }
        let requested = self.home.requested()?;

        let work = temp::work_dir()?;
        let (layout, state) = self.build(work.path(), &requested)?;

        let scratch = work.path().join(SCRATCH_DIR);
        info!("Installing into scratch directory for comparison");
        installer::install(&layout.description, &state, &scratch, &ProgressDisplay::hidden())?;

        let expected = hash_tree(&scratch, &[RECORD_DIR])?;
        let actual = hash_tree(&self.home.root, &[RECORD_DIR])?;
        let report = DiffReport::compare(&expected, &actual);
        debug!(
            added = report.added.len(),
            removed = report.removed.len(),
            modified = report.modified.len(),
            "Compared installation"
        );

        close_work_dir(work);
        Ok(report)
    }

    /// Write the reconciled configuration of the installation to `path`
    pub fn export(&self, path: &Path) -> Result<ProvisioningFile> {
        let record = self.home.record()?;
        let requested = self.home.requested()?;

        let exported = ProvisioningFile::new(record.config, requested.parameters);
        exported.save(path)?;
        info!(path = %path.display(), "Exported provisioning configuration");
        Ok(exported)
    }

    /// Build, resolve, install and record `requested`
    fn apply(&self, requested: ProvisioningFile) -> Result<Provisioned> {
        let work = temp::work_dir()?;
        let (layout, state) = self.build(work.path(), &requested)?;

        let progress = if self.show_progress {
            ProgressDisplay::new(state.package_count() as u64)
        } else {
            ProgressDisplay::hidden()
        };

        info!(home = %self.home.root.display(), "Installing packages");
        let summary = match installer::install(&layout.description, &state, &self.home.root, &progress) {
            Ok(summary) => {
                progress.finish();
                summary
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        self.home
            .save(&requested, &ProvisionedRecord::new(layout.config, state.clone()))?;
        info!(
            feature_packs = summary.feature_packs,
            packages = summary.packages,
            files = summary.files,
            "Provisioning complete"
        );

        close_work_dir(work);
        Ok(Provisioned { state, summary })
    }

    fn build(&self, work_dir: &Path, requested: &ProvisioningFile) -> Result<(Layout, ProvisionedState)> {
        info!("Building feature-pack layout");
        let layout = LayoutBuilder::new(self.artifacts, work_dir).build(&requested.config.feature_packs)?;
        for spec in layout.description.specs() {
            debug!(feature_pack = %spec.coordinate, "Feature pack in layout");
        }
        for plugin in layout.description.plugins() {
            debug!(plugin = %plugin, "Declared plugin");
        }
        debug!(resources = %layout.description.resources_dir().display(), "Merged resources");

        info!(feature_packs = layout.description.len(), "Resolving packages");
        let state = resolver::resolve(&layout.description, &layout.config, Some(&requested.parameters))?;
        Ok((layout, state))
    }
}

fn close_work_dir(work: TempDir) {
    let path = work.path().to_path_buf();
    if let Err(e) = work.close() {
        warn!(path = %path.display(), error = %e, "Failed to remove work directory");
    }
}
