//! Installation home management
//!
//! An installation home is the directory feature-pack content is installed
//! into. fpack keeps its records next to the content:
//!
//! ```text
//! <home>/
//! ├── .fpack/
//! │   ├── provisioning.yaml       # Requested configuration
//! │   └── provisioned-state.json  # Installed packages + reconciled config
//! └── ...                         # Installed package content
//! ```
//!
//! Records are only written after a successful installation, so a home
//! without `provisioned-state.json` has never been provisioned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::{clear_dir_except, is_dir_empty};
use crate::config::state::STATE_FILE;
use crate::config::{ProvisionedRecord, ProvisioningFile};
use crate::error::{Result, fs as fs_error, home as home_error};

/// Record directory name
pub const RECORD_DIR: &str = ".fpack";

/// Requested configuration file name
pub const PROVISIONING_FILE: &str = "provisioning.yaml";

/// Environment variable naming the installation home
pub const HOME_ENV: &str = "FPACK_HOME";

/// An installation directory fpack may provision
#[derive(Debug, Clone)]
pub struct InstallationHome {
    /// Root directory of the installation
    pub root: PathBuf,

    /// Path to the `.fpack` directory
    pub record_dir: PathBuf,
}

impl InstallationHome {
    /// Whether `root` carries fpack records
    pub fn exists(root: &Path) -> bool {
        root.join(RECORD_DIR).is_dir()
    }

    /// Open the home at `root`
    ///
    /// A missing directory is fine and gets created on first install. An
    /// existing one must be empty or already managed by fpack.
    pub fn open(root: &Path) -> Result<Self> {
        let root = if root.exists() {
            if !root.is_dir() {
                return Err(home_error::not_usable(root.display().to_string()));
            }
            dunce::canonicalize(root).map_err(|e| fs_error::read_failed(root, e))?
        } else {
            std::path::absolute(root).map_err(|e| fs_error::read_failed(root, e))?
        };

        if root.is_dir() && !Self::exists(&root) && !is_dir_empty(&root)? {
            return Err(home_error::not_usable(root.display().to_string()));
        }

        let record_dir = root.join(RECORD_DIR);
        Ok(Self { root, record_dir })
    }

    pub fn provisioning_path(&self) -> PathBuf {
        self.record_dir.join(PROVISIONING_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.record_dir.join(STATE_FILE)
    }

    pub fn is_provisioned(&self) -> bool {
        self.state_path().is_file()
    }

    /// The requested configuration, empty when nothing was requested yet
    pub fn requested(&self) -> Result<ProvisioningFile> {
        let path = self.provisioning_path();
        if !path.is_file() {
            return Ok(ProvisioningFile::default());
        }
        ProvisioningFile::load(&path)
    }

    /// What the last successful operation installed
    pub fn record(&self) -> Result<ProvisionedRecord> {
        let path = self.state_path();
        if !path.is_file() {
            return Err(home_error::not_provisioned(self.root.display().to_string()));
        }

        let content = fs::read_to_string(&path).map_err(|e| fs_error::read_failed(&path, e))?;
        ProvisionedRecord::from_json(&content)
    }

    /// Write both records
    pub fn save(&self, requested: &ProvisioningFile, record: &ProvisionedRecord) -> Result<()> {
        fs::create_dir_all(&self.record_dir)
            .map_err(|e| fs_error::write_failed(&self.record_dir, e))?;

        requested.save(&self.provisioning_path())?;

        let path = self.state_path();
        fs::write(&path, record.to_json()?).map_err(|e| fs_error::write_failed(&path, e))
    }

    /// Remove all installed content and the records
    pub fn clear(&self) -> Result<()> {
        clear_dir_except(&self.root, &[])?;
        Ok(())
    }
}
