//! File formats for fpack
//!
//! This module contains data structures for:
//! - `feature-pack.yaml` and `packages/<name>/package.yaml` - Feature-pack specs
//! - `provisioning.yaml` - Requested configuration and parameter overrides
//! - `provisioned-state.json` - What the last operation installed
//! - lineup files - Schema plus configuration fragments to order

pub mod feature_pack;
pub mod lineup;
pub mod provisioning;
pub mod state;

// Re-export commonly used types
pub use lineup::LineupFile;
pub use provisioning::ProvisioningFile;
pub use state::ProvisionedRecord;
