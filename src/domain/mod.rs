//! Domain models for fpack
//!
//! This module contains the value types shared by the layout builder, the
//! package resolver and the orchestrator. They are free of I/O.

pub mod config;
pub mod coordinate;
pub mod spec;
pub mod state;

pub use config::{FeaturePackConfig, FeaturePackConfigBuilder, ProvisioningConfig};
pub use coordinate::{Coordinate, Ga};
pub use spec::{
    FeaturePackDependencySpec, FeaturePackSpec, PackageDependency, PackageParameter, PackageSpec,
};
pub use state::{ProvisionedFeaturePack, ProvisionedPackage, ProvisionedState};
