//! Error types and handling for fpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into two kinds. Description errors mean the requested
//! configuration is internally inconsistent (bad coordinate, version
//! conflict, unresolvable reference). Operational errors mean the
//! environment failed us (I/O, corrupt archive, missing artifact). Both are
//! fatal to the current operation.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and spec file errors
//! - [`fs`]: File system errors
//! - [`home`]: Installation home errors
//! - [`layout`]: Feature-pack layout errors
//! - [`lineup`]: Configuration lineup errors
//! - [`package`]: Package resolution errors

#![allow(dead_code, unused_assignments)]

pub mod config;
pub mod fs;
pub mod home;
pub mod layout;
pub mod lineup;
pub mod package;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum FpackError {
    // Coordinate and artifact errors
    #[error("Invalid coordinate '{input}': {reason}")]
    #[diagnostic(
        code(fpack::coordinate::invalid),
        help("Coordinates look like group:artifact[:extension[:classifier]]:version")
    )]
    InvalidCoordinate { input: String, reason: String },

    #[error("Artifact {coordinate} not found at {path}")]
    #[diagnostic(
        code(fpack::repository::not_found),
        help("Check the repository location (--repository or FPACK_REPOSITORY)")
    )]
    ArtifactNotFound { coordinate: String, path: String },

    #[error("Failed to unpack {path}: {reason}")]
    #[diagnostic(code(fpack::archive::unpack_failed))]
    ArchiveUnpackFailed { path: String, reason: String },

    // Layout errors
    #[error("Feature pack {ga} is requested in version {requested} but version {registered} is already in the layout")]
    #[diagnostic(
        code(fpack::layout::version_conflict),
        help("Align the versions requested by the feature-pack dependencies")
    )]
    FeaturePackVersionConflict {
        ga: String,
        registered: String,
        requested: String,
    },

    #[error("Failed to parse feature-pack spec {path}: {reason}")]
    #[diagnostic(code(fpack::layout::spec_parse_failed))]
    SpecParseFailed { path: String, reason: String },

    #[error("Invalid spec for {owner}: {message}")]
    #[diagnostic(code(fpack::layout::spec_invalid))]
    SpecInvalid { owner: String, message: String },

    // Package resolution errors
    #[error("Package '{package}' not found in feature pack {feature_pack}")]
    #[diagnostic(code(fpack::package::not_found))]
    PackageNotFound {
        feature_pack: String,
        package: String,
    },

    #[error("Package '{package}' of {feature_pack} requires '{dependency}', which is excluded")]
    #[diagnostic(
        code(fpack::package::unsatisfied_dependency),
        help("Stop excluding the dependency or exclude the dependent package too")
    )]
    UnsatisfiedPackageDependency {
        feature_pack: String,
        package: String,
        dependency: String,
    },

    #[error("Package '{package}' of {feature_pack} requires '{dependency}' from {target}, which is excluded")]
    #[diagnostic(
        code(fpack::package::unsatisfied_external_dependency),
        help("Stop excluding the dependency in the configuration of {target}")
    )]
    UnsatisfiedExternalPackageDependency {
        feature_pack: String,
        package: String,
        target: String,
        dependency: String,
    },

    #[error("Package '{package}' of {feature_pack} declares parameters but no parameter resolver was provided")]
    #[diagnostic(code(fpack::package::parameter_resolver_not_provided))]
    PackageParameterResolverNotProvided {
        feature_pack: String,
        package: String,
    },

    // Installation home errors
    #[error("Feature pack {ga} is already installed")]
    #[diagnostic(
        code(fpack::home::already_installed),
        help("Use 'fpack upgrade' to change its version or 'fpack uninstall' first")
    )]
    FeaturePackAlreadyInstalled { ga: String },

    #[error("Feature pack {ga} is not installed")]
    #[diagnostic(code(fpack::home::unknown_feature_pack))]
    UnknownFeaturePack { ga: String },

    #[error("Installation home {path} is not usable")]
    #[diagnostic(
        code(fpack::home::not_usable),
        help("The directory exists, is not empty and was not provisioned by fpack")
    )]
    HomeDirNotUsable { path: String },

    #[error("Nothing is provisioned at {path}")]
    #[diagnostic(
        code(fpack::home::not_provisioned),
        help("Run 'fpack install' or 'fpack provision' first")
    )]
    NotProvisioned { path: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fpack::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(fpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(fpack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Lineup errors
    #[error("Unknown configuration spot '{spot}'")]
    #[diagnostic(code(fpack::lineup::unknown_spot))]
    UnknownConfigSpot { spot: String },

    #[error("Duplicate configuration id {spot}={id}")]
    #[diagnostic(code(fpack::lineup::duplicate_id))]
    DuplicateConfigId { spot: String, id: String },

    #[error("Configuration {owner} references {spot}={id}, which does not exist")]
    #[diagnostic(code(fpack::lineup::unresolved_reference))]
    UnresolvedConfigReference {
        owner: String,
        spot: String,
        id: String,
    },

    #[error("Configuration {owner} is missing required parameter '{param}'")]
    #[diagnostic(code(fpack::lineup::missing_parameter))]
    MissingConfigParameter { owner: String, param: String },

    #[error("Configuration {owner} does not accept parameter '{param}'")]
    #[diagnostic(code(fpack::lineup::unexpected_parameter))]
    UnexpectedConfigParameter { owner: String, param: String },

    #[error("Configuration reference cycle: {chain}")]
    #[diagnostic(
        code(fpack::lineup::reference_cycle),
        help("Configuration fragments cannot reference each other in a loop")
    )]
    ConfigReferenceCycle { chain: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(fpack::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(fpack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(fpack::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(fpack::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<std::io::Error> for FpackError {
    fn from(err: std::io::Error) -> Self {
        FpackError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for FpackError {
    fn from(err: serde_yaml::Error) -> Self {
        FpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FpackError {
    fn from(err: serde_json::Error) -> Self {
        FpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FpackError>;
