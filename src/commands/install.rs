//! Install command implementation

use std::path::PathBuf;

use crate::cli::InstallArgs;
use crate::commands::helpers::{open_home, open_repository, print_summary};
use crate::domain::{Coordinate, FeaturePackConfig};
use crate::error::Result;
use crate::operations::Provisioner;

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let config = feature_pack_config(&args)?;
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    let provisioned = Provisioner::new(&home, &repository)
        .with_progress(true)
        .install(config)?;

    print_summary("Installed", &provisioned.summary);
    Ok(())
}

/// Build the requested configuration from the command line
fn feature_pack_config(args: &InstallArgs) -> Result<FeaturePackConfig> {
    let coordinate = Coordinate::parse(&args.coordinate)?;
    let mut builder = FeaturePackConfig::builder(coordinate).inherit_packages(!args.no_inherit);
    for package in &args.include {
        builder = builder.include_package(package)?;
    }
    for package in &args.exclude {
        builder = builder.exclude_package(package)?;
    }
    Ok(builder.build())
}
