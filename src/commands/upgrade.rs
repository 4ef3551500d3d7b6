//! Upgrade command implementation

use std::path::PathBuf;

use crate::cli::UpgradeArgs;
use crate::commands::helpers::{open_home, open_repository, print_summary};
use crate::domain::Coordinate;
use crate::error::Result;
use crate::operations::Provisioner;

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>, args: UpgradeArgs) -> Result<()> {
    let coordinate = Coordinate::parse(&args.coordinate)?;
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    let provisioned = Provisioner::new(&home, &repository)
        .with_progress(true)
        .upgrade(&coordinate)?;

    print_summary("Upgraded", &provisioned.summary);
    Ok(())
}
