//! Uninstall command implementation

use std::path::PathBuf;

use crate::cli::UninstallArgs;
use crate::commands::helpers::{open_home, open_repository, print_summary};
use crate::domain::{Coordinate, Ga};
use crate::error::Result;
use crate::operations::Provisioner;

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>, args: UninstallArgs) -> Result<()> {
    let ga = parse_ga(&args.feature_pack)?;
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    match Provisioner::new(&home, &repository)
        .with_progress(true)
        .uninstall(&ga)?
    {
        Some(provisioned) => print_summary("Reprovisioned", &provisioned.summary),
        None => println!("Uninstalled {ga}, nothing left in {}", home.root.display()),
    }
    Ok(())
}

/// Accept both `group:artifact` and a full coordinate
fn parse_ga(input: &str) -> Result<Ga> {
    if input.matches(':').count() == 1 {
        Ga::parse(input)
    } else {
        Ok(Coordinate::parse(input)?.ga())
    }
}
