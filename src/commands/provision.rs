//! Provision command implementation

use std::path::PathBuf;

use crate::cli::ProvisionArgs;
use crate::commands::helpers::{open_home, open_repository, print_summary};
use crate::config::ProvisioningFile;
use crate::error::Result;
use crate::operations::Provisioner;

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>, args: ProvisionArgs) -> Result<()> {
    let requested = ProvisioningFile::load(&args.file)?;
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    let provisioned = Provisioner::new(&home, &repository)
        .with_progress(true)
        .provision(requested)?;

    print_summary("Provisioned", &provisioned.summary);
    Ok(())
}
