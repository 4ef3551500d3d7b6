//! Export command implementation

use std::path::PathBuf;

use crate::cli::ExportArgs;
use crate::commands::helpers::{open_home, open_repository};
use crate::error::Result;
use crate::operations::Provisioner;

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>, args: ExportArgs) -> Result<()> {
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    let exported = Provisioner::new(&home, &repository).export(&args.file)?;
    println!(
        "Exported {} feature pack(s) to {}",
        exported.config.feature_packs.len(),
        args.file.display()
    );
    Ok(())
}
