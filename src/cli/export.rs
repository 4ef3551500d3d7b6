use clap::Parser;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Export and reprovision elsewhere:\n    fpack export provisioning.yaml\n    \
                  fpack -H /opt/copy provision provisioning.yaml")]
pub struct ExportArgs {
    /// Where to write the provisioning file
    pub file: PathBuf,
}
