use clap::Parser;
use std::path::PathBuf;

/// Arguments for the provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Provision from a file:\n    fpack provision provisioning.yaml\n\n\
                  Provision a fresh installation:\n    fpack -H /opt/app provision provisioning.yaml")]
pub struct ProvisionArgs {
    /// Provisioning file (YAML) listing feature packs and parameter overrides
    pub file: PathBuf,
}
