use clap::Parser;
use std::path::PathBuf;

/// Arguments for the lineup command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print fragments in application order:\n    fpack lineup configs.yaml")]
pub struct LineupArgs {
    /// YAML file with a `schema` and the `configs` to order
    pub file: PathBuf,
}
