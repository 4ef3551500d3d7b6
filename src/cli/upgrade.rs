use clap::Parser;

/// Arguments for the upgrade command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Move an installed feature pack to another version:\n    fpack upgrade org.example:base:1.1.0")]
pub struct UpgradeArgs {
    /// Coordinate carrying the new version; group and artifact pick the installed feature pack
    pub coordinate: String,
}
