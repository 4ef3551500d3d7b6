use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall a feature pack:\n    fpack uninstall org.example:base\n\n\
                  A full coordinate works too:\n    fpack uninstall org.example:base:tgz:1.0.0")]
pub struct UninstallArgs {
    /// Feature pack to remove, as group:artifact or a full coordinate
    pub feature_pack: String,
}
