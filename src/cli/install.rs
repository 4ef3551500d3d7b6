use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a feature pack with its default packages:\n    fpack install org.example:base:tgz:1.0.0\n\n\
                   Leave out a default package:\n    fpack install org.example:base:tgz:1.0.0 --exclude docs\n\n\
                   Install only selected packages:\n    fpack install org.example:base:tgz:1.0.0 --no-inherit --include main")]
pub struct InstallArgs {
    /// Feature-pack coordinate: group:artifact[:extension[:classifier]]:version
    pub coordinate: String,

    /// Package to leave out (repeatable)
    #[arg(long = "exclude", short = 'x', value_name = "PACKAGE", conflicts_with = "include")]
    pub exclude: Vec<String>,

    /// Package to install in addition to the defaults (repeatable)
    #[arg(long = "include", short = 'i', value_name = "PACKAGE")]
    pub include: Vec<String>,

    /// Do not install the feature pack's default packages
    #[arg(long)]
    pub no_inherit: bool,
}
