//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - provision: Provision command arguments
//! - upgrade: Upgrade command arguments
//! - export: Export command arguments
//! - show: Show command arguments
//! - lineup: Lineup command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod export;
pub mod install;
pub mod lineup;
pub mod provision;
pub mod show;
pub mod uninstall;
pub mod upgrade;

pub use completions::CompletionsArgs;
pub use export::ExportArgs;
pub use install::InstallArgs;
pub use lineup::LineupArgs;
pub use provision::ProvisionArgs;
pub use show::ShowArgs;
pub use uninstall::UninstallArgs;
pub use upgrade::UpgradeArgs;

/// fpack - feature-pack provisioning
///
/// Assemble installations from versioned, dependency-aware feature packs.
#[derive(Parser, Debug)]
#[command(
    name = "fpack",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provision installations from feature packs",
    long_about = "fpack assembles an installation directory from feature packs: versioned bundles \
                  of packages with dependencies between packages and between feature packs. \
                  It resolves the exact package set, installs it and records what it did so the \
                  installation can be upgraded, compared and exported later.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  fpack install org.example:base:tgz:1.0.0      \x1b[90m# Install a feature pack\x1b[0m\n   \
                  fpack -H /opt/app provision provisioning.yaml \x1b[90m# Provision from a file\x1b[0m\n   \
                  fpack upgrade org.example:base:tgz:1.1.0      \x1b[90m# Change an installed version\x1b[0m\n   \
                  fpack diff                                    \x1b[90m# Show local modifications\x1b[0m\n   \
                  fpack show                                    \x1b[90m# Show installed packages\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Installation home (defaults to current directory)
    #[arg(long, short = 'H', global = true, env = "FPACK_HOME")]
    pub home: Option<PathBuf>,

    /// Local feature-pack repository (defaults to ~/.fpack/repository)
    #[arg(long, short = 'r', global = true, env = "FPACK_REPOSITORY")]
    pub repository: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a feature pack to the installation
    Install(InstallArgs),

    /// Remove a feature pack from the installation
    Uninstall(UninstallArgs),

    /// Provision the installation from a provisioning file
    Provision(ProvisionArgs),

    /// Change the version of an installed feature pack
    Upgrade(UpgradeArgs),

    /// Compare the installation with its provisioned state
    Diff,

    /// Write the installation's configuration as a provisioning file
    Export(ExportArgs),

    /// Show the provisioned state
    Show(ShowArgs),

    /// Order configuration fragments against their schema
    Lineup(LineupArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
