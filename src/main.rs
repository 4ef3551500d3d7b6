//! fpack - feature-pack provisioning
//!
//! A command line tool that assembles an installation directory from
//! versioned feature packs, resolving dependencies between feature packs and
//! between their packages into one deterministic package set.

use std::error::Error as _;
use std::fmt::Write as _;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod archive;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod hash;
mod home;
mod installer;
mod layout;
mod lineup;
mod operations;
mod progress;
mod repository;
mod resolver;
mod temp;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::FpackError;

/// Install the tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Render an error with its cause chain and help text
fn report(err: &FpackError) -> String {
    let mut out = format!("Error: {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n\nCaused by:\n    {cause}");
        source = cause.source();
    }

    if let Some(help) = err.help() {
        let _ = write!(out, "\n\nhelp: {help}");
    }
    out
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.home, cli.repository, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.home, cli.repository, args),
        Commands::Provision(args) => commands::provision::run(cli.home, cli.repository, args),
        Commands::Upgrade(args) => commands::upgrade::run(cli.home, cli.repository, args),
        Commands::Diff => commands::diff::run(cli.home, cli.repository),
        Commands::Export(args) => commands::export::run(cli.home, cli.repository, args),
        Commands::Show(args) => commands::show::run(cli.home, args),
        Commands::Lineup(args) => commands::lineup::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{}", report(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_help() {
        let err = error::home::already_installed("org.example:base");
        let rendered = report(&err);
        assert!(rendered.starts_with("Error: Feature pack org.example:base is already installed"));
        assert!(rendered.contains("help: Use 'fpack upgrade'"));
    }

    #[test]
    fn test_report_includes_causes() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FpackError = io_err.into();
        let rendered = report(&err);
        assert!(rendered.contains("Caused by:\n    denied"));
    }
}
