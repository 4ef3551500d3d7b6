//! Version command implementation
//!
//! Prints the crate version plus where fpack looks for artifacts and keeps
//! its installation records.

use std::fmt::Write as _;

use crate::config::feature_pack::SPEC_FILE;
use crate::error::Result;
use crate::hash::HASH_PREFIX;
use crate::home::{HOME_ENV, RECORD_DIR};
use crate::repository::{LocalRepository, REPOSITORY_ENV};

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

fn render() -> String {
    let repository = LocalRepository::default_root().map_or_else(
        |_| "(home directory unknown)".to_string(),
        |root| root.display().to_string(),
    );

    let mut out = String::new();
    let _ = writeln!(out, "fpack {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Build info:");
    let _ = writeln!(out, "  Minimum Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    let _ = writeln!(out, "  Profile: {}", build_profile());
    let _ = writeln!(out);
    let _ = writeln!(out, "Environment:");
    let _ = writeln!(out, "  Repository: {repository} (${REPOSITORY_ENV})");
    let _ = writeln!(out, "  Home: current directory unless ${HOME_ENV} or --home is set");
    let _ = writeln!(out, "  Records: <home>/{RECORD_DIR}");
    let _ = writeln!(out, "  Feature packs: directories or .tgz archives with {SPEC_FILE}");
    let _ = writeln!(out, "  Content hashes: {}", HASH_PREFIX.trim_end_matches(':'));
    out
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
