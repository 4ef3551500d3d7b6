//! Command implementations for the fpack CLI

pub mod completions;
pub mod diff;
pub mod export;
pub mod helpers;
pub mod install;
pub mod lineup;
pub mod provision;
pub mod show;
pub mod uninstall;
pub mod upgrade;
pub mod version;
