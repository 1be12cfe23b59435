//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments.
//! - Provide config path resolution helpers.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load the configuration store (command modules do that).

use anyhow::Result;
use clap::{Parser, Subcommand};
use nimbus_config::{default_config_path, env_var_or_none};
use std::path::{Path, PathBuf};

use crate::commands;

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Nimbus - configuration store for multi-cloud tooling", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  nimbus config get nimbus.default.cloud\n  nimbus config set nimbus.default.cloud aws\n  nimbus register list\n  nimbus register sample --kind openstack\n  nimbus register update --kind aws --name prod region=us-east-1 EC2_ACCESS_ID=key EC2_SECRET_KEY=secret\n"
)]
pub struct Cli {
    /// Path to the configuration file (defaults to ~/.nimbus/nimbus.yaml).
    ///
    /// Can also be set via the NIMBUS_CONFIG environment variable.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read and write configuration values
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },

    /// Register cloud and storage provider credentials
    Register {
        #[command(subcommand)]
        command: commands::register::RegisterCommand,
    },
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

/// Resolves the backing file path from the --config flag, the NIMBUS_CONFIG
/// environment variable, and the default location, in that order.
/// Blank or whitespace-only values never clobber lower-priority sources.
pub fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag.filter(|p| !path_is_blank(p)) {
        return Ok(path);
    }
    if let Some(value) = env_var_or_none("NIMBUS_CONFIG") {
        return Ok(PathBuf::from(value));
    }
    Ok(default_config_path()?)
}
