//! Command dispatch logic.
//!
//! Responsibilities:
//! - Resolve the backing file path once, before any command runs.
//! - Route parsed CLI arguments to the appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Store loading (command modules decide whether they need the store).
//!
//! Invariants:
//! - Every command sees the same resolved path for one invocation.

use anyhow::Result;

use crate::args::{Cli, Commands, resolve_config_path};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config)?;
    match cli.command {
        Commands::Config { command } => commands::config::run(command, &config_path),
        Commands::Register { command } => commands::register::run(command, &config_path),
    }
}
