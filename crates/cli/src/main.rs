//! Nimbus - command-line configuration store for multi-cloud tooling.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Route subcommands to the configuration store library.
//! - Print results and map failures to process exit codes.
//!
//! Does NOT handle:
//! - Document parsing, template resolution, or persistence (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide
//!   NIMBUS_CONFIG and friends.
//! - Every failure prints its message to stderr and exits with code 1.

mod args;
mod commands;
mod dispatch;
mod error;
mod samples;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCode;
use nimbus_config::load_dotenv;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env BEFORE CLI parsing so the environment fallbacks see .env values
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}
