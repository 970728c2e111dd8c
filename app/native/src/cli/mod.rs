//! CLI module for Foresight.
//!
//! The CLI loads the configuration, inspects the window classification
//! rules and replays scenarios against a simulated shell.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::ForesightError;
use crate::logging;

/// Runs the CLI.
///
/// Parses command-line arguments, installs the log subscriber and executes
/// the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), ForesightError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    cli.execute()
}
