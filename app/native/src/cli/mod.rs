//! CLI module for Snapclip.
//!
//! The same binary is the menu bar app and a command-line tool. The CLI runs
//! captures headlessly (using the system picker for windows and regions) and
//! manages the configuration, preferences and screenshots folder.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::SnapclipError;
use crate::logging;

/// Parses command-line arguments and executes the command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), SnapclipError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    cli.execute()
}
