//! Command implementations for the dep-wheel CLI
//!
//! The command line resolves to a single visualization run; this module
//! turns the parsed arguments into a validated configuration and hands it
//! to the executor.

pub mod visualize;

use miette::Result;

use crate::cli::Cli;

/// Execute a command based on CLI input
pub fn execute_command(cli: Cli) -> Result<()> {
    visualize::execute_visualize_command(cli)
}
