//! Crewbridge: run multi-agent crews through a delegate orchestration runtime.
//!
//! This is the main entry point for the `crewbridge` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod bridge;
mod cli;
mod commands;
pub mod config;
pub mod crew;
pub mod engine;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod graph;
pub mod request;
pub mod result;
pub mod runtime;
pub mod scaffold;
pub mod template;
pub mod tools;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
