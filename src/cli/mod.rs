//! CLI argument parsing for crewbridge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable consulted when `--runtime-command` is not given.
pub const RUNTIME_COMMAND_ENV: &str = "CREWBRIDGE_RUNTIME_COMMAND";

/// Crewbridge: run multi-agent crews through a delegate orchestration runtime.
///
/// A crew is a set of agents and a dependency graph of tasks:
/// - `run` reads one JSON request on stdin and writes one JSON result line
/// - `generate` builds a crew from YAML project files and produces assets
/// - Lifecycle events are streamed to stderr as `[EVENT] {json}` lines
#[derive(Parser, Debug)]
#[command(name = "crewbridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for crewbridge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one crew request read from stdin.
    ///
    /// Writes exactly one JSON result line to stdout and streams lifecycle
    /// events to stderr.
    Run(RunArgs),

    /// Generate assets from a storyboard and a direction document.
    ///
    /// Loads agents.yaml, tasks.yaml and crew.yaml from the config directory,
    /// scaffolds the output folders and kicks off the crew.
    Generate(GenerateArgs),

    /// List the capability tools agents may reference.
    Tools(ToolsArgs),
}

/// Runtime selection shared by `run` and `generate`.
#[derive(Args, Debug, Clone, Default)]
pub struct RuntimeArgs {
    /// Orchestrator command line; receives the crew payload as JSON on stdin.
    #[arg(long, env = RUNTIME_COMMAND_ENV)]
    pub runtime_command: Option<String>,

    /// Use the dry-run runtime even if a command is configured.
    #[arg(long)]
    pub mock: bool,

    /// Also append every event to this NDJSON file.
    #[arg(long, value_name = "PATH")]
    pub events_log: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Read the request from this file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the storyboard document.
    #[arg(short, long)]
    pub storyboard: PathBuf,

    /// Path to the direction document.
    #[arg(short, long)]
    pub direction: PathBuf,

    /// Output root for generated assets.
    #[arg(short, long, default_value = "./cm_assets")]
    pub output: PathBuf,

    /// Directory holding agents.yaml, tasks.yaml and crew.yaml.
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

/// Arguments for the `tools` command.
#[derive(Parser, Debug)]
pub struct ToolsArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
