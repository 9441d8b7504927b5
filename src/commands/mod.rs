//! Command implementations for crewbridge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the runtime and event wiring they share.

mod generate;
mod run;
mod tools;

use crate::cli::{Command, RuntimeArgs};
use crate::error::Result;
use crate::events::{EventBridge, NdjsonFileSink, StreamSink};
use crate::runtime::{DelegateRuntime, RuntimeSelection, select_runtime};
use std::collections::BTreeMap;

/// Dispatch a command to its implementation.
///
/// Returns the exit code on success. Errors carry their own exit code.
pub fn dispatch(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Generate(args) => generate::cmd_generate(args),
        Command::Tools(args) => tools::cmd_tools(args),
    }
}

/// Events go to stderr as marked lines, and to the NDJSON log when requested.
fn event_bridge(args: &RuntimeArgs) -> EventBridge {
    let mut bridge = EventBridge::new().with_sink(StreamSink::stderr());
    if let Some(path) = &args.events_log {
        bridge = bridge.with_sink(NdjsonFileSink::new(path));
    }
    bridge
}

/// Pick the runtime. The CLI (or environment) command wins over a project default.
fn runtime_for(
    args: &RuntimeArgs,
    project_command: Option<&str>,
    environment: BTreeMap<String, String>,
) -> Box<dyn DelegateRuntime> {
    let command = args
        .runtime_command
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| project_command.map(str::to_string));

    select_runtime(RuntimeSelection {
        command,
        environment,
        force_mock: args.mock,
    })
}
