//! Implementation of the `crewbridge run` command.
//!
//! Reads one crew request (stdin or `--input`), executes it, and writes one
//! JSON result line to stdout. Execution failures are reported in that line;
//! the exit code only distinguishes an unreadable request.

use super::{event_bridge, runtime_for};
use crate::bridge::run_stdio;
use crate::cli::RunArgs;
use crate::error::{BridgeError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;

/// Execute the `crewbridge run` command.
pub fn cmd_run(args: RunArgs) -> Result<i32> {
    let mut events = event_bridge(&args.runtime);
    let mut runtime = runtime_for(&args.runtime, None, BTreeMap::new());
    let stdout = io::stdout().lock();

    let written = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                BridgeError::UserError(format!(
                    "failed to open request file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            run_stdio(file, stdout, runtime.as_mut(), &mut events)
        }
        None => run_stdio(io::stdin().lock(), stdout, runtime.as_mut(), &mut events),
    };

    written.map_err(|e| BridgeError::ExecutionFailed(format!("failed to write result: {}", e)))
}
