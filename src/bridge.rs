//! Primary channel: one request in, one result line out.
//!
//! The whole request is read from `input` until EOF. Exactly one JSON line is
//! written to `output`, whatever happens inside the execution. Event lines go
//! to the side channel through the bridge, never to `output`.

use crate::engine;
use crate::events::EventBridge;
use crate::exit_codes;
use crate::request::CrewRequest;
use crate::result::ExecutionResult;
use crate::runtime::DelegateRuntime;
use std::io::{self, Read, Write};

/// Run one request through the runtime and report the outcome.
///
/// Returns the process exit code: `USER_ERROR` when the request could not be
/// read or parsed, `SUCCESS` otherwise (execution failures are reported in
/// the record, not the exit code). Only a failure to write the result line
/// is returned as an error.
pub fn run_stdio<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    runtime: &mut dyn DelegateRuntime,
    events: &mut EventBridge,
) -> io::Result<i32> {
    let mut raw = Vec::new();
    let parsed = input
        .read_to_end(&mut raw)
        .map_err(|e| e.to_string())
        .and_then(|_| CrewRequest::from_slice(&raw).map_err(|e| e.to_string()));

    let (record, code) = match parsed {
        Ok(request) => (
            engine::execute_request(request, runtime, events),
            exit_codes::SUCCESS,
        ),
        Err(e) => {
            eprintln!("[crewbridge] Error: Invalid JSON input: {}", e);
            (
                ExecutionResult::failure(format!("Invalid JSON input: {}", e)),
                exit_codes::USER_ERROR,
            )
        }
    };

    write_record(&mut output, &record)?;
    Ok(code)
}

fn write_record<W: Write>(output: &mut W, record: &ExecutionResult) -> io::Result<()> {
    let line = record.to_json_line().map_err(io::Error::other)?;
    writeln!(output, "{}", line)?;
    output.flush()
}
