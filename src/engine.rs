//! Execution wrapper.
//!
//! Turns a request (or an already-built crew) into exactly one
//! [`ExecutionResult`]. Nothing here returns an error: every failure becomes a
//! failure record, and failures past validation are also announced as `error`
//! events on the bridge.
//!
//! # Order of operations
//!
//! 1. No agents → `No agents provided`; no tasks → `No tasks provided`.
//!    The runtime is never invoked for either.
//! 2. Materialize the task graph; announce a process-mode downgrade.
//! 3. Interpolate kickoff inputs.
//! 4. `crew_start`, runtime kickoff, `crew_complete`.

use crate::crew::Crew;
use crate::events::{Event, EventBridge};
use crate::request::CrewRequest;
use crate::result::ExecutionResult;
use crate::runtime::DelegateRuntime;

/// Execute a request from the primary channel.
pub fn execute_request(
    request: CrewRequest,
    runtime: &mut dyn DelegateRuntime,
    events: &mut EventBridge,
) -> ExecutionResult {
    if request.agents.is_empty() {
        return ExecutionResult::failure("No agents provided");
    }
    if request.tasks.is_empty() {
        return ExecutionResult::failure("No tasks provided");
    }

    events.set_callbacks(request.callbacks);

    let prepared = match Crew::from_request(request) {
        Ok(prepared) => prepared,
        Err(e) => return report_failure(events, e.to_string()),
    };
    for warning in prepared.warnings {
        events.emit(Event::warning(warning));
    }

    execute_crew(prepared.crew, runtime, events)
}

/// Execute a materialized crew.
pub fn execute_crew(
    mut crew: Crew,
    runtime: &mut dyn DelegateRuntime,
    events: &mut EventBridge,
) -> ExecutionResult {
    if let Err(e) = crew.interpolate_inputs() {
        return report_failure(events, e.to_string());
    }

    events.emit(Event::crew_start(&crew.name));
    eprintln!(
        "[crewbridge] Starting crew execution: {} ({} agents, {} tasks, {}, runtime: {})",
        crew.name,
        crew.agents.len(),
        crew.tasks.len(),
        crew.process.as_str(),
        runtime.name()
    );

    match runtime.kickoff(&crew, events) {
        Ok(artifact) => {
            events.emit(Event::crew_complete(&crew.name));
            ExecutionResult::success(artifact, crew.agents.len(), crew.tasks.len())
        }
        Err(e) => report_failure(events, e.to_string()),
    }
}

fn report_failure(events: &mut EventBridge, message: String) -> ExecutionResult {
    eprintln!("[crewbridge] Error: {}", message);
    events.emit(Event::error(message.clone()));
    ExecutionResult::failure(message)
}
