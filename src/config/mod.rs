//! Project files for crewbridge.
//!
//! A crew project is a directory holding `agents.yaml`, `tasks.yaml` and an
//! optional `crew.yaml`. Agents and tasks are keyed by identifier and keep
//! their declaration order; tasks reference agents and earlier tasks by id.
//! Unknown fields are ignored for forward compatibility.

mod model;
mod operations;


pub use model::{
    AGENTS_FILE, AgentEntry, AgentsFile, CREW_FILE, CrewFile, CrewProject, RuntimeSection,
    TASKS_FILE, TaskEntry, TasksFile,
};
