//! Delegate runtimes.
//!
//! The orchestration engine that actually runs agents is external and opaque.
//! This module hides it behind one narrow seam: hand over a [`Crew`], get back
//! the final artifact text or a [`RuntimeError`]. Progress the runtime reports
//! flows through the [`EventBridge`] it is given.
//!
//! - [`CommandRuntime`]: spawns an external orchestrator process and speaks
//!   JSON over its stdin/stdout.
//! - [`MockRuntime`]: a dry run that walks the task graph without delegating.

mod command;
mod mock;

use crate::crew::Crew;
use crate::events::EventBridge;
use std::collections::BTreeMap;
use thiserror::Error;

pub use command::CommandRuntime;
pub use mock::MockRuntime;

/// Failures reported by a delegate runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("runtime command is empty")]
    EmptyCommand,

    #[error("failed to parse runtime command '{command}': {reason}")]
    InvalidCommand { command: String, reason: String },

    #[error("failed to start runtime '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to communicate with runtime '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("runtime '{program}' exited with {status}")]
    Exited { program: String, status: String },

    #[error("failed to serialize crew payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The runtime ran but reported a failure of its own.
    #[error("{0}")]
    Failed(String),
}

/// The seam to an orchestration engine.
pub trait DelegateRuntime {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Execute the crew to completion and return the final artifact.
    fn kickoff(&mut self, crew: &Crew, events: &mut EventBridge) -> Result<String, RuntimeError>;
}

/// Where the runtime comes from, after merging CLI, environment and project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSelection {
    pub command: Option<String>,
    pub environment: BTreeMap<String, String>,
    pub force_mock: bool,
}

/// Build the runtime described by `selection`.
///
/// Without a (non-blank) command, or with `force_mock`, the mock runtime is used.
pub fn select_runtime(selection: RuntimeSelection) -> Box<dyn DelegateRuntime> {
    let command = selection
        .command
        .filter(|c| !c.trim().is_empty())
        .filter(|_| !selection.force_mock);

    match command {
        Some(command) => {
            eprintln!("[crewbridge] Using runtime command: {}", command);
            Box::new(CommandRuntime::new(command).with_environment(selection.environment))
        }
        None => {
            if selection.force_mock {
                eprintln!("[crewbridge] Using mock runtime (--mock)");
            } else {
                eprintln!("[crewbridge] No runtime command configured; using mock runtime");
            }
            Box::new(MockRuntime::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_runtime_without_command_is_mock() {
        let runtime = select_runtime(RuntimeSelection::default());
        assert_eq!(runtime.name(), "mock");
    }

    #[test]
    fn test_select_runtime_blank_command_is_mock() {
        let runtime = select_runtime(RuntimeSelection {
            command: Some("   ".to_string()),
            ..RuntimeSelection::default()
        });
        assert_eq!(runtime.name(), "mock");
    }

    #[test]
    fn test_select_runtime_with_command() {
        let runtime = select_runtime(RuntimeSelection {
            command: Some("python3 engine.py".to_string()),
            ..RuntimeSelection::default()
        });
        assert_eq!(runtime.name(), "command");
    }

    #[test]
    fn test_force_mock_wins() {
        let runtime = select_runtime(RuntimeSelection {
            command: Some("python3 engine.py".to_string()),
            force_mock: true,
            ..RuntimeSelection::default()
        });
        assert_eq!(runtime.name(), "mock");
    }

    #[test]
    fn test_runtime_error_messages() {
        let err = RuntimeError::Exited {
            program: "engine".to_string(),
            status: "exit status: 3".to_string(),
        };
        assert_eq!(err.to_string(), "runtime 'engine' exited with exit status: 3");
        assert_eq!(RuntimeError::EmptyCommand.to_string(), "runtime command is empty");
    }
}
