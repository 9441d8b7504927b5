//! Dry-run runtime.

use super::{DelegateRuntime, RuntimeError};
use crate::crew::Crew;
use crate::events::{Event, EventBridge};

/// Walks the task graph in execution order and reports every task as done.
///
/// Nothing is delegated and no files are written. Useful for checking a crew
/// definition and for exercising the event stream end to end.
#[derive(Debug, Default)]
pub struct MockRuntime;

impl MockRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl DelegateRuntime for MockRuntime {
    fn name(&self) -> &str {
        "mock"
    }

    fn kickoff(&mut self, crew: &Crew, events: &mut EventBridge) -> Result<String, RuntimeError> {
        let mut lines = Vec::with_capacity(crew.tasks.len());
        for (step, node) in crew.tasks.execution_order().enumerate() {
            let description = node.spec.description.as_str();
            let role = crew.agent_role(node.position);

            events.emit(Event::task_start(description, role));
            if let Some(role) = role {
                let upstream: Vec<&str> = crew
                    .tasks
                    .dependencies_of(node.position)
                    .map(|dep| dep.spec.description.as_str())
                    .collect();
                let action = if upstream.is_empty() {
                    "dry run: no delegation".to_string()
                } else {
                    format!("dry run: no delegation, context from {}", upstream.join(", "))
                };
                events.emit(Event::agent_action(role, &action));
            }
            let output = format!("{}: completed", description);
            events.emit(Event::task_complete(description, &output));

            lines.push(format!("{}. {}", step + 1, output));
        }

        Ok(format!(
            "Crew '{}' completed.\n\nResults:\n{}\n\nFinal output:\n\
             This is a dry-run result; no delegate runtime was invoked.",
            crew.name,
            lines.join("\n")
        ))
    }
}
