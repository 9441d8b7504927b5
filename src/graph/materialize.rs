//! Two-pass materialization of positional task declarations.

use super::{GraphError, TaskGraph, TaskNode};
use crate::request::TaskSpec;

/// Materialize declared tasks against `agent_count` agents.
///
/// Pass one binds task `i` to agent `min(i, agent_count - 1)`: tasks beyond
/// the agent count all land on the last agent. Pass two attaches every
/// declared dependency index that falls inside `[0, N)`.
pub fn materialize(tasks: &[TaskSpec], agent_count: usize) -> Result<TaskGraph, GraphError> {
    if agent_count == 0 {
        return Err(GraphError::NoAgents);
    }
    if tasks.is_empty() {
        return Err(GraphError::NoTasks);
    }

    let last_agent = agent_count - 1;
    let mut nodes: Vec<TaskNode> = tasks
        .iter()
        .enumerate()
        .map(|(position, spec)| TaskNode::new(position, spec.clone(), position.min(last_agent)))
        .collect();

    let len = nodes.len();
    for (node, spec) in nodes.iter_mut().zip(tasks) {
        node.dependencies = resolve_dependency_indices(&spec.context, len);
    }

    TaskGraph::from_nodes(nodes, agent_count)
}

/// Keep the declared indices that address one of `len` tasks.
///
/// Negative and out-of-range indices are dropped; repeats collapse onto their
/// first occurrence.
pub fn resolve_dependency_indices(declared: &[i64], len: usize) -> Vec<usize> {
    let mut resolved: Vec<usize> = Vec::with_capacity(declared.len());
    for &index in declared {
        let Ok(index) = usize::try_from(index) else {
            continue;
        };
        if index < len && !resolved.contains(&index) {
            resolved.push(index);
        }
    }
    resolved
}
