use super::{GraphError, TaskNode};
use std::collections::BTreeSet;

/// Kahn's algorithm with a position-ordered ready set.
///
/// Fails with the positions that never became ready when the links contain a
/// cycle (a self-link counts).
pub(super) fn topological_order(nodes: &[TaskNode]) -> Result<Vec<usize>, GraphError> {
    let len = nodes.len();
    let mut pending = vec![0usize; len];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); len];

    for node in nodes {
        for &dependency in &node.dependencies {
            pending[node.position] += 1;
            dependents[dependency].push(node.position);
        }
    }

    let mut ready: BTreeSet<usize> = (0..len).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(len);

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &dependent in &dependents[next] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() < len {
        let tasks = (0..len).filter(|&i| pending[i] > 0).collect();
        return Err(GraphError::Cycle { tasks });
    }

    Ok(order)
}
