//! Task graph materialization.
//!
//! Declared tasks reference their dependencies by position in the declared
//! list. Materialization turns those positions into a validated graph:
//!
//! - **Pass one** creates one [`TaskNode`] per declaration and binds it to an
//!   agent by position (`min(position, agent_count - 1)`).
//! - **Pass two** resolves each declared index in `[0, N)` into an edge to the
//!   node at that position. Everything else is dropped without error.
//!
//! Nodes live in an arena and edges are node positions, so forward references
//! resolve exactly like backward ones. The finished graph is checked for
//! cycles and carries a deterministic topological execution order.

mod materialize;
mod order;

#[cfg(test)]
mod tests;

use crate::request::TaskSpec;
use thiserror::Error;

pub use materialize::{materialize, resolve_dependency_indices};

/// Errors raised while building a task graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No agents provided")]
    NoAgents,

    #[error("No tasks provided")]
    NoTasks,

    /// A node is bound to an agent position that does not exist.
    #[error("task {task} is assigned to agent {agent}, but only {agent_count} agent(s) exist")]
    AgentOutOfRange {
        task: usize,
        agent: usize,
        agent_count: usize,
    },

    /// A node links to a position outside the graph.
    #[error("task {task} depends on task {dependency}, which does not exist")]
    DependencyOutOfRange { task: usize, dependency: usize },

    /// Some tasks can never become ready.
    #[error("task dependencies form a cycle; unresolvable tasks: {tasks:?}")]
    Cycle { tasks: Vec<usize> },
}

/// A task with its agent binding and resolved dependency links.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    /// Position in the declared task list.
    pub position: usize,

    pub spec: TaskSpec,

    /// Position of the assigned agent.
    pub agent: usize,

    /// Positions of the nodes this task depends on, in declared order.
    pub dependencies: Vec<usize>,
}

impl TaskNode {
    pub fn new(position: usize, spec: TaskSpec, agent: usize) -> Self {
        Self {
            position,
            spec,
            agent,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<usize>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// A validated, acyclic task graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    order: Vec<usize>,
}

impl TaskGraph {
    /// Validate a set of linked nodes and compute their execution order.
    ///
    /// Node positions are reassigned to match their index in `nodes`.
    pub fn from_nodes(mut nodes: Vec<TaskNode>, agent_count: usize) -> Result<Self, GraphError> {
        if agent_count == 0 {
            return Err(GraphError::NoAgents);
        }
        if nodes.is_empty() {
            return Err(GraphError::NoTasks);
        }

        let len = nodes.len();
        for (position, node) in nodes.iter_mut().enumerate() {
            node.position = position;
            if node.agent >= agent_count {
                return Err(GraphError::AgentOutOfRange {
                    task: position,
                    agent: node.agent,
                    agent_count,
                });
            }
            if let Some(&dependency) = node.dependencies.iter().find(|&&d| d >= len) {
                return Err(GraphError::DependencyOutOfRange {
                    task: position,
                    dependency,
                });
            }
        }

        let order = order::topological_order(&nodes)?;
        Ok(Self { nodes, order })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in declared order.
    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    pub fn node(&self, position: usize) -> Option<&TaskNode> {
        self.nodes.get(position)
    }

    /// The nodes `position` depends on.
    pub fn dependencies_of(&self, position: usize) -> impl Iterator<Item = &TaskNode> {
        self.nodes
            .get(position)
            .map(|node| node.dependencies.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&d| &self.nodes[d])
    }

    /// Nodes in an order where every dependency precedes its dependents.
    ///
    /// Among ready nodes the lowest declared position goes first, so a graph
    /// whose links all point backwards runs in declared order.
    pub fn execution_order(&self) -> impl Iterator<Item = &TaskNode> {
        self.order.iter().map(|&i| &self.nodes[i])
    }

    /// Mutable access to the task specs. Links and bindings stay fixed.
    pub fn specs_mut(&mut self) -> impl Iterator<Item = &mut TaskSpec> {
        self.nodes.iter_mut().map(|node| &mut node.spec)
    }
}
