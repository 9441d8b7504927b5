//! Tests for task graph materialization.

use super::*;
use crate::request::TaskSpec;
use crate::test_support::task;

fn descriptions<'a>(nodes: impl Iterator<Item = &'a TaskNode>) -> Vec<&'a str> {
    nodes.map(|n| n.spec.description.as_str()).collect()
}

#[test]
fn test_agent_assignment_follows_min_rule() {
    let tasks = vec![task("T0", &[]), task("T1", &[]), task("T2", &[0])];
    let graph = materialize(&tasks, 2).unwrap();

    let agents: Vec<usize> = graph.nodes().iter().map(|n| n.agent).collect();
    assert_eq!(agents, vec![0, 1, 1]);
    assert_eq!(descriptions(graph.dependencies_of(2)), vec!["T0"]);
    assert!(graph.node(0).unwrap().dependencies.is_empty());
    assert!(graph.node(1).unwrap().dependencies.is_empty());
}

#[test]
fn test_agent_assignment_for_every_shape() {
    for agent_count in 1..=4 {
        for task_count in 1..=6 {
            let tasks: Vec<TaskSpec> = (0..task_count)
                .map(|i| task(&format!("T{}", i), &[]))
                .collect();
            let graph = materialize(&tasks, agent_count).unwrap();

            for node in graph.nodes() {
                assert_eq!(
                    node.agent,
                    node.position.min(agent_count - 1),
                    "tasks={} agents={} position={}",
                    task_count,
                    agent_count,
                    node.position
                );
            }
        }
    }
}

#[test]
fn test_single_agent_takes_every_task() {
    let tasks = vec![task("a", &[]), task("b", &[]), task("c", &[])];
    let graph = materialize(&tasks, 1).unwrap();
    assert!(graph.nodes().iter().all(|n| n.agent == 0));
}

#[test]
fn test_more_agents_than_tasks() {
    let tasks = vec![task("a", &[]), task("b", &[])];
    let graph = materialize(&tasks, 5).unwrap();
    let agents: Vec<usize> = graph.nodes().iter().map(|n| n.agent).collect();
    assert_eq!(agents, vec![0, 1]);
}

#[test]
fn test_out_of_range_index_is_dropped() {
    let graph = materialize(&[task("T0", &[5])], 1).unwrap();
    assert!(graph.node(0).unwrap().dependencies.is_empty());
}

#[test]
fn test_negative_index_is_dropped() {
    let tasks = vec![task("T0", &[]), task("T1", &[-1, 0, i64::MIN])];
    let graph = materialize(&tasks, 1).unwrap();
    assert_eq!(graph.node(1).unwrap().dependencies, vec![0]);
}

#[test]
fn test_only_in_range_indices_survive() {
    let declared: [i64; 7] = [3, -2, 0, 7, 2, 100, 1];
    let resolved = resolve_dependency_indices(&declared, 4);
    assert_eq!(resolved, vec![3, 0, 2, 1]);
    assert!(resolved.iter().all(|&i| i < 4));
}

#[test]
fn test_duplicate_indices_collapse() {
    assert_eq!(resolve_dependency_indices(&[1, 0, 1, 0], 2), vec![1, 0]);
}

#[test]
fn test_declared_order_of_dependencies_is_kept() {
    let tasks = vec![task("a", &[]), task("b", &[]), task("c", &[1, 0])];
    let graph = materialize(&tasks, 3).unwrap();
    assert_eq!(descriptions(graph.dependencies_of(2)), vec!["b", "a"]);
}

#[test]
fn test_empty_inputs_fail() {
    assert_eq!(materialize(&[], 2), Err(GraphError::NoTasks));
    assert_eq!(materialize(&[task("a", &[])], 0), Err(GraphError::NoAgents));
    assert_eq!(materialize(&[], 0), Err(GraphError::NoAgents));
}

#[test]
fn test_error_messages_match_failure_records() {
    assert_eq!(GraphError::NoAgents.to_string(), "No agents provided");
    assert_eq!(GraphError::NoTasks.to_string(), "No tasks provided");
}

#[test]
fn test_forward_reference_resolves() {
    let tasks = vec![task("publish", &[1]), task("render", &[])];
    let graph = materialize(&tasks, 1).unwrap();

    assert_eq!(descriptions(graph.dependencies_of(0)), vec!["render"]);
    assert_eq!(descriptions(graph.execution_order()), vec!["render", "publish"]);
}

#[test]
fn test_backward_links_run_in_declared_order() {
    let tasks = vec![
        task("T0", &[]),
        task("T1", &[0]),
        task("T2", &[]),
        task("T3", &[1, 2]),
    ];
    let graph = materialize(&tasks, 2).unwrap();
    assert_eq!(descriptions(graph.execution_order()), vec!["T0", "T1", "T2", "T3"]);
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let err = materialize(&[task("loop", &[0])], 1).unwrap_err();
    assert_eq!(err, GraphError::Cycle { tasks: vec![0] });
}

#[test]
fn test_cycle_reports_unresolvable_tasks() {
    let tasks = vec![
        task("free", &[]),
        task("a", &[2]),
        task("b", &[1]),
        task("downstream", &[2]),
    ];
    let err = materialize(&tasks, 1).unwrap_err();

    assert_eq!(err, GraphError::Cycle { tasks: vec![1, 2, 3] });
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn test_from_nodes_rejects_bad_agent() {
    let nodes = vec![TaskNode::new(0, task("a", &[]), 3)];
    let err = TaskGraph::from_nodes(nodes, 2).unwrap_err();
    assert_eq!(
        err,
        GraphError::AgentOutOfRange {
            task: 0,
            agent: 3,
            agent_count: 2
        }
    );
}

#[test]
fn test_from_nodes_rejects_dangling_link() {
    let nodes = vec![TaskNode::new(0, task("a", &[]), 0).with_dependencies(vec![4])];
    let err = TaskGraph::from_nodes(nodes, 1).unwrap_err();
    assert_eq!(
        err,
        GraphError::DependencyOutOfRange {
            task: 0,
            dependency: 4
        }
    );
}

#[test]
fn test_from_nodes_renumbers_positions() {
    let nodes = vec![
        TaskNode::new(7, task("a", &[]), 0),
        TaskNode::new(9, task("b", &[]), 0).with_dependencies(vec![0]),
    ];
    let graph = TaskGraph::from_nodes(nodes, 1).unwrap();
    let positions: Vec<usize> = graph.nodes().iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![0, 1]);
}

#[test]
fn test_specs_mut_keeps_links() {
    let tasks = vec![task("a", &[]), task("b", &[0])];
    let mut graph = materialize(&tasks, 1).unwrap();

    for spec in graph.specs_mut() {
        spec.description.push_str("!");
    }

    assert_eq!(descriptions(graph.dependencies_of(1)), vec!["a!"]);
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_dependencies_of_unknown_position_is_empty() {
    let graph = materialize(&[task("a", &[])], 1).unwrap();
    assert_eq!(graph.dependencies_of(10).count(), 0);
}
