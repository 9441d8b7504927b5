//! The materialized crew handed to a delegate runtime.
//!
//! A [`Crew`] is built either from a stdin request ([`Crew::from_request`]) or
//! from YAML project files (`config::CrewProject::build_crew`). Both paths end
//! in the same validated [`TaskGraph`].

use crate::graph::{self, GraphError, TaskGraph};
use crate::request::{AgentSpec, CrewRequest, LlmConfig, ProcessMode};
use crate::template::{TemplateError, render_template};
use crate::tools::{self, CapabilityTool};
use serde::Serialize;
use std::collections::BTreeMap;

/// A crew ready for kickoff.
#[derive(Debug, Clone, PartialEq)]
pub struct Crew {
    pub name: String,
    pub process: ProcessMode,
    pub verbose: bool,
    pub memory: bool,
    pub planning: bool,
    /// Only kept for hierarchical crews.
    pub manager_llm: Option<LlmConfig>,
    /// Only kept for hierarchical crews.
    pub manager_agent: Option<AgentSpec>,
    pub agents: Vec<AgentSpec>,
    pub tasks: TaskGraph,
    pub inputs: BTreeMap<String, String>,
}

/// A crew plus the notes produced while building it.
#[derive(Debug)]
pub struct PreparedCrew {
    pub crew: Crew,
    pub warnings: Vec<String>,
}

impl Crew {
    /// Materialize a request into a crew.
    ///
    /// The process mode is resolved here; a downgrade is returned as a warning
    /// for the caller to emit.
    pub fn from_request(request: CrewRequest) -> Result<PreparedCrew, GraphError> {
        let name = request.crew_name();
        let tasks = graph::materialize(&request.tasks, request.agents.len())?;
        let resolved = ProcessMode::resolve(request.process.as_deref());
        let hierarchical = resolved.mode == ProcessMode::Hierarchical;

        let crew = Crew {
            name,
            process: resolved.mode,
            verbose: request.verbose,
            memory: request.memory,
            planning: request.planning,
            manager_llm: request.manager_llm_config.filter(|_| hierarchical),
            manager_agent: request.manager_agent.filter(|_| hierarchical),
            agents: request.agents,
            tasks,
            inputs: request.inputs,
        };

        Ok(PreparedCrew {
            crew,
            warnings: resolved.warning.into_iter().collect(),
        })
    }

    /// Substitute kickoff inputs into agent role, goal and backstory, and into
    /// every task's text and output path.
    ///
    /// A crew without inputs is left untouched, so literal braces need no
    /// escaping unless inputs are supplied.
    pub fn interpolate_inputs(&mut self) -> Result<(), TemplateError> {
        if self.inputs.is_empty() {
            return Ok(());
        }

        let inputs = &self.inputs;
        for agent in &mut self.agents {
            agent.role = render_template(&agent.role, inputs)?;
            agent.goal = render_template(&agent.goal, inputs)?;
            agent.backstory = render_template(&agent.backstory, inputs)?;
        }
        for spec in self.tasks.specs_mut() {
            spec.description = render_template(&spec.description, inputs)?;
            spec.expected_output = render_template(&spec.expected_output, inputs)?;
            if let Some(path) = spec.output_file.as_mut() {
                *path = render_template(path, inputs)?;
            }
        }
        Ok(())
    }

    /// Role of the agent bound to task `position`.
    pub fn agent_role(&self, position: usize) -> Option<&str> {
        let node = self.tasks.node(position)?;
        self.agents.get(node.agent).map(|a| a.role.as_str())
    }

    /// Catalog entries for every known tool referenced by an agent.
    pub fn referenced_tools(&self) -> Vec<&'static CapabilityTool> {
        let mut found: Vec<&'static CapabilityTool> = Vec::new();
        for name in self.agents.iter().flat_map(|a| a.tools.iter()) {
            if let Some(tool) = tools::lookup(name)
                && !found.iter().any(|t| t.name == tool.name)
            {
                found.push(tool);
            }
        }
        found
    }

    /// The JSON document sent to an external runtime.
    pub fn payload(&self) -> CrewPayload<'_> {
        CrewPayload {
            name: &self.name,
            process: self.process,
            verbose: self.verbose,
            memory: self.memory,
            planning: self.planning,
            manager_llm: self.manager_llm.as_ref(),
            manager_agent: self.manager_agent.as_ref(),
            agents: &self.agents,
            tasks: self
                .tasks
                .nodes()
                .iter()
                .map(|node| TaskPayload {
                    description: &node.spec.description,
                    expected_output: &node.spec.expected_output,
                    agent: node.agent,
                    context: &node.dependencies,
                    output_file: node.spec.output_file.as_deref(),
                    human_input: node.spec.human_input,
                    async_execution: node.spec.async_execution,
                })
                .collect(),
            execution_order: self.tasks.execution_order().map(|n| n.position).collect(),
            inputs: &self.inputs,
            tools: self.referenced_tools(),
        }
    }
}

/// Serialized form of a [`Crew`].
#[derive(Debug, Serialize)]
pub struct CrewPayload<'a> {
    pub name: &'a str,
    pub process: ProcessMode,
    pub verbose: bool,
    pub memory: bool,
    pub planning: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_llm: Option<&'a LlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_agent: Option<&'a AgentSpec>,
    pub agents: &'a [AgentSpec],
    pub tasks: Vec<TaskPayload<'a>>,
    pub execution_order: Vec<usize>,
    pub inputs: &'a BTreeMap<String, String>,
    pub tools: Vec<&'static CapabilityTool>,
}

/// A task with its resolved agent position and dependency positions.
#[derive(Debug, Serialize)]
pub struct TaskPayload<'a> {
    pub description: &'a str,
    pub expected_output: &'a str,
    pub agent: usize,
    pub context: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<&'a str>,
    pub human_input: bool,
    pub async_execution: bool,
}
