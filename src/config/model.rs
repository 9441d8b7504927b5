//! Project file definitions and defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AGENTS_FILE: &str = "agents.yaml";
pub const TASKS_FILE: &str = "tasks.yaml";
pub const CREW_FILE: &str = "crew.yaml";

/// One agent declaration in `agents.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub role: String,

    pub goal: String,

    pub backstory: String,

    /// Capability tool names; unknown names are dropped when building a crew.
    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default = "default_true")]
    pub verbose: bool,

    #[serde(default)]
    pub allow_delegation: bool,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rpm: Option<u32>,

    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_execution_time: Option<u64>,
}

/// One task declaration in `tasks.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub description: String,

    pub expected_output: String,

    /// Identifier of the agent in `agents.yaml`.
    pub agent: String,

    /// Identifiers of earlier tasks whose output feeds this one.
    #[serde(default)]
    pub context: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(default)]
    pub human_input: bool,

    #[serde(default)]
    pub async_execution: bool,
}

/// Contents of `agents.yaml`, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentsFile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub agents: Vec<(String, AgentEntry)>,
}

/// Contents of `tasks.yaml`, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksFile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tasks: Vec<(String, TaskEntry)>,
}

/// How the delegate runtime is launched for this project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    /// Orchestrator command line. Without one the mock runtime is used.
    pub command: Option<String>,

    /// Extra environment variables for the orchestrator process.
    pub environment: BTreeMap<String, String>,
}

/// Contents of `crew.yaml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewFile {
    pub name: Option<String>,

    #[serde(default = "default_process")]
    pub process: String,

    #[serde(default = "default_true")]
    pub memory: bool,

    #[serde(default = "default_true")]
    pub verbose: bool,

    pub planning: bool,

    pub runtime: RuntimeSection,
}

impl Default for CrewFile {
    fn default() -> Self {
        Self {
            name: None,
            process: default_process(),
            memory: true,
            verbose: true,
            planning: false,
            runtime: RuntimeSection::default(),
        }
    }
}

/// A loaded and validated project directory.
#[derive(Debug, Clone)]
pub struct CrewProject {
    pub agents: AgentsFile,
    pub tasks: TasksFile,
    pub crew: CrewFile,
}

fn default_true() -> bool {
    true
}

fn default_max_iterations() -> u32 {
    5
}

fn default_process() -> String {
    "sequential".to_string()
}
