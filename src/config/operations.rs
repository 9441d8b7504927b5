//! Project loading, validation, and crew building.

use super::model::*;
use crate::crew::{Crew, PreparedCrew};
use crate::error::{BridgeError, Result};
use crate::graph::{TaskGraph, TaskNode};
use crate::request::{AgentSpec, DEFAULT_CREW_NAME, ProcessMode, TaskSpec};
use crate::tools;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Process strings accepted in `crew.yaml`.
const KNOWN_PROCESSES: &[&str] = &["sequential", "hierarchical", "consensual"];

/// Top-level `name`/`description` keys carried alongside the entries.
#[derive(Default)]
struct Metadata {
    name: Option<String>,
    description: Option<String>,
}

/// Parse a mapping of identifier → entry, keeping declaration order.
///
/// String-valued `name` and `description` keys are metadata, not entries.
fn parse_entries<T: DeserializeOwned>(
    yaml: &str,
    file: &str,
) -> Result<(Metadata, Vec<(String, T)>)> {
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| BridgeError::ConfigError(format!("failed to parse {}: {}", file, e)))?;

    let mapping = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(BridgeError::ConfigError(format!(
                "{}: expected a mapping of identifiers to entries",
                file
            )));
        }
    };

    let mut metadata = Metadata::default();
    let mut entries = Vec::new();
    for (key, value) in mapping {
        let Some(id) = key.as_str().map(str::to_string) else {
            return Err(BridgeError::ConfigError(format!(
                "{}: entry identifiers must be strings (found {:?})",
                file, key
            )));
        };

        if let Some(text) = value.as_str() {
            match id.as_str() {
                "name" => {
                    metadata.name = Some(text.to_string());
                    continue;
                }
                "description" => {
                    metadata.description = Some(text.to_string());
                    continue;
                }
                _ => {}
            }
        }

        let entry = serde_yaml::from_value(value)
            .map_err(|e| BridgeError::ConfigError(format!("{}: entry '{}': {}", file, id, e)))?;
        entries.push((id, entry));
    }

    Ok((metadata, entries))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        BridgeError::UserError(format!(
            "failed to read project file '{}': {}",
            path.display(),
            e
        ))
    })
}

impl AgentsFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let (metadata, agents) = parse_entries(yaml, AGENTS_FILE)?;
        let file = Self {
            name: metadata.name,
            description: metadata.description,
            agents,
        };
        file.validate()?;
        Ok(file)
    }

    /// Validation rules:
    /// - at least one agent
    /// - `role` and `goal` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.agents.is_empty() {
            return Err(BridgeError::ConfigError(format!(
                "{}: no agents declared",
                AGENTS_FILE
            )));
        }
        for (id, agent) in &self.agents {
            if agent.role.trim().is_empty() {
                return Err(BridgeError::ConfigError(format!(
                    "{}: agent '{}' has an empty role",
                    AGENTS_FILE, id
                )));
            }
            if agent.goal.trim().is_empty() {
                return Err(BridgeError::ConfigError(format!(
                    "{}: agent '{}' has an empty goal",
                    AGENTS_FILE, id
                )));
            }
        }
        Ok(())
    }

    /// Position of the agent declared under `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.agents.iter().position(|(agent_id, _)| agent_id == id)
    }
}

impl TasksFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let (metadata, tasks) = parse_entries(yaml, TASKS_FILE)?;
        let file = Self {
            name: metadata.name,
            description: metadata.description,
            tasks,
        };
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(BridgeError::ConfigError(format!(
                "{}: no tasks declared",
                TASKS_FILE
            )));
        }
        Ok(())
    }
}

impl CrewFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let crew: CrewFile = serde_yaml::from_str(yaml).map_err(|e| {
            BridgeError::ConfigError(format!("failed to parse {}: {}", CREW_FILE, e))
        })?;
        crew.validate()?;
        Ok(crew)
    }

    pub fn validate(&self) -> Result<()> {
        let process = self.process.trim().to_ascii_lowercase();
        if !KNOWN_PROCESSES.contains(&process.as_str()) {
            return Err(BridgeError::ConfigError(format!(
                "{}: unknown process '{}' (expected one of: {})",
                CREW_FILE,
                self.process,
                KNOWN_PROCESSES.join(", ")
            )));
        }
        Ok(())
    }
}

impl AgentEntry {
    /// Convert to the runtime representation, dropping tools not in the catalog.
    fn to_spec(&self, id: &str, warnings: &mut Vec<String>) -> AgentSpec {
        let mut tools = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            if tools::lookup(tool).is_some() {
                tools.push(tool.clone());
            } else {
                warnings.push(format!(
                    "Agent '{}' references unknown tool '{}'; ignored",
                    id, tool
                ));
            }
        }

        AgentSpec {
            role: self.role.clone(),
            goal: self.goal.clone(),
            backstory: self.backstory.clone(),
            tools,
            verbose: self.verbose,
            allow_delegation: self.allow_delegation,
            max_iter: self.max_iterations,
            max_rpm: self.max_rpm,
            max_execution_time: self.max_execution_time,
            ..AgentSpec::default()
        }
    }
}

impl TaskEntry {
    fn to_spec(&self) -> TaskSpec {
        TaskSpec {
            description: self.description.clone(),
            expected_output: self.expected_output.clone(),
            context: Vec::new(),
            output_file: self.output_file.clone(),
            human_input: self.human_input,
            async_execution: self.async_execution,
        }
    }
}

impl CrewProject {
    /// Load a project directory.
    ///
    /// `agents.yaml` and `tasks.yaml` are required; `crew.yaml` is optional.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let agents = AgentsFile::from_yaml(&read_file(&dir.join(AGENTS_FILE))?)?;
        let tasks = TasksFile::from_yaml(&read_file(&dir.join(TASKS_FILE))?)?;

        let crew_path = dir.join(CREW_FILE);
        let crew = if crew_path.is_file() {
            CrewFile::from_yaml(&read_file(&crew_path)?)?
        } else {
            CrewFile::default()
        };

        Ok(Self {
            agents,
            tasks,
            crew,
        })
    }

    /// Crew name: `crew.yaml`, then the `agents.yaml` metadata, then the default.
    pub fn crew_name(&self) -> String {
        [self.crew.name.as_deref(), self.agents.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CREW_NAME)
            .to_string()
    }

    /// Materialize the project into a crew with the given kickoff inputs.
    ///
    /// Tasks are bound to agents by id. Context ids resolve only to tasks
    /// declared earlier; anything else is dropped with a warning.
    pub fn build_crew(&self, inputs: BTreeMap<String, String>) -> Result<PreparedCrew> {
        let mut warnings = Vec::new();

        let agents: Vec<AgentSpec> = self
            .agents
            .agents
            .iter()
            .map(|(id, entry)| entry.to_spec(id, &mut warnings))
            .collect();

        let mut declared: HashMap<&str, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(self.tasks.tasks.len());
        for (position, (id, entry)) in self.tasks.tasks.iter().enumerate() {
            let agent = self.agents.position(&entry.agent).ok_or_else(|| {
                BridgeError::ConfigError(format!(
                    "{}: task '{}' references unknown agent '{}'",
                    TASKS_FILE, id, entry.agent
                ))
            })?;

            let mut dependencies = Vec::new();
            for context_id in &entry.context {
                match declared.get(context_id.as_str()) {
                    Some(&dependency) => {
                        if !dependencies.contains(&dependency) {
                            dependencies.push(dependency);
                        }
                    }
                    None => warnings.push(format!(
                        "Task '{}' context '{}' is not an earlier task; ignored",
                        id, context_id
                    )),
                }
            }

            nodes.push(TaskNode::new(position, entry.to_spec(), agent).with_dependencies(dependencies));
            declared.insert(id.as_str(), position);
        }

        let tasks = TaskGraph::from_nodes(nodes, agents.len())
            .map_err(|e| BridgeError::ConfigError(e.to_string()))?;

        let resolved = ProcessMode::resolve(Some(&self.crew.process));
        warnings.extend(resolved.warning);

        let crew = Crew {
            name: self.crew_name(),
            process: resolved.mode,
            verbose: self.crew.verbose,
            memory: self.crew.memory,
            planning: self.crew.planning,
            manager_llm: None,
            manager_agent: None,
            agents,
            tasks,
            inputs,
        };

        Ok(PreparedCrew { crew, warnings })
    }
}
