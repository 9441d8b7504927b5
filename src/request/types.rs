//! Agent, task and crew declarations.

use crate::events::CallbackSettings;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const DEFAULT_ROLE: &str = "Assistant";
const DEFAULT_GOAL: &str = "Complete the assigned task";
const DEFAULT_BACKSTORY: &str = "An experienced professional";
const DEFAULT_EXPECTED_OUTPUT: &str = "A detailed response";
const DEFAULT_MAX_ITER: u32 = 15;

/// Crew name used when the request does not carry one.
pub const DEFAULT_CREW_NAME: &str = "Unnamed Crew";

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`], for fields whose default is not `T::default()`.
fn null_or<'de, D, T>(deserializer: D, default: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(default))
}

fn null_or_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    null_or(deserializer, default_role)
}

fn null_or_goal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    null_or(deserializer, default_goal)
}

fn null_or_backstory<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    null_or(deserializer, default_backstory)
}

fn null_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    null_or(deserializer, default_true)
}

fn null_or_max_iter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    null_or(deserializer, default_max_iter)
}

fn null_or_expected_output<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    null_or(deserializer, default_expected_output)
}

/// LLM settings forwarded untouched to the delegate runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(
        default,
        alias = "maxTokens",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_tokens: Option<u32>,

    /// Provider-specific keys preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One delegate worker.
///
/// Deserialized from camelCase, serialized as snake_case for the runtime payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct AgentSpec {
    #[serde(default = "default_role", deserialize_with = "null_or_role")]
    pub role: String,

    #[serde(default = "default_goal", deserialize_with = "null_or_goal")]
    pub goal: String,

    #[serde(default = "default_backstory", deserialize_with = "null_or_backstory")]
    pub backstory: String,

    /// Capability tool names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<String>,

    #[serde(default = "default_true", deserialize_with = "null_or_true")]
    pub verbose: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_delegation: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_config: Option<LlmConfig>,

    #[serde(default = "default_max_iter", deserialize_with = "null_or_max_iter")]
    pub max_iter: u32,

    /// Recorded only; nothing in this layer enforces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rpm: Option<u32>,

    /// Seconds. Recorded only; nothing in this layer enforces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_execution_time: Option<u64>,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_goal() -> String {
    DEFAULT_GOAL.to_string()
}

fn default_backstory() -> String {
    DEFAULT_BACKSTORY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_iter() -> u32 {
    DEFAULT_MAX_ITER
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            role: default_role(),
            goal: default_goal(),
            backstory: default_backstory(),
            tools: Vec::new(),
            verbose: true,
            allow_delegation: false,
            memory: false,
            llm_config: None,
            max_iter: DEFAULT_MAX_ITER,
            max_rpm: None,
            max_execution_time: None,
        }
    }
}

/// One unit of work.
///
/// `context` holds positional indices into the declared task list. Indices are
/// signed so that negative values are dropped during materialization rather
/// than rejected while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TaskSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(
        default = "default_expected_output",
        deserialize_with = "null_or_expected_output"
    )]
    pub expected_output: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Vec<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub human_input: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub async_execution: bool,
}

fn default_expected_output() -> String {
    DEFAULT_EXPECTED_OUTPUT.to_string()
}

impl Default for TaskSpec {
    fn default() -> Self {
        Self {
            description: String::new(),
            expected_output: default_expected_output(),
            context: Vec::new(),
            output_file: None,
            human_input: false,
            async_execution: false,
        }
    }
}

/// The full request read from the primary channel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// Raw process mode; see [`ProcessMode::resolve`].
    #[serde(default)]
    pub process: Option<String>,

    #[serde(default = "default_true", deserialize_with = "null_or_true")]
    pub verbose: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub planning: bool,

    #[serde(default)]
    pub manager_llm_config: Option<LlmConfig>,

    #[serde(default)]
    pub manager_agent: Option<AgentSpec>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub callbacks: CallbackSettings,

    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<AgentSpec>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<TaskSpec>,

    /// Kickoff inputs substituted into `{name}` placeholders.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: BTreeMap<String, String>,
}

impl CrewRequest {
    /// Parse a request from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// The crew name, or [`DEFAULT_CREW_NAME`] when absent or blank.
    pub fn crew_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CREW_NAME)
            .to_string()
    }
}

/// Process modes the delegate runtime supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessMode {
    #[default]
    Sequential,
    Hierarchical,
}

/// Outcome of resolving a requested process string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProcess {
    pub mode: ProcessMode,
    /// Set when the requested mode was replaced.
    pub warning: Option<String>,
}

impl ProcessMode {
    /// Resolve a requested process string.
    ///
    /// `consensual` and unrecognized modes fall back to sequential with a
    /// warning. A missing mode is sequential without one.
    pub fn resolve(requested: Option<&str>) -> ResolvedProcess {
        let Some(raw) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return ResolvedProcess {
                mode: ProcessMode::Sequential,
                warning: None,
            };
        };

        match raw.to_ascii_lowercase().as_str() {
            "sequential" => ResolvedProcess {
                mode: ProcessMode::Sequential,
                warning: None,
            },
            "hierarchical" => ResolvedProcess {
                mode: ProcessMode::Hierarchical,
                warning: None,
            },
            "consensual" => ResolvedProcess {
                mode: ProcessMode::Sequential,
                warning: Some(
                    "Consensual process not yet supported, using sequential".to_string(),
                ),
            },
            _ => ResolvedProcess {
                mode: ProcessMode::Sequential,
                warning: Some(format!(
                    "Unknown process '{}', using sequential",
                    raw
                )),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessMode::Sequential => "sequential",
            ProcessMode::Hierarchical => "hierarchical",
        }
    }
}
