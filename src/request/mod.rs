//! Request model for the stdio bridge.
//!
//! A [`CrewRequest`] is the single JSON object read from the primary channel.
//! Field names follow the camelCase wire format; unknown fields are ignored and
//! `null` is accepted wherever a field is optional or has a default.
//!
//! ```json
//! {
//!   "name": "Launch Campaign",
//!   "process": "sequential",
//!   "agents": [{ "role": "Writer", "goal": "Draft copy", "maxIter": 10 }],
//!   "tasks": [
//!     { "description": "Outline", "expectedOutput": "Bullet list" },
//!     { "description": "Script", "context": [0] }
//!   ]
//! }
//! ```

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    AgentSpec, CrewRequest, DEFAULT_CREW_NAME, LlmConfig, ProcessMode, ResolvedProcess, TaskSpec,
};
