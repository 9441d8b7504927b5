//! The terminal record written to the primary channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tokens assumed per whitespace-separated word of output.
const TOKENS_PER_WORD: f64 = 1.3;

/// Cost assumed per estimated token.
const COST_PER_TOKEN: f64 = 0.00002;

/// Outcome of one execution.
///
/// Success records carry `result` and the aggregate fields; failure records
/// carry only `error` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl ExecutionResult {
    pub fn success(result: String, agents_count: usize, tasks_count: usize) -> Self {
        let usage = UsageEstimate::from_text(&result);
        Self {
            success: true,
            result: Some(result),
            error: None,
            timestamp: Utc::now(),
            agents_count: Some(agents_count),
            tasks_count: Some(tasks_count),
            token_usage: Some(usage.tokens),
            cost: Some(usage.cost),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
            agents_count: None,
            tasks_count: None,
            token_usage: None,
            cost: None,
        }
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Rough token and cost estimate derived from the artifact text alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageEstimate {
    pub tokens: u64,
    pub cost: f64,
}

impl UsageEstimate {
    pub fn from_text(text: &str) -> Self {
        let words = text.split_whitespace().count() as f64;
        let tokens = words * TOKENS_PER_WORD;
        Self {
            tokens: tokens as u64,
            cost: round_to(tokens * COST_PER_TOKEN, 4),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
