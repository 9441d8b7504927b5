//! Lifecycle event bridge for crewbridge.
//!
//! Every significant transition of a crew execution is described by an
//! [`Event`] and handed to an [`EventBridge`], which fans it out to a set of
//! [`EventSink`]s. Emission is fire-and-forget: a sink that fails to write
//! swallows the failure so the primary execution path is never aborted.
//!
//! # Event Format
//!
//! Each event is a single-line JSON object:
//! - `type`: one of `crew_start`, `task_start`, `task_complete`,
//!   `agent_action`, `warning`, `error`, `crew_complete`
//! - `data`: freeform object with kind-specific details
//! - `timestamp`: RFC3339 timestamp
//!
//! On the stdio side channel each line is prefixed with [`EVENT_MARKER`]:
//!
//! ```text
//! [EVENT] {"type":"crew_start","data":{"name":"Launch"},"timestamp":"2026-01-01T00:00:00Z"}
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Marker prefixed to every event line on the side channel.
pub const EVENT_MARKER: &str = "[EVENT]";

/// The closed set of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Crew execution is about to be handed to the runtime.
    CrewStart,
    /// A task was picked up by its agent.
    TaskStart,
    /// A task produced its output.
    TaskComplete,
    /// An agent performed an intermediate action.
    AgentAction,
    /// Something was adjusted or ignored, execution continues.
    Warning,
    /// Execution failed.
    Error,
    /// The runtime returned a final artifact.
    CrewComplete,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::CrewStart => write!(f, "crew_start"),
            EventKind::TaskStart => write!(f, "task_start"),
            EventKind::TaskComplete => write!(f, "task_complete"),
            EventKind::AgentAction => write!(f, "agent_action"),
            EventKind::Warning => write!(f, "warning"),
            EventKind::Error => write!(f, "error"),
            EventKind::CrewComplete => write!(f, "crew_complete"),
        }
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,

    pub data: Value,

    /// RFC3339 on output. Input without an offset is read as UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Parse an RFC3339 timestamp, or a naive ISO 8601 one taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

impl Event {
    /// Create an event of the given kind with an empty data object, stamped now.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data: Value::Object(serde_json::Map::new()),
            timestamp: Utc::now(),
        }
    }

    /// Set the data object for this event.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn crew_start(name: &str) -> Self {
        Self::new(EventKind::CrewStart).with_data(json!({ "name": name }))
    }

    pub fn crew_complete(name: &str) -> Self {
        Self::new(EventKind::CrewComplete).with_data(json!({ "name": name }))
    }

    pub fn task_start(description: &str, agent_role: Option<&str>) -> Self {
        Self::new(EventKind::TaskStart).with_data(json!({
            "task_description": description,
            "agent_role": agent_role,
        }))
    }

    pub fn task_complete(description: &str, output: &str) -> Self {
        Self::new(EventKind::TaskComplete).with_data(json!({
            "task_description": description,
            "output": output,
        }))
    }

    pub fn agent_action(agent_role: &str, action: &str) -> Self {
        Self::new(EventKind::AgentAction).with_data(json!({
            "agent_role": agent_role,
            "action": action,
        }))
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(EventKind::Warning).with_data(json!({ "message": message.into() }))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventKind::Error).with_data(json!({ "message": message.into() }))
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a side-channel line of the form `[EVENT] {json}`.
    ///
    /// Returns `None` for lines without the marker or with an unparseable payload.
    pub fn parse_marked_line(line: &str) -> Option<Self> {
        let payload = line.trim_end().strip_prefix(EVENT_MARKER)?;
        serde_json::from_str(payload.trim_start()).ok()
    }
}

/// Per-kind switches for the optional, high-volume events.
///
/// `crew_start`, `warning`, `error` and `crew_complete` are always delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackSettings {
    #[serde(default = "enabled", deserialize_with = "null_as_enabled")]
    pub on_task_start: bool,

    #[serde(default = "enabled", deserialize_with = "null_as_enabled")]
    pub on_task_complete: bool,

    #[serde(default = "enabled", deserialize_with = "null_as_enabled")]
    pub on_agent_action: bool,
}

fn enabled() -> bool {
    true
}

fn null_as_enabled<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

impl Default for CallbackSettings {
    fn default() -> Self {
        Self {
            on_task_start: true,
            on_task_complete: true,
            on_agent_action: true,
        }
    }
}

impl CallbackSettings {
    /// Whether events of `kind` should be delivered.
    pub fn allows(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::TaskStart => self.on_task_start,
            EventKind::TaskComplete => self.on_task_complete,
            EventKind::AgentAction => self.on_agent_action,
            EventKind::CrewStart | EventKind::Warning | EventKind::Error | EventKind::CrewComplete => {
                true
            }
        }
    }
}

/// A destination for lifecycle events.
///
/// Implementations must not panic or propagate write failures.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

/// Writes events as single lines to a byte stream, flushing after each one.
pub struct StreamSink<W: Write> {
    writer: W,
    marker: Option<&'static str>,
}

impl StreamSink<io::Stderr> {
    /// The stdio side channel: `[EVENT] {json}` lines on stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr(), Some(EVENT_MARKER))
    }
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W, marker: Option<&'static str>) -> Self {
        Self { writer, marker }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for StreamSink<W> {
    fn emit(&mut self, event: &Event) {
        let Ok(line) = event.to_ndjson_line() else {
            return;
        };
        let written = match self.marker {
            Some(marker) => writeln!(self.writer, "{} {}", marker, line),
            None => writeln!(self.writer, "{}", line),
        };
        if written.is_ok() {
            let _ = self.writer.flush();
        }
    }
}

/// Appends events to an NDJSON log file.
///
/// The first write failure is reported once on stderr; later failures are silent.
pub struct NdjsonFileSink {
    path: PathBuf,
    reported_failure: bool,
}

impl NdjsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reported_failure: false,
        }
    }
}

impl EventSink for NdjsonFileSink {
    fn emit(&mut self, event: &Event) {
        if let Err(e) = append_event(&self.path, event)
            && !self.reported_failure
        {
            self.reported_failure = true;
            eprintln!(
                "[crewbridge] warning: failed to append event to '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Append an event as one JSON line to `path`, creating parent directories
/// and the file as needed.
pub fn append_event(path: &Path, event: &Event) -> io::Result<()> {
    let line = event.to_ndjson_line().map_err(io::Error::other)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    file.flush()
}

/// Forwards events over an in-process channel.
///
/// A dropped receiver turns emission into a no-op.
pub struct ChannelSink {
    sender: Sender<Event>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }
}

/// Fans events out to every registered sink, honoring the callback switches.
#[derive(Default)]
pub struct EventBridge {
    sinks: Vec<Box<dyn EventSink>>,
    callbacks: CallbackSettings,
}

impl EventBridge {
    /// A bridge with no sinks; every emission is discarded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn set_callbacks(&mut self, callbacks: CallbackSettings) {
        self.callbacks = callbacks;
    }

    pub fn emit(&mut self, event: Event) {
        if !self.callbacks.allows(event.kind) {
            return;
        }
        for sink in &mut self.sinks {
            sink.emit(&event);
        }
    }
}
