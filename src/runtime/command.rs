//! External orchestrator process.
//!
//! The crew payload is written as JSON to the child's stdin. Its stdout is the
//! final artifact, unless it is a single result record
//! (`{"success": ..., "result": ..., "error": ...}`), in which case the record
//! decides the outcome. Its stderr is read line by line: `[EVENT]` lines are
//! parsed and re-emitted through the bridge, everything else is passed through
//! to our own stderr.

use super::{DelegateRuntime, RuntimeError};
use crate::crew::Crew;
use crate::events::{Event, EventBridge};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs a crew by spawning an external program.
#[derive(Debug, Clone)]
pub struct CommandRuntime {
    command: String,
    environment: BTreeMap<String, String>,
}

impl CommandRuntime {
    /// `command` is split with shell quoting rules; no shell is involved.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            environment: BTreeMap::new(),
        }
    }

    /// Extra environment variables for the child, on top of our own.
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment.extend(environment);
        self
    }
}

impl DelegateRuntime for CommandRuntime {
    fn name(&self) -> &str {
        "command"
    }

    fn kickoff(&mut self, crew: &Crew, events: &mut EventBridge) -> Result<String, RuntimeError> {
        let args =
            shell_words::split(&self.command).map_err(|e| RuntimeError::InvalidCommand {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;
        let (program, rest) = args.split_first().ok_or(RuntimeError::EmptyCommand)?;
        let payload = serde_json::to_vec(&crew.payload())?;

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.environment {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| RuntimeError::Spawn {
            program: program.clone(),
            source,
        })?;

        let io_error = |source: io::Error| RuntimeError::Io {
            program: program.clone(),
            source,
        };
        let not_captured = |stream: &str| io_error(io::Error::other(format!("{} not captured", stream)));

        let mut stdin = child.stdin.take().ok_or_else(|| not_captured("stdin"))?;
        let mut stdout = child.stdout.take().ok_or_else(|| not_captured("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| not_captured("stderr"))?;

        // Separate threads so a chatty child cannot deadlock on a full pipe.
        let writer = thread::spawn(move || stdin.write_all(&payload));
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        forward_stderr(stderr, events);

        let status = child.wait().map_err(io_error)?;
        let written = writer
            .join()
            .map_err(|_| io_error(io::Error::other("stdin writer panicked")))?;
        let output = reader
            .join()
            .map_err(|_| io_error(io::Error::other("stdout reader panicked")))?
            .map_err(io_error)?;

        if !status.success() {
            return Err(RuntimeError::Exited {
                program: program.clone(),
                status: status.to_string(),
            });
        }
        // A child that finished successfully without reading all of its input is fine.
        if let Err(e) = written
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(io_error(e));
        }

        artifact_from_stdout(String::from_utf8_lossy(&output).trim_end())
    }
}

/// A result record printed by the orchestrator instead of a bare artifact.
#[derive(Debug, Deserialize)]
struct ReportedOutcome {
    success: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpret the child's stdout.
fn artifact_from_stdout(stdout: &str) -> Result<String, RuntimeError> {
    let Ok(outcome) = serde_json::from_str::<ReportedOutcome>(stdout) else {
        return Ok(stdout.to_string());
    };
    if outcome.success {
        Ok(outcome.result.unwrap_or_default())
    } else {
        Err(RuntimeError::Failed(outcome.error.unwrap_or_else(|| {
            "runtime reported a failure without a message".to_string()
        })))
    }
}

/// Route the child's stderr: event lines to the bridge, the rest to our stderr.
fn forward_stderr(stderr: impl Read, events: &mut EventBridge) {
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        match Event::parse_marked_line(line) {
            Some(event) => events.emit(event),
            None => eprintln!("{}", line),
        }
    }
}
