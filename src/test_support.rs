use crate::crew::Crew;
use crate::events::{ChannelSink, Event, EventBridge};
use crate::request::{AgentSpec, CrewRequest, TaskSpec};
use crate::runtime::{DelegateRuntime, RuntimeError};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};

pub(crate) fn agent(role: &str) -> AgentSpec {
    AgentSpec {
        role: role.to_string(),
        goal: format!("Act as {}", role),
        ..AgentSpec::default()
    }
}

pub(crate) fn task(description: &str, context: &[i64]) -> TaskSpec {
    TaskSpec {
        description: description.to_string(),
        context: context.to_vec(),
        ..TaskSpec::default()
    }
}

pub(crate) fn request(agents: Vec<AgentSpec>, tasks: Vec<TaskSpec>) -> CrewRequest {
    CrewRequest {
        verbose: true,
        agents,
        tasks,
        ..CrewRequest::default()
    }
}

/// A bridge whose only sink is a channel the test can drain.
pub(crate) fn recording_bridge() -> (EventBridge, Receiver<Event>) {
    let (tx, rx) = mpsc::channel();
    (EventBridge::new().with_sink(ChannelSink::new(tx)), rx)
}

/// A runtime that returns a fixed outcome and remembers what it was given.
pub(crate) struct ScriptedRuntime {
    outcome: Result<String, String>,
    pub(crate) kickoffs: usize,
    pub(crate) seen: Vec<Crew>,
}

impl ScriptedRuntime {
    pub(crate) fn succeeding(artifact: &str) -> Self {
        Self {
            outcome: Ok(artifact.to_string()),
            kickoffs: 0,
            seen: Vec::new(),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            kickoffs: 0,
            seen: Vec::new(),
        }
    }
}

impl DelegateRuntime for ScriptedRuntime {
    fn name(&self) -> &str {
        "scripted"
    }

    fn kickoff(&mut self, crew: &Crew, events: &mut EventBridge) -> Result<String, RuntimeError> {
        self.kickoffs += 1;
        self.seen.push(crew.clone());
        if let Some(node) = crew.tasks.execution_order().next() {
            events.emit(Event::task_start(
                &node.spec.description,
                crew.agent_role(node.position),
            ));
        }
        self.outcome.clone().map_err(RuntimeError::Failed)
    }
}

pub(crate) const AGENTS_YAML: &str = r#"
name: Asset crew
description: Agents for the launch video
storyboard_analyst:
  role: Storyboard Analyst
  goal: Break the storyboard into scenes
  backstory: Former animation director
  tools: [sequence_generator]
character_designer:
  role: Character Designer
  goal: Design every character sheet
  backstory: Illustrator
  tools: [image_generator, unknown_tool]
  max_iterations: 8
sound_designer:
  role: Sound Designer
  goal: Produce music, effects and voice
  backstory: Audio engineer
  tools: [music_generator, se_generator, tts_generator]
"#;

pub(crate) const TASKS_YAML: &str = r#"
name: Asset tasks
analyze_storyboard:
  description: Read {storyboard_path} and {direction_path}
  expected_output: Scene list
  agent: storyboard_analyst
design_characters:
  description: Draw characters into {output_path}/characters
  expected_output: Character sheets
  agent: character_designer
  context: [analyze_storyboard]
produce_audio:
  description: Produce audio into {output_path}/audio
  expected_output: Audio files
  agent: sound_designer
  context: [analyze_storyboard, design_characters, later_task, missing_task]
later_task:
  description: Assemble the timeline
  expected_output: timeline.json
  agent: storyboard_analyst
  output_file: "{output_path}/sequences/timeline.json"
"#;

/// Write a project directory with agents.yaml and tasks.yaml (and optionally crew.yaml).
pub(crate) fn write_project(dir: &Path, crew_yaml: Option<&str>) {
    std::fs::write(dir.join("agents.yaml"), AGENTS_YAML).unwrap();
    std::fs::write(dir.join("tasks.yaml"), TASKS_YAML).unwrap();
    if let Some(crew_yaml) = crew_yaml {
        std::fs::write(dir.join("crew.yaml"), crew_yaml).unwrap();
    }
}
