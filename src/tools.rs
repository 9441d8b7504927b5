//! Capability catalog.
//!
//! The tools themselves run inside the delegate runtime. This catalog only
//! names them and describes their parameters so project files can be checked
//! and the runtime payload can carry the schemas agents are allowed to use.
//! Every capability writes to an `output_path` (or directory) and answers with
//! a short status string.

use serde::Serialize;

/// A named parameter of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    pub description: &'static str,
    /// `None` means the parameter is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

/// A capability an agent may reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityTool {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ToolParameter],
}

const fn required(name: &'static str, description: &'static str) -> ToolParameter {
    ToolParameter {
        name,
        description,
        default: None,
    }
}

const fn optional(
    name: &'static str,
    description: &'static str,
    default: &'static str,
) -> ToolParameter {
    ToolParameter {
        name,
        description,
        default: Some(default),
    }
}

/// Every known capability, in display order.
pub const CATALOG: &[CapabilityTool] = &[
    CapabilityTool {
        name: "image_generator",
        description: "Generate characters, backgrounds and effects as images.",
        parameters: &[
            required("prompt", "Detailed description of the image"),
            optional("style", "Image style: cartoon, realistic, anime", "cartoon"),
            optional("width", "Width in pixels", "1024"),
            optional("height", "Height in pixels", "1024"),
            required("output_path", "Output file path"),
            optional("transparent_bg", "Render on a transparent background", "false"),
        ],
    },
    CapabilityTool {
        name: "music_generator",
        description: "Compose background music.",
        parameters: &[
            required("description", "Mood, genre and tempo of the track"),
            optional("duration_seconds", "Length in seconds", "30"),
            optional("bpm", "Tempo in beats per minute", "120"),
            optional("key", "Musical key", "C major"),
            required("output_path", "Output file path"),
        ],
    },
    CapabilityTool {
        name: "se_generator",
        description: "Generate sound effects.",
        parameters: &[
            required("description", "Description of the sound effect"),
            optional("duration_ms", "Length in milliseconds", "1000"),
            required("output_path", "Output file path"),
        ],
    },
    CapabilityTool {
        name: "tts_generator",
        description: "Turn narration or dialogue text into character voice audio.",
        parameters: &[
            required("text", "Text to speak"),
            optional("voice_id", "Voice identifier", "young_male"),
            optional("emotion", "Emotion: happy, sad, excited", "neutral"),
            required("output_path", "Output file path"),
        ],
    },
    CapabilityTool {
        name: "file_organizer",
        description: "Reorganize generated files under a consistent naming convention.",
        parameters: &[
            required("source_directory", "Directory to organize"),
            required("target_directory", "Destination directory"),
            optional("naming_convention", "File naming convention", "snake_case"),
        ],
    },
    CapabilityTool {
        name: "readme_generator",
        description: "Write a README describing the asset folder layout and usage.",
        parameters: &[
            required("directory", "Directory to document"),
            required("project_name", "Project name"),
            required("description", "Project description"),
        ],
    },
    CapabilityTool {
        name: "sequence_generator",
        description: "Produce the timeline sequence JSON from a storyboard.",
        parameters: &[
            required("storyboard_path", "Storyboard file path"),
            required("output_path", "Output JSON file path"),
        ],
    },
];

/// Find a capability by name.
pub fn lookup(name: &str) -> Option<&'static CapabilityTool> {
    CATALOG.iter().find(|tool| tool.name == name)
}
