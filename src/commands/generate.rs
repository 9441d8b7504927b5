//! Implementation of the `crewbridge generate` command.
//!
//! Builds the asset crew from the project files in `--config-dir`, prepares
//! the output tree and runs the crew with the storyboard, direction and
//! output paths as kickoff inputs.

use super::{event_bridge, runtime_for};
use crate::cli::GenerateArgs;
use crate::config::CrewProject;
use crate::engine;
use crate::error::{BridgeError, Result};
use crate::events::Event;
use crate::exit_codes;
use crate::scaffold;
use std::collections::BTreeMap;
use std::path::Path;

const RULE: &str = "============================================================";

/// Execute the `crewbridge generate` command.
pub fn cmd_generate(args: GenerateArgs) -> Result<i32> {
    require_file("storyboard", &args.storyboard)?;
    require_file("direction", &args.direction)?;

    let project = CrewProject::load(&args.config_dir)?;

    println!("{}", RULE);
    println!("Asset generation crew");
    println!("{}", RULE);
    println!("Storyboard: {}", args.storyboard.display());
    println!("Direction:  {}", args.direction.display());
    println!("Output:     {}", args.output.display());
    println!("{}", RULE);

    scaffold::create_output_structure(&args.output)?;
    scaffold::stage_inputs(
        &args.output,
        &[args.storyboard.as_path(), args.direction.as_path()],
    )?;
    println!("Created output folders in {}", args.output.display());

    let inputs = BTreeMap::from([
        (
            "storyboard_path".to_string(),
            args.storyboard.display().to_string(),
        ),
        (
            "direction_path".to_string(),
            args.direction.display().to_string(),
        ),
        ("output_path".to_string(), args.output.display().to_string()),
    ]);
    let prepared = project.build_crew(inputs)?;
    println!();
    println!("Agents: {}", prepared.crew.agents.len());
    println!("Tasks:  {}", prepared.crew.tasks.len());

    let mut events = event_bridge(&args.runtime);
    for warning in prepared.warnings {
        events.emit(Event::warning(warning));
    }
    let runtime_section = &project.crew.runtime;
    let mut runtime = runtime_for(
        &args.runtime,
        runtime_section.command.as_deref(),
        runtime_section.environment.clone(),
    );

    println!();
    println!("Starting asset generation...");
    let record = engine::execute_crew(prepared.crew, runtime.as_mut(), &mut events);
    if !record.success {
        return Err(BridgeError::ExecutionFailed(
            record.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    println!();
    println!("{}", RULE);
    println!("Asset generation complete.");
    println!("{}", RULE);
    if let Some(result) = &record.result {
        println!("{}", result);
        println!();
    }
    println!("Output: {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Import the output folder into your video editor");
    println!("  2. Build the timeline from sequences/timeline.json");
    println!("  3. Render the final cut");

    Ok(exit_codes::SUCCESS)
}

fn require_file(label: &str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BridgeError::UserError(format!(
            "{} file not found: {}",
            label,
            path.display()
        )))
    }
}
