//! Asset folder scaffolding for the `generate` command.
//!
//! Creates the folder tree the asset crew writes into and copies the input
//! documents under `_input/` so the output directory is self-contained.
//! Every operation is idempotent.

use crate::error::{BridgeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder holding copies of the input documents.
pub const INPUT_DIR: &str = "_input";

/// Folders created under the output root, relative paths.
pub const ASSET_FOLDERS: &[&str] = &[
    "characters/protagonist",
    "characters/agent_researcher",
    "characters/agent_writer",
    "characters/agent_analyst",
    "characters/agent_designer",
    "characters/agent_manager",
    "backgrounds",
    "effects/energy_wave",
    "effects/pop_smoke",
    "effects/sparkles",
    "effects/confetti",
    "effects/progress_bar",
    "effects/glow_pulse",
    "frames",
    "transitions",
    "audio/bgm",
    "audio/se",
    "audio/voice",
    "text/animated",
    "sequences",
    INPUT_DIR,
];

/// Create every asset folder under `root`. Returns the created paths.
pub fn create_output_structure(root: &Path) -> Result<Vec<PathBuf>> {
    ASSET_FOLDERS
        .iter()
        .map(|folder| {
            let path = root.join(folder);
            fs::create_dir_all(&path).map_err(|e| {
                BridgeError::UserError(format!(
                    "failed to create output folder '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(path)
        })
        .collect()
}

/// Copy `files` into `<root>/_input/`, keeping their file names.
///
/// Returns the staged paths in the same order.
pub fn stage_inputs(root: &Path, files: &[&Path]) -> Result<Vec<PathBuf>> {
    let input_dir = root.join(INPUT_DIR);
    fs::create_dir_all(&input_dir).map_err(|e| {
        BridgeError::UserError(format!(
            "failed to create input folder '{}': {}",
            input_dir.display(),
            e
        ))
    })?;

    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let name = file.file_name().ok_or_else(|| {
            BridgeError::UserError(format!("'{}' is not a file path", file.display()))
        })?;
        let target = input_dir.join(name);
        fs::copy(file, &target).map_err(|e| {
            BridgeError::UserError(format!(
                "failed to copy '{}' to '{}': {}",
                file.display(),
                target.display(),
                e
            ))
        })?;
        staged.push(target);
    }
    Ok(staged)
}
