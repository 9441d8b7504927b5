//! Implementation of the `crewbridge tools` command.

use crate::cli::ToolsArgs;
use crate::error::{BridgeError, Result};
use crate::exit_codes;
use crate::tools::CATALOG;

/// Execute the `crewbridge tools` command.
pub fn cmd_tools(args: ToolsArgs) -> Result<i32> {
    if args.json {
        let json = serde_json::to_string_pretty(CATALOG).map_err(|e| {
            BridgeError::UserError(format!("failed to serialize tool catalog: {}", e))
        })?;
        println!("{}", json);
        return Ok(exit_codes::SUCCESS);
    }

    println!("Capability tools:");
    for tool in CATALOG {
        println!();
        println!("  {}", tool.name);
        println!("    {}", tool.description);
        for param in tool.parameters {
            match param.default {
                Some(default) => println!(
                    "    - {} (default: {}): {}",
                    param.name, default, param.description
                ),
                None => println!("    - {} (required): {}", param.name, param.description),
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}
