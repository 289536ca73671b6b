//! Map command - List all detected components grouped by role

use anyhow::Result;
use clap::Args;
use compo_core::ComponentInfo;

use super::run_analysis;
use crate::GlobalOptions;

/// Arguments for the map command
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Execute the map command
pub async fn execute(args: MapArgs, global: GlobalOptions) -> Result<()> {
    let result = run_analysis(&global)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.components.is_empty() {
        println!("No React components detected.");
        return Ok(());
    }

    println!("Detected {} components:\n", result.components.len());

    // Group by role, keeping first-appearance order of roles
    let mut roles: Vec<&str> = Vec::new();
    let mut by_role: Vec<Vec<&ComponentInfo>> = Vec::new();
    for comp in &result.components {
        let role = comp.role.as_str();
        match roles.iter().position(|r| *r == role) {
            Some(i) => by_role[i].push(comp),
            None => {
                roles.push(role);
                by_role.push(vec![comp]);
            }
        }
    }

    for (role, comps) in roles.iter().zip(&by_role) {
        println!("{}", role.to_uppercase());
        println!("-----------------------");
        for comp in comps {
            println!(
                "- {}  ({}, LOC: {}, hooks: [{}])",
                comp.name,
                comp.file_path,
                comp.loc,
                comp.hooks.join(", ")
            );
        }
        println!();
    }

    Ok(())
}
