//! Tree command - Parents and children tree for a component

use anyhow::Result;
use clap::Args;

use super::run_analysis;
use crate::GlobalOptions;

/// Arguments for the tree command
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Name of the component to inspect
    component_name: String,
}

/// Execute the tree command
pub async fn execute(args: TreeArgs, global: GlobalOptions) -> Result<()> {
    let result = run_analysis(&global)?;
    let graph = &result.graph;
    let name = args.component_name.as_str();

    let Some(info) = graph.get(name) else {
        println!("No component named \"{name}\" found in graph.");
        let suggestions = graph.suggest(name);
        if !suggestions.is_empty() {
            println!("\nDid you mean:");
            for suggestion in suggestions {
                println!("  - {suggestion}");
            }
        }
        return Ok(());
    };

    println!("Component tree for: {name}");
    println!("File:  {}", info.file_path);
    println!("Role:  {}", info.role);
    println!();

    println!("Direct parents (who renders this):");
    let parents = graph.parents_of(name);
    if parents.is_empty() {
        println!("  (no parents found - likely a top-level or entry component)");
    } else {
        for parent in parents {
            match graph.get(parent) {
                Some(p) => println!("  - {parent} (LOC: {})", p.loc),
                None => println!("  - {parent} (LOC: ?)"),
            }
        }
    }
    println!();

    println!("Children tree (who this component renders, depth <= 2):");
    if graph.children_of(name).is_empty() {
        println!("  (no children components detected)");
        return Ok(());
    }

    for line in graph.children_tree(name) {
        println!("{line}");
    }

    Ok(())
}
