//! Analyze command - Detailed info for a single component

use anyhow::Result;
use clap::Args;
use compo_core::ComponentInfo;

use super::run_analysis;
use crate::GlobalOptions;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Name of the component to analyze
    component_name: String,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Execute the analyze command
pub async fn execute(args: AnalyzeArgs, global: GlobalOptions) -> Result<()> {
    let result = run_analysis(&global)?;

    let matches: Vec<&ComponentInfo> = result
        .components
        .iter()
        .filter(|c| c.name == args.component_name)
        .collect();

    if matches.is_empty() {
        println!("No component named \"{}\" found.", args.component_name);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.len() > 1 {
        println!(
            "Found {} components named \"{}\". Showing all:\n",
            matches.len(),
            args.component_name
        );
    }

    for comp in matches {
        print_component_details(comp);
        println!("\n");
    }

    Ok(())
}

fn print_component_details(comp: &ComponentInfo) {
    println!("Component: {}", comp.name);
    println!("File:      {}", comp.file_path);
    println!("Role:      {}", comp.role);
    println!("LOC:       {}", comp.loc);
    println!();

    println!("Structure (1-based Line Ranges):");
    let ranges = &comp.line_ranges;

    match ranges.state {
        Some(range) => println!("  State:    {range}"),
        None => println!("  State:    (none detected)"),
    }

    if ranges.effects.is_empty() {
        println!("  Effects:  (none detected)");
    } else {
        let joined: Vec<String> = ranges.effects.iter().map(|r| r.to_string()).collect();
        println!("  Effects:  {}", joined.join(", "));
    }

    if ranges.handlers.is_empty() {
        println!("  Handlers: (none detected)");
    } else {
        let joined: Vec<String> = ranges.handlers.iter().map(|r| r.to_string()).collect();
        println!("  Handlers: {}", joined.join(", "));
    }

    match ranges.jsx {
        Some(range) => println!("  JSX:      {range}"),
        None => println!("  JSX:      (none detected)"),
    }
    println!();

    println!("Props:");
    print_bullet_list(&comp.props);
    println!();

    println!("Hooks:");
    print_bullet_list(&comp.hooks);
    println!();

    println!("Children:");
    print_bullet_list(&comp.children);
}

fn print_bullet_list(items: &[String]) {
    if items.is_empty() {
        println!("  (none)");
    } else {
        for item in items {
            println!("  - {item}");
        }
    }
}
