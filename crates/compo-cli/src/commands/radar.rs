//! Radar command - Flag components under refactor pressure

use anyhow::Result;
use clap::Args;
use compo_core::scan;

use super::run_analysis;
use crate::GlobalOptions;

/// Arguments for the radar command
#[derive(Args, Debug)]
pub struct RadarArgs {
    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Execute the radar command
pub async fn execute(args: RadarArgs, global: GlobalOptions) -> Result<()> {
    let result = run_analysis(&global)?;
    let scores = scan(result.graph.components());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    if scores.is_empty() {
        println!("No components flagged.");
        return Ok(());
    }

    println!("{} component(s) flagged:\n", scores.len());
    for score in &scores {
        println!("[{}] {} ({})", score.severity, score.component, score.file_path);
        for signal in &score.signals {
            println!("  - {}", signal.message);
        }
        println!();
    }

    Ok(())
}
