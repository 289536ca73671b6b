//! Compo CLI - Structural React component analysis
//!
//! A command-line interface for mapping React components, inspecting their
//! structure, and navigating the component usage graph.
//!
//! # Usage
//!
//! ```bash
//! # List all detected components
//! compo map --project ./client
//!
//! # Show detailed info for one component
//! compo analyze UserCard --project ./client
//!
//! # Show parents and children tree
//! compo tree UserCard --project ./client
//!
//! # Flag components under refactor pressure
//! compo radar --project ./client
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

/// Compo - Component archaeology for React codebases
#[derive(Parser, Debug)]
#[command(name = "compo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to the React project root
    #[arg(long, short = 'p', global = true, env = "COMPO_PROJECT")]
    project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze the project and list detected components
    Map(commands::map::MapArgs),

    /// Show detailed info for a single component
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show parents and children tree for a component
    Tree(commands::tree::TreeArgs),

    /// Flag components under refactor pressure
    Radar(commands::radar::RadarArgs),

    /// Start the MCP server for AI assistant integration
    Mcp(commands::mcp::McpArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = if cli.global.quiet {
        Level::ERROR
    } else if cli.global.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    // MCP command handles its own tracing setup (needs ansi=false because
    // stdout carries the JSON-RPC protocol)
    if !matches!(cli.command, Commands::Mcp(_)) {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    // Execute the command
    match cli.command {
        Commands::Map(args) => commands::map::execute(args, cli.global).await,
        Commands::Analyze(args) => commands::analyze::execute(args, cli.global).await,
        Commands::Tree(args) => commands::tree::execute(args, cli.global).await,
        Commands::Radar(args) => commands::radar::execute(args, cli.global).await,
        Commands::Mcp(args) => commands::mcp::execute(args, cli.global).await,
    }
}
