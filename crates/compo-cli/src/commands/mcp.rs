//! MCP server command
//!
//! Starts the Compo MCP server for AI assistant integration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use compo_mcp::{CompoServer, ServerConfig};
use rmcp::{transport::stdio, ServiceExt};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

use crate::GlobalOptions;

/// Start the MCP server for AI assistant integration
#[derive(Args, Debug)]
pub struct McpArgs {
    /// Default project root for tool calls (default: --project or current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Log file path (default: stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Execute the MCP server command
pub async fn execute(args: McpArgs, global: GlobalOptions) -> Result<()> {
    // Set up logging (must be stderr - stdout is for MCP JSON-RPC protocol)
    let log_level = if args.debug || global.verbose {
        Level::DEBUG
    } else if global.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    // Use try_init() to gracefully handle the case where a global subscriber
    // is already set by the host process
    if let Some(ref log_file) = args.log_file {
        let file = std::fs::File::create(log_file)
            .with_context(|| format!("Failed to create log file: {}", log_file.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(file)
            .with_ansi(false)
            .finish();
        if subscriber.try_init().is_err() {
            warn!(
                "Note: Using existing tracing subscriber (--log-file {} ignored)",
                log_file.display()
            );
        }
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .finish();
        let _ = subscriber.try_init();
    }

    // Resolve the default project root
    let root_path = args
        .root
        .or(global.project)
        .map(Ok)
        .unwrap_or_else(std::env::current_dir)
        .context("Failed to resolve project root")?;
    let root_path = root_path
        .canonicalize()
        .unwrap_or_else(|_| root_path.clone());

    info!("Starting Compo MCP Server");
    info!("  Default root: {}", root_path.display());

    let config = ServerConfig::new().with_default_root(&root_path);
    let server = CompoServer::new(config).context("Failed to create MCP server")?;

    info!("Server initialized, starting MCP protocol over stdio");

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    // Wait for shutdown or service termination
    tokio::select! {
        result = service.waiting() => {
            if let Err(e) = result {
                info!("Service ended with error: {}", e);
            } else {
                info!("Service ended normally");
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
