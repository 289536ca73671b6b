//! CLI command implementations
//!
//! This module contains all Compo CLI command implementations.

pub mod analyze;
pub mod map;
pub mod mcp;
pub mod radar;
pub mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result};
use compo_core::{analyze_project, AnalyzeResult};

use crate::GlobalOptions;

/// Resolve the project root from options or current directory.
pub fn resolve_project(global: &GlobalOptions) -> Result<PathBuf> {
    if let Some(ref project) = global.project {
        return project
            .canonicalize()
            .with_context(|| format!("Project path not found: {}", project.display()));
    }

    std::env::current_dir().context("Failed to get current directory")
}

/// Run a full analysis for the resolved project.
pub fn run_analysis(global: &GlobalOptions) -> Result<AnalyzeResult> {
    let root = resolve_project(global)?;
    let result = analyze_project(&root)
        .with_context(|| format!("Failed to analyze project at {}", root.display()))?;

    for diagnostic in &result.diagnostics {
        if !global.quiet {
            eprintln!("warning: {}", diagnostic.message);
        }
    }

    Ok(result)
}
