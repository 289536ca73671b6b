//! Compo Core - React component archaeology using tree-sitter AST parsing
//!
//! This crate provides the core functionality for component analysis:
//! - Tree-sitter parsing of JS/JSX/TS/TSX sources
//! - Structural-shape detection of UI components
//! - Props, hooks, children and line-range extraction
//! - A name-keyed component usage graph with query helpers
//! - Refactor-pressure scoring

pub mod analyzer;
pub mod graph;
pub mod model;
pub mod parser;
pub mod project;
pub mod radar;

// Re-exports for convenience
pub use analyzer::{
    analyze_project, analyze_source, AnalyzeError, AnalyzeResult, DetectedComponent,
};
pub use graph::{ComponentGraph, Diagnostic, DiagnosticKind, EdgeKind, GraphNodeView};
pub use model::{ComponentInfo, ComponentRole, LineRange, StructuralRanges};
pub use parser::{ParserError, SourceParser, SupportedLanguage};
pub use project::{load_project, LoadedProject, ProjectError, SourceFile};
pub use radar::{
    scan, score_component, RefactorScore, RefactorSeverity, RefactorSignal, SignalKind,
};
