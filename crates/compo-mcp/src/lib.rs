//! Compo MCP - MCP server exposing React component analysis to AI assistants
//!
//! This crate provides an MCP (Model Context Protocol) server over stdio that
//! exposes structural component analysis:
//!
//! - **Component map**: every detected component, grouped by role
//! - **Component analysis**: props, hooks, line ranges, parents and children
//! - **Usage navigation**: direct relationships in the component graph
//! - **Refactor radar**: components under structural pressure

pub mod error;
pub mod server;
pub mod tools;

// Re-exports
pub use error::{McpError, Result};
pub use server::{CompoServer, ServerConfig};
