//! MCP Tool parameter definitions
//!
//! These structs define the JSON Schema for tool parameters using schemars.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Parameters for compo_map tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MapParams {
    /// Path to the React project root
    #[schemars(
        description = "Path to the React project root (e.g. ../my-app/client). Defaults to the root the server was started with."
    )]
    pub project_root: Option<String>,
}

/// Parameters for compo_analyze tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// Path to the React project root
    #[schemars(
        description = "Path to the React project root (e.g. ../my-app/client). Defaults to the root the server was started with."
    )]
    pub project_root: Option<String>,

    /// Component to analyze
    #[schemars(description = "Name of the component to analyze (e.g. UserCard)")]
    pub component_name: String,
}

/// Parameters for compo_tree tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TreeParams {
    /// Path to the React project root
    #[schemars(
        description = "Path to the React project root (e.g. ../my-app/client). Defaults to the root the server was started with."
    )]
    pub project_root: Option<String>,

    /// Component to inspect
    #[schemars(description = "Name of the component to inspect")]
    pub component_name: String,
}

/// Parameters for compo_radar tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RadarParams {
    /// Path to the React project root
    #[schemars(
        description = "Path to the React project root (e.g. ../my-app/client). Defaults to the root the server was started with."
    )]
    pub project_root: Option<String>,
}
