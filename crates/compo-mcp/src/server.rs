//! Compo MCP Server implementation
//!
//! This module implements the MCP server using the rmcp SDK, exposing:
//! - Component mapping (compo_map: all components grouped by role)
//! - Component analysis (compo_analyze: props, hooks, structure, relationships)
//! - Usage navigation (compo_tree: direct parents and children)
//! - Refactor pressure (compo_radar: flagged components with signals)
//!
//! Every tool call runs a fresh analysis of the requested project root, so
//! results always reflect the files on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use tracing::info;

use compo_core::{analyze_project, AnalyzeResult, ComponentGraph, ComponentInfo};

use crate::tools::*;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Project root used when a tool call omits `project_root`
    pub default_root: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default project root
    pub fn with_default_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.default_root = Some(root.into());
        self
    }
}

/// The Compo MCP server
#[derive(Clone)]
pub struct CompoServer {
    config: ServerConfig,
    tool_router: ToolRouter<Self>,
}

/// Map internal errors onto JSON-RPC error data at the tool boundary
fn to_error_data(e: crate::McpError) -> McpError {
    match e {
        crate::McpError::InvalidParams(msg) => McpError::invalid_params(msg, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

#[tool_router]
impl CompoServer {
    /// Create a new server instance
    pub fn new(config: ServerConfig) -> crate::Result<Self> {
        if let Some(ref root) = config.default_root {
            if !root.exists() {
                return Err(crate::McpError::InvalidParams(format!(
                    "default project root does not exist: {}",
                    root.display()
                )));
            }
        }

        info!("Initializing Compo MCP server");
        if let Some(ref root) = config.default_root {
            info!("  Default root: {}", root.display());
        }

        Ok(Self {
            config,
            tool_router: Self::tool_router(),
        })
    }

    /// Run a full analysis for one tool call on the blocking pool.
    async fn run_analysis(&self, project_root: Option<String>) -> crate::Result<AnalyzeResult> {
        let root = project_root
            .map(PathBuf::from)
            .or_else(|| self.config.default_root.clone())
            .ok_or_else(|| {
                crate::McpError::InvalidParams(
                    "project_root is required (no default root configured)".to_string(),
                )
            })?;

        let result = tokio::task::spawn_blocking(move || analyze_project(&root))
            .await
            .map_err(|e| crate::McpError::Internal(format!("analysis task failed: {e}")))??;

        Ok(result)
    }

    #[tool(
        name = "compo_map",
        description = "List all detected React components grouped by role (page, feature, shared, unknown)"
    )]
    async fn compo_map(
        &self,
        Parameters(params): Parameters<MapParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .run_analysis(params.project_root)
            .await
            .map_err(to_error_data)?;

        let mut by_role: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for info in result.graph.components() {
            by_role
                .entry(info.role.as_str())
                .or_default()
                .push(component_line(info));
        }

        let mut lines = Vec::new();
        for (role, entries) in by_role {
            lines.push(role.to_uppercase());
            lines.push("-----------------------".to_string());
            lines.extend(entries);
            lines.push(String::new());
        }

        Ok(CallToolResult::success(vec![Content::text(
            lines.join("\n"),
        )]))
    }

    #[tool(
        name = "compo_analyze",
        description = "Show props, hooks, structure and relationships for a single React component"
    )]
    async fn compo_analyze(
        &self,
        Parameters(params): Parameters<AnalyzeParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .run_analysis(params.project_root)
            .await
            .map_err(to_error_data)?;

        let name = params.component_name.as_str();
        let Some(info) = result.graph.get(name) else {
            return Ok(CallToolResult::error(vec![Content::text(not_found_text(
                name,
                &result.graph,
            ))]));
        };

        let mut lines = Vec::new();
        lines.push(format!("Component: {}", info.name));
        lines.push(format!("File: {}", info.file_path));
        lines.push(format!("Role: {}", info.role));
        lines.push(format!("LOC: {}", info.loc));
        lines.push(String::new());

        lines.push("Structure (1-based line ranges):".to_string());
        let lr = &info.line_ranges;
        match lr.state {
            Some(range) => lines.push(format!("  State:    {range}")),
            None => lines.push("  State:    (none)".to_string()),
        }
        if lr.effects.is_empty() {
            lines.push("  Effects:  (none)".to_string());
        } else {
            let joined: Vec<String> = lr.effects.iter().map(|r| r.to_string()).collect();
            lines.push(format!("  Effects:  {}", joined.join(", ")));
        }
        if lr.handlers.is_empty() {
            lines.push("  Handlers: (none)".to_string());
        } else {
            let joined: Vec<String> = lr.handlers.iter().map(|r| r.to_string()).collect();
            lines.push(format!("  Handlers: {}", joined.join(", ")));
        }
        match lr.jsx {
            Some(range) => lines.push(format!("  JSX:      {range}")),
            None => lines.push("  JSX:      (none)".to_string()),
        }
        lines.push(String::new());

        push_list(&mut lines, "Props:", &info.props);
        lines.push(String::new());
        push_list(&mut lines, "Hooks:", &info.hooks);
        lines.push(String::new());

        let children = result.graph.children_of(name);
        push_name_list(&mut lines, "Children:", &children);
        lines.push(String::new());
        let parents = result.graph.parents_of(name);
        push_name_list(&mut lines, "Parents:", &parents);

        Ok(CallToolResult::success(vec![Content::text(
            lines.join("\n"),
        )]))
    }

    #[tool(
        name = "compo_tree",
        description = "Show direct parents and children for a React component (one level up and down)"
    )]
    async fn compo_tree(
        &self,
        Parameters(params): Parameters<TreeParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .run_analysis(params.project_root)
            .await
            .map_err(to_error_data)?;

        let name = params.component_name.as_str();
        if !result.graph.contains(name) {
            return Ok(CallToolResult::error(vec![Content::text(not_found_text(
                name,
                &result.graph,
            ))]));
        }

        let mut lines = Vec::new();
        lines.push(format!("Tree for: {name}"));
        lines.push(String::new());
        push_name_list(&mut lines, "Parents:", &result.graph.parents_of(name));
        lines.push(String::new());
        push_name_list(&mut lines, "Children:", &result.graph.children_of(name));

        Ok(CallToolResult::success(vec![Content::text(
            lines.join("\n"),
        )]))
    }

    #[tool(
        name = "compo_radar",
        description = "Flag components under refactor pressure (size, hook count, child count, effect count)"
    )]
    async fn compo_radar(
        &self,
        Parameters(params): Parameters<RadarParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .run_analysis(params.project_root)
            .await
            .map_err(to_error_data)?;

        let scores = compo_core::scan(result.graph.components());
        if scores.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No components flagged.",
            )]));
        }

        let mut lines = Vec::new();
        lines.push(format!("{} component(s) flagged:", scores.len()));
        lines.push(String::new());
        for score in &scores {
            lines.push(format!(
                "[{}] {} ({})",
                score.severity, score.component, score.file_path
            ));
            for signal in &score.signals {
                lines.push(format!("  - {}", signal.message));
            }
            lines.push(String::new());
        }

        Ok(CallToolResult::success(vec![Content::text(
            lines.join("\n"),
        )]))
    }
}

fn not_found_text(name: &str, graph: &ComponentGraph) -> String {
    let mut text = format!("Component \"{name}\" not found in project");
    let suggestions = graph.suggest(name);
    if !suggestions.is_empty() {
        text.push_str("\n\nDid you mean:");
        for suggestion in suggestions {
            text.push_str("\n  - ");
            text.push_str(suggestion);
        }
    }
    text
}

fn component_line(info: &ComponentInfo) -> String {
    format!(
        "- {}  ({}, LOC: {}, hooks: [{}])",
        info.name,
        info.file_path,
        info.loc,
        info.hooks.join(", ")
    )
}

fn push_list(lines: &mut Vec<String>, header: &str, items: &[String]) {
    if items.is_empty() {
        lines.push(format!("{header} (none)"));
    } else {
        lines.push(header.to_string());
        for item in items {
            lines.push(format!("  - {item}"));
        }
    }
}

fn push_name_list(lines: &mut Vec<String>, header: &str, items: &[&str]) {
    lines.push(header.to_string());
    if items.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        for item in items {
            lines.push(format!("  - {item}"));
        }
    }
}

#[tool_handler]
impl rmcp::ServerHandler for CompoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Compo: structural React component analysis.\n\n\
                TOOLS:\n\
                - compo_map: List every detected component grouped by role (start here)\n\
                - compo_analyze: Props, hooks, line ranges and relationships for one component\n\
                - compo_tree: Direct parents and children of a component\n\
                - compo_radar: Components under refactor pressure\n\n\
                Components are matched by name (e.g. 'UserCard'). Detection is structural:\n\
                a Pascal-case function or arrow binding whose body contains JSX.\n\n\
                WORKFLOW: compo_map -> compo_analyze -> compo_tree"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_project() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        let src = dir.path().join("src").join("pages");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("Home.tsx"),
            "function Home() {\n  const [a, setA] = useState(0);\n  return <Panel />;\n}\n",
        )
        .unwrap();
        let comps = dir.path().join("src").join("components");
        fs::create_dir_all(&comps).unwrap();
        fs::write(
            comps.join("Panel.tsx"),
            "function Panel() {\n  return <div />;\n}\n",
        )
        .unwrap();
        dir
    }

    fn text_of(result: &CallToolResult) -> String {
        let json = serde_json::to_value(result).unwrap();
        json["content"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|c| c["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn is_tool_error(result: &CallToolResult) -> bool {
        serde_json::to_value(result).unwrap()["isError"] == serde_json::json!(true)
    }

    #[tokio::test]
    async fn test_map_groups_by_role() {
        let dir = fixture_project();
        let server = CompoServer::new(ServerConfig::new().with_default_root(dir.path())).unwrap();

        let result = server
            .compo_map(Parameters(MapParams { project_root: None }))
            .await
            .unwrap();
        let text = text_of(&result);

        assert!(text.contains("PAGE"));
        assert!(text.contains("SHARED"));
        assert!(text.contains("- Home"));
        assert!(text.contains("- Panel"));
    }

    #[tokio::test]
    async fn test_analyze_reports_structure_and_relationships() {
        let dir = fixture_project();
        let server = CompoServer::new(ServerConfig::new().with_default_root(dir.path())).unwrap();

        let result = server
            .compo_analyze(Parameters(AnalyzeParams {
                project_root: None,
                component_name: "Home".to_string(),
            }))
            .await
            .unwrap();
        let text = text_of(&result);

        assert!(text.contains("Component: Home"));
        assert!(text.contains("Role: page"));
        assert!(text.contains("State:    2-2"));
        assert!(text.contains("- useState"));
        assert!(text.contains("- Panel"));
    }

    #[tokio::test]
    async fn test_analyze_unknown_component_is_tool_error() {
        let dir = fixture_project();
        let server = CompoServer::new(ServerConfig::new().with_default_root(dir.path())).unwrap();

        let result = server
            .compo_analyze(Parameters(AnalyzeParams {
                project_root: None,
                component_name: "Missing".to_string(),
            }))
            .await
            .unwrap();

        assert!(is_tool_error(&result));
        assert!(text_of(&result).contains("not found"));
    }

    #[tokio::test]
    async fn test_unknown_component_suggests_close_names() {
        let dir = fixture_project();
        let server = CompoServer::new(ServerConfig::new().with_default_root(dir.path())).unwrap();

        let result = server
            .compo_analyze(Parameters(AnalyzeParams {
                project_root: None,
                component_name: "panel".to_string(),
            }))
            .await
            .unwrap();
        assert!(is_tool_error(&result));
        let text = text_of(&result);
        assert!(text.contains("Component \"panel\" not found"));
        assert!(text.contains("Did you mean:"));
        assert!(text.contains("- Panel"));

        let result = server
            .compo_tree(Parameters(TreeParams {
                project_root: None,
                component_name: "hom".to_string(),
            }))
            .await
            .unwrap();
        assert!(is_tool_error(&result));
        let text = text_of(&result);
        assert!(text.contains("Did you mean:"));
        assert!(text.contains("- Home"));
    }

    #[tokio::test]
    async fn test_tree_lists_parents_and_children() {
        let dir = fixture_project();
        let server = CompoServer::new(ServerConfig::new().with_default_root(dir.path())).unwrap();

        let result = server
            .compo_tree(Parameters(TreeParams {
                project_root: None,
                component_name: "Panel".to_string(),
            }))
            .await
            .unwrap();
        let text = text_of(&result);

        assert!(text.contains("Tree for: Panel"));
        assert!(text.contains("- Home"));
    }

    #[tokio::test]
    async fn test_missing_root_is_invalid_params() {
        let server = CompoServer::new(ServerConfig::new()).unwrap();

        let err = server
            .compo_map(Parameters(MapParams { project_root: None }))
            .await
            .unwrap_err();
        assert!(err.message.contains("project_root"));
    }

    #[test]
    fn test_new_rejects_missing_default_root() {
        let config = ServerConfig::new().with_default_root("/definitely/not/a/real/path");
        assert!(CompoServer::new(config).is_err());
    }
}
