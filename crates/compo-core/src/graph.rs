//! Component Usage Graph
//!
//! A name-keyed directed graph over detected components. Nodes are component
//! names (first detection wins on a duplicate name); an edge A -> B records
//! one syntactic render of B inside A's body, so parallel edges count
//! repeated usages.
//!
//! Construction is two-pass: all nodes first, then edges, so that render
//! order between files never affects the result.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::analyzer::DetectedComponent;
use crate::model::ComponentInfo;

/// Depth cap for [`ComponentGraph::children_tree`]; the root's direct
/// children sit at depth 0, so grandchildren are the last level printed.
const CHILD_TREE_MAX_DEPTH: usize = 2;

/// Maximum number of name suggestions returned by
/// [`ComponentGraph::suggest`].
const MAX_SUGGESTIONS: usize = 10;

// ============================================================================
// Diagnostics
// ============================================================================

/// A silently-resolved inconsistency found during graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The component name the note is about.
    pub component: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Two components share a name; the later one kept its record in the
    /// component list but owns no graph node.
    DuplicateName,
}

// ============================================================================
// Graph
// ============================================================================

/// Edge payload; currently the only relationship is "renders".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Renders,
}

/// The assembled usage graph.
#[derive(Debug, Default)]
pub struct ComponentGraph {
    graph: StableDiGraph<ComponentInfo, EdgeKind>,
    names: HashMap<String, NodeIndex>,
}

impl ComponentGraph {
    /// Build the graph from the detection pass output.
    ///
    /// Pass 1 registers one node per distinct name in detection order;
    /// pass 2 adds one edge per rendered-tag occurrence whose target name
    /// resolved to a node. Renders of undetected names are dropped.
    pub fn build(detected: &[DetectedComponent]) -> (Self, Vec<Diagnostic>) {
        let mut graph: StableDiGraph<ComponentInfo, EdgeKind> = StableDiGraph::new();
        let mut names: HashMap<String, NodeIndex> = HashMap::new();
        let mut diagnostics = Vec::new();

        for comp in detected {
            let name = &comp.info.name;
            if let Some(&existing) = names.get(name) {
                let first_file = graph[existing].file_path.clone();
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::DuplicateName,
                    component: name.clone(),
                    message: format!(
                        "duplicate component name '{}' in {} (first detected in {}); \
                         only the first occurrence owns a graph node",
                        name, comp.info.file_path, first_file
                    ),
                });
                continue;
            }
            let idx = graph.add_node(comp.info.clone());
            names.insert(name.clone(), idx);
        }

        for comp in detected {
            // Edges from a collided component attach to the surviving node
            // of that name.
            let parent = names[&comp.info.name];
            for child_name in &comp.rendered {
                match names.get(child_name) {
                    Some(&child) => {
                        graph.add_edge(parent, child, EdgeKind::Renders);
                    }
                    None => {
                        debug!(
                            "'{}' renders undetected '{}'; edge dropped",
                            comp.info.name, child_name
                        );
                    }
                }
            }
        }

        (Self { graph, names }, diagnostics)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// The stored record for `name`, if it owns a node.
    pub fn get(&self, name: &str) -> Option<&ComponentInfo> {
        self.names.get(name).map(|&idx| &self.graph[idx])
    }

    /// All node names in detection order.
    pub fn names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].name.as_str())
            .collect()
    }

    /// All node records in detection order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Direct children of `name`, one entry per render occurrence, in usage
    /// order. Unknown names yield an empty list.
    pub fn children_of(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.names.get(name) else {
            return Vec::new();
        };
        let mut children: Vec<&str> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| self.graph[edge.target()].name.as_str())
            .collect();
        // petgraph walks adjacency lists newest-first
        children.reverse();
        children
    }

    /// Distinct parents of `name` in first-usage order, excluding `name`
    /// itself when it renders recursively.
    pub fn parents_of(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.names.get(name) else {
            return Vec::new();
        };
        let mut sources: Vec<&str> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| self.graph[edge.source()].name.as_str())
            .collect();
        sources.reverse();

        let mut seen = HashSet::new();
        sources
            .into_iter()
            .filter(|parent| *parent != name && seen.insert(*parent))
            .collect()
    }

    /// Case-insensitive substring suggestions for an unknown name, capped at
    /// ten, in detection order.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].name.as_str())
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Render the child subtree of `name` as indented lines, two levels
    /// deep, with cycle markers.
    ///
    /// A shared visited set spans the whole walk, so a component reached
    /// through one sibling branch prints as a cycle stop in the next. The
    /// root itself is not pre-marked; a self-rendering component appears
    /// once beneath itself before the marker.
    pub fn children_tree(&self, name: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut visited = HashSet::new();
        for child in self.children_of(name) {
            self.subtree(child, 1, &mut visited, &mut lines);
        }
        lines
    }

    fn subtree(
        &self,
        name: &str,
        depth: usize,
        visited: &mut HashSet<String>,
        lines: &mut Vec<String>,
    ) {
        let indent = "  ".repeat(depth);

        let Some(info) = self.get(name) else {
            lines.push(format!("{indent}- {name} (not found in graph)"));
            return;
        };

        lines.push(format!(
            "{indent}- {name} (LOC: {}, role: {})",
            info.loc, info.role
        ));

        if depth >= CHILD_TREE_MAX_DEPTH {
            return;
        }
        if visited.contains(name) {
            lines.push(format!("{}  (cycle detected, stopping here)", indent));
            return;
        }
        visited.insert(name.to_string());

        for child in self.children_of(name) {
            self.subtree(child, depth + 1, visited, lines);
        }
    }

    /// Serializable per-node views in detection order.
    pub fn nodes(&self) -> Vec<GraphNodeView<'_>> {
        self.graph
            .node_indices()
            .map(|idx| {
                let info = &self.graph[idx];
                GraphNodeView {
                    name: info.name.as_str(),
                    info,
                    parents: self.parents_of(&info.name),
                    children: self.children_of(&info.name),
                }
            })
            .collect()
    }
}

/// One node with its derived relationships, for JSON output.
#[derive(Debug, Serialize)]
pub struct GraphNodeView<'a> {
    pub name: &'a str,
    pub info: &'a ComponentInfo,
    pub parents: Vec<&'a str>,
    pub children: Vec<&'a str>,
}

impl Serialize for ComponentGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes = self.nodes();
        let mut seq = serializer.serialize_seq(Some(nodes.len()))?;
        for node in &nodes {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
