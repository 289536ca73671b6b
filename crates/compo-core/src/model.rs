//! Component Data Model
//!
//! Schema for the records produced by one analysis run: each detected
//! component's identity, declared props, hooks, rendered children, size and
//! structural line ranges.

use serde::{Deserialize, Serialize};

// ============================================================================
// Component Role
// ============================================================================

/// Coarse path-derived classification of a component.
///
/// Inferred purely from path-segment substrings; not semantically
/// load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    Page,
    Feature,
    Shared,
    Unknown,
}

impl ComponentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentRole::Page => "page",
            ComponentRole::Feature => "feature",
            ComponentRole::Shared => "shared",
            ComponentRole::Unknown => "unknown",
        }
    }

    /// Infer a role from a file path.
    ///
    /// First match wins: pages, then features, then components/shared/ui.
    /// The path is normalized to a leading separator so top-level segments
    /// of a relative path still match.
    pub fn from_path(file_path: &str) -> Self {
        let lower = format!("/{}", file_path.to_lowercase().replace('\\', "/"));
        if lower.contains("/pages/") {
            ComponentRole::Page
        } else if lower.contains("/features/") {
            ComponentRole::Feature
        } else if lower.contains("/components/")
            || lower.contains("/shared/")
            || lower.contains("/ui/")
        {
            ComponentRole::Shared
        } else {
            ComponentRole::Unknown
        }
    }
}

impl std::fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Line Ranges
// ============================================================================

/// Inclusive 1-based line span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Structural sub-spans of a component body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralRanges {
    /// One merged span covering all top-level state-hook statements, or
    /// absent when the component declares no state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<LineRange>,

    /// One range per detected effect call, in source order, unmerged.
    pub effects: Vec<LineRange>,

    /// One range per handler statement (inline function binding or nested
    /// named function), in source order.
    pub handlers: Vec<LineRange>,

    /// Range of the returned markup expression. Recorded only when a return
    /// statement directly yields markup (after stripping one level of
    /// parenthesization).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx: Option<LineRange>,
}

// ============================================================================
// Component Info
// ============================================================================

/// One recognized UI component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Declared binding name. Not guaranteed unique across the project.
    pub name: String,

    /// Path relative to the analysis root, for display and provenance.
    pub file_path: String,

    /// Path-derived classification.
    pub role: ComponentRole,

    /// Parameter names taken from the first parameter only, in declaration
    /// order. Empty if the component takes no props.
    pub props: Vec<String>,

    /// Hook call identifiers (`use*` prefix), deduplicated, first-appearance
    /// order preserved.
    pub hooks: Vec<String>,

    /// Distinct capitalized tag names rendered in the body.
    pub children: Vec<String>,

    /// Line count of the defining function span (always >= 1).
    pub loc: usize,

    /// Cyclomatic complexity. Not computed yet; always `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,

    /// Structural decomposition of the component body.
    pub line_ranges: StructuralRanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_path_first_match_wins() {
        assert_eq!(
            ComponentRole::from_path("src/pages/Home.tsx"),
            ComponentRole::Page
        );
        assert_eq!(
            ComponentRole::from_path("src/features/scores/List.tsx"),
            ComponentRole::Feature
        );
        assert_eq!(
            ComponentRole::from_path("src/components/Button.tsx"),
            ComponentRole::Shared
        );
        assert_eq!(
            ComponentRole::from_path("src/shared/Modal.jsx"),
            ComponentRole::Shared
        );
        assert_eq!(
            ComponentRole::from_path("src/ui/Badge.tsx"),
            ComponentRole::Shared
        );
        // pages takes precedence over components
        assert_eq!(
            ComponentRole::from_path("src/pages/components/Hero.tsx"),
            ComponentRole::Page
        );
        assert_eq!(
            ComponentRole::from_path("src/App.tsx"),
            ComponentRole::Unknown
        );
    }

    #[test]
    fn test_role_matches_top_level_segment() {
        // A relative path starting with the segment still classifies
        assert_eq!(
            ComponentRole::from_path("pages/Home.tsx"),
            ComponentRole::Page
        );
    }

    #[test]
    fn test_line_range_display() {
        assert_eq!(LineRange::new(3, 10).to_string(), "3-10");
    }

    #[test]
    fn test_structural_ranges_default_is_empty() {
        let ranges = StructuralRanges::default();
        assert!(ranges.state.is_none());
        assert!(ranges.effects.is_empty());
        assert!(ranges.handlers.is_empty());
        assert!(ranges.jsx.is_none());
    }
}
