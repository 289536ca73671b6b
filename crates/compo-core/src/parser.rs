//! Tree-Sitter Parser Facade for Component Analysis
//!
//! This module wraps tree-sitter parsing for the JSX-capable grammars and
//! exposes the node-kind predicates the component detector and extractor
//! operate on.
//!
//! ## Supported Languages
//!
//! - JavaScript (.js, .mjs, .cjs)
//! - JavaScript with JSX (.jsx)
//! - TypeScript (.ts)
//! - TypeScript with JSX (.tsx)

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

// ============================================================================
// Supported Languages
// ============================================================================

/// Supported source languages for component detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SupportedLanguage {
    /// Get the language name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLanguage::JavaScript => "javascript",
            SupportedLanguage::Jsx => "jsx",
            SupportedLanguage::TypeScript => "typescript",
            SupportedLanguage::Tsx => "tsx",
        }
    }

    /// Get the tree-sitter Language for this language.
    ///
    /// Plain `.js` files are parsed with the JavaScript grammar (which accepts
    /// JSX), `.ts` with the TypeScript grammar, and `.jsx`/`.tsx` with the TSX
    /// grammar so markup elements are always recognized.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SupportedLanguage::JavaScript | SupportedLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
            SupportedLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SupportedLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Detect language from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        get_extension_map()
            .get(ext.to_lowercase().as_str())
            .copied()
    }

    /// Detect language from file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get all supported file extensions.
    pub fn all_extensions() -> &'static [&'static str] {
        &["js", "mjs", "cjs", "jsx", "ts", "tsx"]
    }
}

impl std::fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static extension to language mapping.
static EXTENSION_MAP: OnceLock<HashMap<&'static str, SupportedLanguage>> = OnceLock::new();

fn get_extension_map() -> &'static HashMap<&'static str, SupportedLanguage> {
    EXTENSION_MAP.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert("js", SupportedLanguage::JavaScript);
        map.insert("mjs", SupportedLanguage::JavaScript);
        map.insert("cjs", SupportedLanguage::JavaScript);
        map.insert("jsx", SupportedLanguage::Jsx);
        map.insert("ts", SupportedLanguage::TypeScript);
        map.insert("tsx", SupportedLanguage::Tsx);
        map
    })
}

// ============================================================================
// Parser Errors
// ============================================================================

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Failed to set language
    #[error("Failed to set language: {0}")]
    LanguageSet(String),

    /// Failed to parse source code
    #[error("Failed to parse source code")]
    ParseFailed,

    /// Unsupported language
    #[error("Unsupported language for file: {0}")]
    UnsupportedLanguage(String),
}

// ============================================================================
// Source Parser
// ============================================================================

/// A tree-sitter based parser for one source language.
pub struct SourceParser {
    parser: Parser,
    language: SupportedLanguage,
}

impl SourceParser {
    /// Create a new parser for the specified language.
    pub fn new(language: SupportedLanguage) -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| ParserError::LanguageSet(e.to_string()))?;

        Ok(Self { parser, language })
    }

    /// Create a parser for the given file path.
    ///
    /// Detects language from file extension.
    pub fn for_path(path: &Path) -> Result<Self, ParserError> {
        let language = SupportedLanguage::from_path(path)
            .ok_or_else(|| ParserError::UnsupportedLanguage(path.display().to_string()))?;
        Self::new(language)
    }

    /// Get the language this parser is configured for.
    pub fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parse source code into a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, ParserError> {
        self.parser
            .parse(source, None)
            .ok_or(ParserError::ParseFailed)
    }
}

// ============================================================================
// Node-Kind Predicates
// ============================================================================

/// Export wrapper: `export function Foo() {}`, `export const Foo = ...`,
/// `export default function Foo() {}`. The wrapped declaration sits in the
/// `declaration` field.
pub fn is_export_statement(node: &Node) -> bool {
    node.kind() == "export_statement"
}

/// Named function declaration: `function Foo() {}`.
pub fn is_function_declaration(node: &Node) -> bool {
    node.kind() == "function_declaration"
}

/// Variable statement: `const`/`let` (`lexical_declaration`) or `var`
/// (`variable_declaration`).
pub fn is_variable_statement(node: &Node) -> bool {
    matches!(node.kind(), "lexical_declaration" | "variable_declaration")
}

/// Single declarator inside a variable statement.
pub fn is_variable_declarator(node: &Node) -> bool {
    node.kind() == "variable_declarator"
}

/// Arrow function or anonymous function expression.
pub fn is_function_expression(node: &Node) -> bool {
    matches!(node.kind(), "arrow_function" | "function_expression")
}

pub fn is_identifier(node: &Node) -> bool {
    node.kind() == "identifier"
}

pub fn is_call_expression(node: &Node) -> bool {
    node.kind() == "call_expression"
}

/// Markup element in any of its three forms: element, self-closing element,
/// or fragment.
pub fn is_jsx_node(node: &Node) -> bool {
    matches!(
        node.kind(),
        "jsx_element" | "jsx_self_closing_element" | "jsx_fragment"
    )
}

/// Markup tag carrying a name: an opening tag or a self-closing element.
pub fn is_jsx_tag(node: &Node) -> bool {
    matches!(
        node.kind(),
        "jsx_opening_element" | "jsx_self_closing_element"
    )
}

pub fn is_object_pattern(node: &Node) -> bool {
    node.kind() == "object_pattern"
}

pub fn is_return_statement(node: &Node) -> bool {
    node.kind() == "return_statement"
}

pub fn is_parenthesized_expression(node: &Node) -> bool {
    node.kind() == "parenthesized_expression"
}

pub fn is_statement_block(node: &Node) -> bool {
    node.kind() == "statement_block"
}

// ============================================================================
// Traversal Helpers
// ============================================================================

/// Visit every named node in the subtree rooted at `node`, including `node`
/// itself, in pre-order.
pub fn visit_subtree<'tree, F>(node: Node<'tree>, f: &mut F)
where
    F: FnMut(Node<'tree>),
{
    f(node);
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit_subtree(child, f);
    }
}

/// Get the UTF-8 text of a node, falling back to empty on invalid slices.
pub fn node_text<'s>(node: &Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line range of a node.
pub fn node_lines(node: &Node) -> (usize, usize) {
    (node.start_position().row + 1, node.end_position().row + 1)
}

// ============================================================================
// Tests
// ============================================================================
