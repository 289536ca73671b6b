//! Component Detection and Extraction
//!
//! Walks each file's top-level declarations, applies the structural-shape
//! rules deciding "is this a component", and derives the full
//! [`ComponentInfo`] record for every match: props, hooks, rendered children,
//! line span, and structural sub-ranges.
//!
//! Detection is purely syntactic. A declaration qualifies when it binds a
//! Pascal-case name to a function whose body contains at least one markup
//! element, in either of two forms:
//!
//! - `function MyComponent(props) { return <div /> }`
//! - `const MyComponent = (props) => { return <div /> }`

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use tree_sitter::Node;

use crate::graph::{ComponentGraph, Diagnostic};
use crate::model::{ComponentInfo, ComponentRole, LineRange, StructuralRanges};
use crate::parser::{
    is_call_expression, is_export_statement, is_function_declaration, is_function_expression,
    is_identifier,
    is_jsx_node, is_jsx_tag, is_object_pattern, is_parenthesized_expression, is_return_statement,
    is_statement_block, is_variable_declarator, is_variable_statement, node_lines, node_text,
    visit_subtree, ParserError, SourceParser, SupportedLanguage,
};
use crate::project::{load_project, ProjectError};

/// Errors during a project analysis run.
///
/// Detection and extraction never fail; only configuration, IO and
/// parse-level problems propagate.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// A detected component together with its raw rendered-tag occurrences.
///
/// `info.children` is deduplicated; `rendered` keeps one entry per syntactic
/// usage so graph edges can preserve duplicates.
#[derive(Debug, Clone)]
pub struct DetectedComponent {
    pub info: ComponentInfo,
    pub rendered: Vec<String>,
}

/// Result of one analysis run.
#[derive(Debug, serde::Serialize)]
pub struct AnalyzeResult {
    /// All detected components in file-then-declaration order, including
    /// entries whose name collided in the graph.
    pub components: Vec<ComponentInfo>,
    /// Name-keyed usage graph (first occurrence wins on duplicate names).
    pub graph: ComponentGraph,
    /// Structured notes about silently-resolved inconsistencies.
    pub diagnostics: Vec<Diagnostic>,
}

/// Analyze the project at `project_root`.
///
/// The single entry point: parses every source file, detects components,
/// and assembles the usage graph. Deterministic for identical file contents;
/// no side effects beyond reading files.
pub fn analyze_project(project_root: &Path) -> Result<AnalyzeResult, AnalyzeError> {
    let project = load_project(project_root)?;

    let mut detected = Vec::new();
    for file in &project.files {
        if is_test_file(&file.relative) || is_declaration_file(&file.relative) {
            debug!("Skipping {}", file.relative);
            continue;
        }

        let source =
            std::fs::read_to_string(&file.path).map_err(|source| AnalyzeError::FileRead {
                path: file.path.clone(),
                source,
            })?;

        detected.extend(analyze_source(&source, file.language, &file.relative)?);
    }

    info!("Detected {} component(s)", detected.len());

    let (graph, diagnostics) = ComponentGraph::build(&detected);
    let components = detected.into_iter().map(|d| d.info).collect();

    Ok(AnalyzeResult {
        components,
        graph,
        diagnostics,
    })
}

/// Detect all components declared at the top level of one source text.
pub fn analyze_source(
    source: &str,
    language: SupportedLanguage,
    file_path: &str,
) -> Result<Vec<DetectedComponent>, ParserError> {
    let mut parser = SourceParser::new(language)?;
    let tree = parser.parse(source)?;
    let root = tree.root_node();
    let bytes = source.as_bytes();

    let mut components = Vec::new();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        if let Some(comp) = detect_component(node, bytes, file_path) {
            components.push(comp);
        }
    }
    Ok(components)
}

/// Test files are skipped entirely before detection runs.
fn is_test_file(file_path: &str) -> bool {
    let lower = format!("/{}", file_path.to_lowercase());
    lower.contains("/tests/")
        || lower.contains("__mocks__")
        || lower.ends_with(".test.js")
        || lower.ends_with(".test.jsx")
        || lower.ends_with(".test.ts")
        || lower.ends_with(".test.tsx")
}

/// Type-only declaration files are skipped entirely.
fn is_declaration_file(file_path: &str) -> bool {
    file_path.ends_with(".d.ts") || file_path.ends_with(".d.mts") || file_path.ends_with(".d.cts")
}

fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Apply the two shape rules to one top-level declaration.
fn detect_component(node: Node, source: &[u8], file_path: &str) -> Option<DetectedComponent> {
    // `export function App()`, `export const App = ...` and
    // `export default function App()` wrap the declaration in an export
    // statement; detection applies to the inner declaration. Re-exports
    // (`export { App }`, `export default App;`) carry no declaration.
    let node = if is_export_statement(&node) {
        node.child_by_field_name("declaration")?
    } else {
        node
    };

    // Rule A: function MyComponent(props) { return <div /> }
    if is_function_declaration(&node) {
        let name_node = node.child_by_field_name("name")?;
        let name = node_text(&name_node, source);
        if is_pascal_case(name) && contains_jsx(&node) {
            return Some(extract_component(name, node, source, file_path));
        }
        return None;
    }

    // Rule B: const MyComponent = (props) => { return <div /> }
    // Only the first qualifying declarator in a statement is taken.
    if is_variable_statement(&node) {
        let mut cursor = node.walk();
        for decl in node.named_children(&mut cursor) {
            if !is_variable_declarator(&decl) {
                continue;
            }
            let Some(name_node) = decl.child_by_field_name("name") else {
                continue;
            };
            if !is_identifier(&name_node) {
                continue;
            }
            let name = node_text(&name_node, source);
            if !is_pascal_case(name) {
                continue;
            }
            let Some(init) = decl.child_by_field_name("value") else {
                continue;
            };
            if is_function_expression(&init) && contains_jsx(&init) {
                return Some(extract_component(name, init, source, file_path));
            }
        }
    }

    None
}

/// Existence scan: does this function's body contain a markup element at any
/// depth?
fn contains_jsx(func: &Node) -> bool {
    let Some(body) = func.child_by_field_name("body") else {
        return false;
    };
    let mut found = false;
    visit_subtree(body, &mut |n| {
        if is_jsx_node(&n) {
            found = true;
        }
    });
    found
}

/// Compute the full component record for a qualifying function-like node.
fn extract_component(
    name: &str,
    func: Node,
    source: &[u8],
    file_path: &str,
) -> DetectedComponent {
    let (start_line, end_line) = node_lines(&func);
    let loc = end_line - start_line + 1;

    let props = extract_prop_names(&func, source);

    let mut hooks_raw = Vec::new();
    let mut rendered = Vec::new();
    if let Some(body) = func.child_by_field_name("body") {
        visit_subtree(body, &mut |n| {
            collect_hook(&n, source, &mut hooks_raw);
            collect_child_tag(&n, source, &mut rendered);
        });
    }

    let hooks = dedup_preserving_order(&hooks_raw);
    let children = dedup_preserving_order(&rendered);

    let line_ranges = collect_structural_ranges(&func, source);

    let info = ComponentInfo {
        name: name.to_string(),
        file_path: file_path.to_string(),
        role: ComponentRole::from_path(file_path),
        props,
        hooks,
        children,
        loc,
        complexity: None,
        line_ranges,
    };

    DetectedComponent { info, rendered }
}

/// Record a hook call: a call expression whose callee is a bare identifier
/// with the `use` prefix.
fn collect_hook(node: &Node, source: &[u8], hooks: &mut Vec<String>) {
    if !is_call_expression(node) {
        return;
    }
    if let Some(callee) = node.child_by_field_name("function") {
        if is_identifier(&callee) {
            let name = node_text(&callee, source);
            if name.starts_with("use") {
                hooks.push(name.to_string());
            }
        }
    }
}

/// Record a rendered child: an opening or self-closing tag whose name is a
/// bare capitalized identifier. Lowercase tags are DOM elements, not
/// components.
fn collect_child_tag(node: &Node, source: &[u8], children: &mut Vec<String>) {
    if !is_jsx_tag(node) {
        return;
    }
    if let Some(tag) = node.child_by_field_name("name") {
        if is_identifier(&tag) {
            let tag_name = node_text(&tag, source);
            if is_pascal_case(tag_name) {
                children.push(tag_name.to_string());
            }
        }
    }
}

fn dedup_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

/// Extract prop names from the first parameter only.
///
/// A destructuring pattern yields each bound field name in declaration
/// order; a plain identifier yields that identifier itself (a parameter
/// literally named `props` yields `["props"]`).
fn extract_prop_names(func: &Node, source: &[u8]) -> Vec<String> {
    let first = first_parameter(func);
    let Some(mut param) = first else {
        return Vec::new();
    };

    // TypeScript grammars wrap each parameter in a (required|optional)
    // parameter node carrying the pattern.
    if matches!(param.kind(), "required_parameter" | "optional_parameter") {
        match param.child_by_field_name("pattern") {
            Some(pattern) => param = pattern,
            None => return Vec::new(),
        }
    }

    if is_object_pattern(&param) {
        let mut names = Vec::new();
        let mut cursor = param.walk();
        for element in param.named_children(&mut cursor) {
            if let Some(name) = binding_name(&element, source) {
                names.push(name.to_string());
            }
        }
        return names;
    }

    if is_identifier(&param) {
        return vec![node_text(&param, source).to_string()];
    }

    Vec::new()
}

/// The first parameter node, handling both the parenthesized `parameters`
/// list and the bare single-identifier arrow form.
fn first_parameter<'tree>(func: &Node<'tree>) -> Option<Node<'tree>> {
    if let Some(params) = func.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        return params.named_children(&mut cursor).next();
    }
    // `props => ...`
    func.child_by_field_name("parameter")
}

/// The bound name of one object-pattern element.
fn binding_name<'s>(element: &Node, source: &'s [u8]) -> Option<&'s str> {
    match element.kind() {
        "shorthand_property_identifier_pattern" => Some(node_text(element, source)),
        // { title: t } binds `t`
        "pair_pattern" => {
            let value = element.child_by_field_name("value")?;
            if is_identifier(&value) {
                Some(node_text(&value, source))
            } else if value.kind() == "assignment_pattern" {
                let left = value.child_by_field_name("left")?;
                is_identifier(&left).then(|| node_text(&left, source))
            } else {
                None
            }
        }
        // { title = "untitled" } binds `title`
        "object_assignment_pattern" => {
            let left = element.child_by_field_name("left")?;
            Some(node_text(&left, source))
        }
        // { ...rest } binds `rest`
        "rest_pattern" => {
            let mut cursor = element.walk();
            let inner = element.named_children(&mut cursor).next()?;
            is_identifier(&inner).then(|| node_text(&inner, source))
        }
        _ => None,
    }
}

/// Derive the structural line ranges from the immediate top-level statements
/// of the function body. Effects are the exception: each statement's entire
/// subtree is scanned for effect calls.
fn collect_structural_ranges(func: &Node, source: &[u8]) -> StructuralRanges {
    let mut ranges = StructuralRanges::default();

    let Some(body) = func.child_by_field_name("body") else {
        return ranges;
    };

    // Expression-bodied arrows have a single pseudo-statement: the body.
    let statements: Vec<Node> = if is_statement_block(&body) {
        let mut cursor = body.walk();
        body.named_children(&mut cursor).collect()
    } else {
        vec![body]
    };

    let mut jsx_done = false;

    for stmt in statements {
        collect_state_range(&stmt, source, &mut ranges);
        collect_effect_ranges(&stmt, source, &mut ranges);
        collect_handler_range(&stmt, &mut ranges);

        if !jsx_done && is_return_statement(&stmt) {
            if let Some(expr) = stmt.named_child(0) {
                let target = if is_parenthesized_expression(&expr) {
                    expr.named_child(0).unwrap_or(expr)
                } else {
                    expr
                };
                if is_jsx_node(&target) {
                    let (start, end) = node_lines(&target);
                    ranges.jsx = Some(LineRange::new(start, end));
                }
                // The first return with an expression ends the jsx scan,
                // whether or not it yielded markup.
                jsx_done = true;
            }
        }
    }

    ranges
}

/// State statements: `const [x, setX] = useState(...)` and friends. The
/// first match seeds the range; later matches extend its end, producing one
/// merged span even across non-contiguous statements.
fn collect_state_range(stmt: &Node, source: &[u8], ranges: &mut StructuralRanges) {
    if !is_variable_statement(stmt) {
        return;
    }
    let mut cursor = stmt.walk();
    let Some(decl) = stmt
        .named_children(&mut cursor)
        .find(is_variable_declarator)
    else {
        return;
    };
    let Some(init) = decl.child_by_field_name("value") else {
        return;
    };
    if !is_call_expression(&init) {
        return;
    }
    let Some(callee) = init.child_by_field_name("function") else {
        return;
    };
    if !is_identifier(&callee) {
        return;
    }
    let name = node_text(&callee, source);
    if name.starts_with("use") && (name.ends_with("State") || name.ends_with("Reducer")) {
        let (start, end) = node_lines(stmt);
        match ranges.state {
            None => ranges.state = Some(LineRange::new(start, end)),
            Some(ref mut range) => range.end = end,
        }
    }
}

/// Effect calls can be nested (e.g. inside an if statement), so the whole
/// statement subtree is scanned. Each call contributes its own range.
fn collect_effect_ranges(stmt: &Node, source: &[u8], ranges: &mut StructuralRanges) {
    visit_subtree(*stmt, &mut |n| {
        if !is_call_expression(&n) {
            return;
        }
        if let Some(callee) = n.child_by_field_name("function") {
            if is_identifier(&callee) {
                let name = node_text(&callee, source);
                if name == "useEffect" || name == "useLayoutEffect" {
                    let (start, end) = node_lines(&n);
                    ranges.effects.push(LineRange::new(start, end));
                }
            }
        }
    });
}

/// Handlers: a variable statement binding at least one inline function, or a
/// nested named function declaration. One range per qualifying statement.
fn collect_handler_range(stmt: &Node, ranges: &mut StructuralRanges) {
    if is_variable_statement(stmt) {
        let mut cursor = stmt.walk();
        let has_function = stmt.named_children(&mut cursor).any(|decl| {
            is_variable_declarator(&decl)
                && decl
                    .child_by_field_name("value")
                    .is_some_and(|init| is_function_expression(&init))
        });
        if has_function {
            let (start, end) = node_lines(stmt);
            ranges.handlers.push(LineRange::new(start, end));
        }
    } else if is_function_declaration(stmt) {
        let (start, end) = node_lines(stmt);
        ranges.handlers.push(LineRange::new(start, end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detect(source: &str) -> Vec<DetectedComponent> {
        analyze_source(source, SupportedLanguage::Tsx, "src/components/Test.tsx").unwrap()
    }

    #[test]
    fn test_detects_named_function_component() {
        let comps = detect("function Card() {\n  return <div />;\n}\n");
        assert_eq!(comps.len(), 1);
        let info = &comps[0].info;
        assert_eq!(info.name, "Card");
        assert_eq!(info.props, Vec::<String>::new());
        assert_eq!(info.loc, 3);
        assert_eq!(info.role, ComponentRole::Shared);
        assert_eq!(info.complexity, None);
    }

    #[test]
    fn test_lowercase_function_is_not_a_component() {
        let comps = detect("function card() {\n  return <div />;\n}\n");
        assert!(comps.is_empty());
    }

    #[test]
    fn test_function_without_jsx_is_not_a_component() {
        let comps = detect("function Helper() {\n  return 42;\n}\n");
        assert!(comps.is_empty());
    }

    #[test]
    fn test_detects_arrow_component() {
        let comps = detect("const Card = () => {\n  return <div />;\n};\n");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].info.name, "Card");
    }

    #[test]
    fn test_detects_function_expression_component() {
        let comps = detect("const Card = function () {\n  return <div />;\n};\n");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].info.name, "Card");
    }

    #[test]
    fn test_detects_exported_components() {
        let source = "export function Card() {\n  return <div />;\n}\n\
                      export const Badge = () => {\n  return <span />;\n};\n";
        let comps = detect(source);
        let names: Vec<&str> = comps.iter().map(|c| c.info.name.as_str()).collect();
        assert_eq!(names, vec!["Card", "Badge"]);
    }

    #[test]
    fn test_detects_default_exported_function_component() {
        let comps = detect("export default function App() {\n  return <main />;\n}\n");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].info.name, "App");
        assert_eq!(comps[0].info.loc, 3);
    }

    #[test]
    fn test_reexport_without_declaration_ignored() {
        let comps = detect("function App() {\n  return <div />;\n}\nexport default App;\n");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].info.name, "App");
    }

    #[test]
    fn test_first_qualifying_declarator_only() {
        let source = "const First = () => { return <a /> }, Second = () => { return <b /> };\n";
        let comps = detect(source);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].info.name, "First");
    }

    #[test]
    fn test_props_from_destructuring() {
        let comps = detect(
            "function Card({ title, onClick }) {\n  return <div>{title}</div>;\n}\n",
        );
        assert_eq!(comps[0].info.props, vec!["title", "onClick"]);
    }

    #[test]
    fn test_props_plain_identifier() {
        let comps = detect("function Card(props) {\n  return <div />;\n}\n");
        assert_eq!(comps[0].info.props, vec!["props"]);
    }

    #[test]
    fn test_props_empty_without_parameters() {
        let comps = detect("function Card() {\n  return <div />;\n}\n");
        assert!(comps[0].info.props.is_empty());
    }

    #[test]
    fn test_props_renamed_defaulted_and_rest() {
        let comps = detect(
            "function Card({ title: t, size = 2, ...rest }) {\n  return <div />;\n}\n",
        );
        assert_eq!(comps[0].info.props, vec!["t", "size", "rest"]);
    }

    #[test]
    fn test_props_only_first_parameter_considered() {
        let comps = detect("function Card({ title }, ref) {\n  return <div />;\n}\n");
        assert_eq!(comps[0].info.props, vec!["title"]);
    }

    #[test]
    fn test_hooks_deduplicated_in_order() {
        let source = "\
function Counter() {
  const [a, setA] = useState(0);
  const [b, setB] = useState(0);
  useEffect(() => {}, []);
  const data = useScoresQuery();
  return <div />;
}
";
        let comps = detect(source);
        assert_eq!(
            comps[0].info.hooks,
            vec!["useState", "useEffect", "useScoresQuery"]
        );
    }

    #[test]
    fn test_children_capitalized_only_and_deduplicated() {
        let source = "\
function Page() {
  return (
    <div>
      <Foo />
      <bar />
      <Foo />
    </div>
  );
}
";
        let comps = detect(source);
        assert_eq!(comps[0].info.children, vec!["Foo"]);
        // raw occurrences keep duplicates for edge derivation
        assert_eq!(comps[0].rendered, vec!["Foo", "Foo"]);
    }

    #[test]
    fn test_state_range_merges_non_adjacent_statements() {
        let source = "\
function Form() {
  const x = 1;
  const [a, setA] = useState(0);
  const y = 2;
  const z = 3;
  const w = 4;
  const v = 5;
  const u = 6;
  const t = 7;
  const [b, dispatch] = useReducer(r, {});
  return <div />;
}
";
        let comps = detect(source);
        let state = comps[0].info.line_ranges.state.unwrap();
        assert_eq!(state, LineRange::new(3, 10));
    }

    #[test]
    fn test_effect_ranges_one_per_call() {
        let source = "\
function Widget() {
  useEffect(() => {}, []);
  if (true) {
    useLayoutEffect(() => {});
  }
  return <div />;
}
";
        let comps = detect(source);
        let effects = &comps[0].info.line_ranges.effects;
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].start, 2);
        assert_eq!(effects[1].start, 4);
    }

    #[test]
    fn test_handler_ranges() {
        let source = "\
function Widget() {
  const handleClick = () => {
    console.log('hi');
  };
  function handleOther() {}
  const plain = 1;
  return <div />;
}
";
        let comps = detect(source);
        let handlers = &comps[0].info.line_ranges.handlers;
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0], LineRange::new(2, 4));
        assert_eq!(handlers[1], LineRange::new(5, 5));
    }

    #[test]
    fn test_jsx_range_from_direct_return() {
        let source = "\
function Widget() {
  const x = 1;
  return (
    <div>
      <span />
    </div>
  );
}
";
        let comps = detect(source);
        let jsx = comps[0].info.line_ranges.jsx.unwrap();
        assert_eq!(jsx, LineRange::new(4, 6));
    }

    #[test]
    fn test_jsx_range_absent_for_indirect_return() {
        // Detection succeeds (markup exists in the body) but the returned
        // expression is a ternary, so no jsx range is recorded.
        let source = "\
function Widget({ on }) {
  return on ? <a /> : <b />;
}
";
        let comps = detect(source);
        assert_eq!(comps.len(), 1);
        assert!(comps[0].info.line_ranges.jsx.is_none());
    }

    #[test]
    fn test_expression_bodied_arrow_detected_without_jsx_range() {
        let comps = detect("const Badge = () => <span />;\n");
        assert_eq!(comps.len(), 1);
        assert!(comps[0].info.line_ranges.jsx.is_none());
    }

    #[test]
    fn test_test_file_predicate() {
        assert!(is_test_file("src/Card.test.tsx"));
        assert!(is_test_file("tests/Card.tsx"));
        assert!(is_test_file("src/__mocks__/Card.tsx"));
        assert!(!is_test_file("src/Card.tsx"));
    }

    #[test]
    fn test_declaration_file_predicate() {
        assert!(is_declaration_file("src/types.d.ts"));
        assert!(!is_declaration_file("src/types.ts"));
    }
}
