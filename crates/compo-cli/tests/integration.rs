//! End-to-end CLI tests against a fixture project.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn compo() -> Command {
    Command::cargo_bin("compo").expect("Failed to find compo binary")
}

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn fixture_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "src/pages/Dashboard.tsx",
        "\
function Dashboard() {
  const [filter, setFilter] = useState('');
  useEffect(() => {
    console.log(filter);
  }, [filter]);
  return (
    <div>
      <ScoreCard />
      <ScoreCard />
      <Sidebar />
    </div>
  );
}
",
    );
    write_file(
        dir.path(),
        "src/components/ScoreCard.tsx",
        "const ScoreCard = ({ score, label }) => {\n  return <div>{label}: {score}</div>;\n};\n",
    );
    write_file(
        dir.path(),
        "src/components/Sidebar.tsx",
        "function Sidebar() {\n  return <nav />;\n}\n",
    );
    dir
}

// ============================================================================
// map
// ============================================================================

#[test]
fn test_map_lists_components_by_role() {
    let dir = fixture_project();
    compo()
        .args(["map", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected 3 components:"))
        .stdout(predicate::str::contains("PAGE"))
        .stdout(predicate::str::contains("SHARED"))
        .stdout(predicate::str::contains(
            "- Dashboard  (src/pages/Dashboard.tsx",
        ))
        .stdout(predicate::str::contains("hooks: [useState, useEffect]"));
}

#[test]
fn test_map_empty_project() {
    let dir = TempDir::new().unwrap();
    compo()
        .args(["map", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No React components detected."));
}

#[test]
fn test_map_json_output() {
    let dir = fixture_project();
    let output = compo()
        .args(["map", "--json", "--project"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["components"].as_array().unwrap().len(), 3);

    let dashboard = json["graph"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["name"] == "Dashboard")
        .unwrap();
    assert_eq!(dashboard["children"][0], "ScoreCard");
    assert_eq!(dashboard["info"]["role"], "page");
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_shows_details() {
    let dir = fixture_project();
    compo()
        .args(["analyze", "Dashboard", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Component: Dashboard"))
        .stdout(predicate::str::contains("Role:      page"))
        .stdout(predicate::str::contains("State:    2-2"))
        .stdout(predicate::str::contains("Effects:  3-5"))
        .stdout(predicate::str::contains("JSX:      7-11"))
        .stdout(predicate::str::contains("- useState"))
        .stdout(predicate::str::contains("- ScoreCard"));
}

#[test]
fn test_analyze_unknown_component() {
    let dir = fixture_project();
    compo()
        .args(["analyze", "Nope", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No component named \"Nope\" found."));
}

#[test]
fn test_analyze_props() {
    let dir = fixture_project();
    compo()
        .args(["analyze", "ScoreCard", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- score"))
        .stdout(predicate::str::contains("- label"));
}

// ============================================================================
// tree
// ============================================================================

#[test]
fn test_tree_shows_parents_and_children() {
    let dir = fixture_project();
    compo()
        .args(["tree", "ScoreCard", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Component tree for: ScoreCard"))
        .stdout(predicate::str::contains("- Dashboard (LOC: 13)"))
        .stdout(predicate::str::contains("(no children components detected)"));
}

#[test]
fn test_tree_renders_duplicate_children() {
    let dir = fixture_project();
    compo()
        .args(["tree", "Dashboard", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(no parents found - likely a top-level or entry component)",
        ))
        .stdout(predicate::str::contains("  - ScoreCard (LOC: 3, role: shared)"))
        .stdout(predicate::str::contains("  - Sidebar (LOC: 3, role: shared)"));
}

#[test]
fn test_tree_suggests_similar_names() {
    let dir = fixture_project();
    compo()
        .args(["tree", "score", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No component named \"score\" found in graph.",
        ))
        .stdout(predicate::str::contains("Did you mean:"))
        .stdout(predicate::str::contains("  - ScoreCard"));
}

// ============================================================================
// radar
// ============================================================================

#[test]
fn test_radar_clean_project() {
    let dir = fixture_project();
    compo()
        .args(["radar", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No components flagged."));
}

#[test]
fn test_radar_flags_oversized_component() {
    let dir = fixture_project();
    // a component padded past the 200-line warning threshold
    let mut source = String::from("function Monster() {\n");
    for i in 0..220 {
        source.push_str(&format!("  const v{i} = {i};\n"));
    }
    source.push_str("  return <div />;\n}\n");
    write_file(dir.path(), "src/features/Monster.tsx", &source);

    compo()
        .args(["radar", "--project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[warning] Monster"))
        .stdout(predicate::str::contains("lines long"));
}
