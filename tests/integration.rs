//! Integration tests that run the storystructure CLI on the CSV fixtures in
//! tests/integration/.

use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("integration")
    .join(name)
}

/// Runs the built binary. Returns (stdout, stderr, success).
fn run_cli(args: &[&str]) -> (String, String, bool) {
  run_cli_with_env(args, &[])
}

fn run_cli_with_env(args: &[&str], env: &[(&str, &str)]) -> (String, String, bool) {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_storystructure"));
  cmd.args(args).env_remove("STORYSTRUCTURE_SEED");
  for (k, v) in env {
    cmd.env(k, v);
  }
  let out = cmd.output().expect("run storystructure");
  (
    String::from_utf8_lossy(&out.stdout).into_owned(),
    String::from_utf8_lossy(&out.stderr).into_owned(),
    out.status.success(),
  )
}

fn path_str(p: &Path) -> &str {
  p.to_str().expect("utf-8 path")
}

#[test]
fn simplified_story_writes_path_statistics() {
  let dir = tempfile::tempdir().unwrap();
  let stats = dir.path().join("allPaths.dat");
  let edges = fixture("edgelist.csv");
  let nodes = fixture("nodeAttributes.csv");
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--nodes",
    path_str(&nodes),
    "--simplify",
    "--stats",
    path_str(&stats),
  ]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Nodes: 7"));
  assert!(stdout.contains("Roots: 1"));
  assert!(stdout.contains("Duplicate edges: 1"));
  assert!(stdout.contains("Self loops: 1"));
  assert!(stdout.contains("Paths: 3"));
  // cycle 5 -> 2, attributed 8 and 9 outside the graph, unknown label on 8
  assert!(stdout.contains("Reports: 4"));

  let text = std::fs::read_to_string(&stats).unwrap();
  let lines: Vec<&str> = text.lines().collect();
  assert_eq!(
    lines,
    vec![
      "pathLength\tendType\tnumberOfPause\tstepsToFirstPause\tpathString",
      "3\tgood\t0\tNone\t[1, 2, 3]",
      "5\tbad\t1\t2\t[1, 2, 4, 5, 6]",
      "2\tgood\t0\tNone\t[1, 7]",
    ]
  );
  assert!(stderr.contains("to avoid a cycle"));
  assert!(stderr.contains("unknown attribute"));
}

#[test]
fn unsimplified_story_keeps_duplicate_routes() {
  let edges = fixture("edgelist.csv");
  let nodes = fixture("nodeAttributes.csv");
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--nodes",
    path_str(&nodes),
  ]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Paths: 5"));
}

#[test]
fn explicit_root() {
  let edges = fixture("edgelist.csv");
  let (stdout, stderr, success) = run_cli(&["--edges", path_str(&edges), "--simplify", "--root", "4"]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Paths: 2"));
}

#[test]
fn unknown_root_fails() {
  let edges = fixture("edgelist.csv");
  let (_stdout, stderr, success) = run_cli(&["--edges", path_str(&edges), "--root", "404"]);
  assert!(!success);
  assert!(stderr.contains("404"));
}

#[test]
fn clustering_rewrites_the_description() {
  let dir = tempfile::tempdir().unwrap();
  let dot = dir.path().join("clustered.dot");
  let edges = fixture("edgelist.csv");
  let nodes = fixture("nodeAttributes.csv");
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--nodes",
    path_str(&nodes),
    "--simplify",
    "--cluster",
    "1.0",
    "--seed",
    "5",
    "--skip-isolated",
    "--dot",
    path_str(&dot),
  ]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Clustered paths: 1"));
  let text = std::fs::read_to_string(&dot).unwrap();
  assert!(text.starts_with("digraph myGraph {\n"));
  assert!(text.ends_with("}\n"));
  assert!(!text.contains("9 [style=filled"));
  assert!(!text.contains("8;"));
  assert!(text.contains("1 -> "));
}

#[test]
fn seed_from_environment_is_reproducible() {
  let dir = tempfile::tempdir().unwrap();
  let first = dir.path().join("a.dot");
  let second = dir.path().join("b.dot");
  let edges = fixture("edgelist.csv");
  for out in [&first, &second] {
    let (_, stderr, success) = run_cli_with_env(
      &[
        "--edges",
        path_str(&edges),
        "--simplify",
        "--cluster",
        "1.0",
        "--dot",
        path_str(out),
      ],
      &[("STORYSTRUCTURE_SEED", "42")],
    );
    assert!(success, "stderr={}", stderr);
  }
  assert_eq!(
    std::fs::read_to_string(&first).unwrap(),
    std::fs::read_to_string(&second).unwrap()
  );
}

#[test]
fn text_ids_render_as_json_strings() {
  let dir = tempfile::tempdir().unwrap();
  let stats = dir.path().join("paths.dat");
  let edges = fixture("text_edgelist.csv");
  let nodes = fixture("text_nodeAttributes.csv");
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--nodes",
    path_str(&nodes),
    "--stats",
    path_str(&stats),
  ]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Roots: intro"));
  let text = std::fs::read_to_string(&stats).unwrap();
  assert!(text.contains("3\tbad\t0\tNone\t[\"intro\", \"forest\", \"wolf\"]"));
  assert!(text.contains("3\tgood\t0\tNone\t[\"intro\", \"village\", \"feast\"]"));
}

#[test]
fn missing_layout_binary_fails_after_writing_description() {
  let dir = tempfile::tempdir().unwrap();
  let figure = dir.path().join("story.png");
  let edges = fixture("edgelist.csv");
  let (_stdout, stderr, success) = run_cli_with_env(
    &["--edges", path_str(&edges), "--figure", path_str(&figure)],
    &[("STORYSTRUCTURE_DOT_CMD", "storystructure-no-such-layout-binary")],
  );
  assert!(!success);
  assert!(stderr.contains("rendering failed"));
  assert!(dir.path().join("story.dot").exists());
}

#[test]
fn missing_edge_file_fails() {
  let (_stdout, stderr, success) = run_cli(&["--edges", "/nonexistent/edgelist.csv"]);
  assert!(!success);
  assert!(stderr.contains("Error"));
}

#[test]
fn unknown_label_is_logged_once() {
  let dir = tempfile::tempdir().unwrap();
  let dot = dir.path().join("story.dot");
  let edges = fixture("edgelist.csv");
  let nodes = fixture("nodeAttributes.csv");
  let (_stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--nodes",
    path_str(&nodes),
    "--dot",
    path_str(&dot),
  ]);
  assert!(success, "stderr={}", stderr);
  assert_eq!(stderr.matches("unknown attribute").count(), 1);
  assert!(std::fs::read_to_string(&dot).unwrap().contains("8;\n"));
}

#[test]
fn clustering_a_story_without_root_fails_before_touching_edges() {
  let dir = tempfile::tempdir().unwrap();
  let edges = dir.path().join("loop.csv");
  let dot = dir.path().join("loop.dot");
  std::fs::write(&edges, "source,target\n1,2\n2,1\n").unwrap();
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--cluster",
    "0.5",
    "--dot",
    path_str(&dot),
  ]);
  assert!(!success);
  assert!(stdout.contains("Paths: 0 (no root)"));
  assert!(stderr.contains("no root"));
  assert!(!dot.exists());

  let (_stdout, stderr, success) = run_cli(&["--edges", path_str(&edges), "--dot", path_str(&dot)]);
  assert!(success, "stderr={}", stderr);
  let text = std::fs::read_to_string(&dot).unwrap();
  assert!(text.contains("1 -> 2;"));
  assert!(text.contains("2 -> 1;"));
}

#[test]
fn lookalike_ids_stay_distinct_and_quoted() {
  let dir = tempfile::tempdir().unwrap();
  let edges = dir.path().join("edgelist.csv");
  let stats = dir.path().join("paths.dat");
  let dot = dir.path().join("story.dot");
  std::fs::write(
    &edges,
    "source,target\nstart,01\nstart,1\nstart,1.0\nstart,dark forest\n",
  )
  .unwrap();
  let (stdout, stderr, success) = run_cli(&[
    "--edges",
    path_str(&edges),
    "--stats",
    path_str(&stats),
    "--dot",
    path_str(&dot),
  ]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Nodes: 5"));
  assert!(stdout.contains("Paths: 4"));
  let text = std::fs::read_to_string(&stats).unwrap();
  assert!(text.contains("[\"start\", \"01\"]"));
  assert!(text.contains("[\"start\", \"1\"]"));
  assert!(text.contains("[\"start\", \"1.0\"]"));
  let description = std::fs::read_to_string(&dot).unwrap();
  assert!(description.contains("start -> \"dark forest\";"));
}

#[test]
fn numeric_looking_root_in_a_text_story() {
  let dir = tempfile::tempdir().unwrap();
  let edges = dir.path().join("edgelist.csv");
  std::fs::write(&edges, "source,target\n10,a\n9,b\nb,c\n").unwrap();
  let (stdout, stderr, success) = run_cli(&["--edges", path_str(&edges)]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Roots: 10, 9"));
  assert!(stdout.contains("Paths: 1"));
  let (stdout, stderr, success) = run_cli(&["--edges", path_str(&edges), "--root", "9"]);
  assert!(success, "stderr={}", stderr);
  assert!(stdout.contains("Paths: 1"));
}
