//! Tests for `table_io`.

use std::io::Write;

use crate::table_io::{
  load_edgelist, load_node_attributes, load_story_tables, read_edgelist, read_node_attributes,
  read_story_tables,
};
use crate::types::{Attribute, AttributeRecord, EdgeRecord, NodeId, StoryGraph};

fn text(s: &str) -> NodeId {
  NodeId::Text(s.to_string())
}

#[test]
fn reads_integer_edges() {
  let csv = "source,target\n1,2\n2,3\n2, 4\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  assert_eq!(
    rows,
    vec![
      EdgeRecord::new(1, 2),
      EdgeRecord::new(2, 3),
      EdgeRecord::new(2, 4)
    ]
  );
}

#[test]
fn reads_text_edges() {
  let csv = "source,target\nintro,cave\ncave,end\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  assert_eq!(rows[0].source, NodeId::Text("intro".to_string()));
  assert_eq!(rows[1].target, NodeId::Text("end".to_string()));
}

#[test]
fn reads_attributes_keeping_unknown_labels() {
  let csv = "node,attribute\n3,good\n4,bad\n2,pause\n9,twist\n";
  let rows = read_node_attributes(csv.as_bytes()).unwrap();
  assert_eq!(rows[0], AttributeRecord::new(3, "good"));
  assert_eq!(rows[3].attribute, Attribute::Unknown("twist".to_string()));
}

#[test]
fn missing_column_is_an_error() {
  let csv = "source\n1\n";
  assert!(read_edgelist(csv.as_bytes()).is_err());
}

#[test]
fn loads_from_files() {
  let dir = tempfile::tempdir().unwrap();
  let edges = dir.path().join("edgelist.csv");
  let nodes = dir.path().join("nodeAttributes.csv");
  let mut f = std::fs::File::create(&edges).unwrap();
  writeln!(f, "source,target\n1,2").unwrap();
  let mut f = std::fs::File::create(&nodes).unwrap();
  writeln!(f, "node,attribute\n2,good").unwrap();
  assert_eq!(load_edgelist(&edges).unwrap().len(), 1);
  assert_eq!(load_node_attributes(&nodes).unwrap().len(), 1);
  assert!(load_edgelist(&dir.path().join("missing.csv")).is_err());
}

#[test]
fn ids_that_look_alike_stay_distinct() {
  let csv = "source,target\nstart,01\nstart,1\nstart,1.0\nstart,1e3\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  let targets: Vec<&NodeId> = rows.iter().map(|r| &r.target).collect();
  assert_eq!(
    targets,
    vec![&text("01"), &text("1"), &text("1.0"), &text("1e3")]
  );
  let graph = StoryGraph::from_edges("t", &rows);
  assert_eq!(graph.len(), 5);
  assert_eq!(graph.children_of(&text("start")).unwrap().len(), 4);
}

#[test]
fn one_non_canonical_integer_makes_the_whole_table_text() {
  let csv = "source,target\n1,2\n2,02\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  assert_eq!(rows[0], EdgeRecord { source: text("1"), target: text("2") });
  assert_eq!(rows[1].target, text("02"));
}

#[test]
fn mixed_table_orders_ids_as_text() {
  let csv = "source,target\n10,a\n9,b\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  let mut graph = StoryGraph::from_edges("t", &rows);
  graph.find_roots();
  assert_eq!(graph.choose_default_root(), Some(text("10")));
}

#[test]
fn integer_beyond_i64_loads_as_text() {
  let csv = "source,target\n1,99999999999999999999\n";
  let rows = read_edgelist(csv.as_bytes()).unwrap();
  assert_eq!(rows[0].target, text("99999999999999999999"));
  assert_eq!(rows[0].source, text("1"));
}

#[test]
fn story_tables_share_one_id_type() {
  let edges = "source,target\n1,2\n2,3\n";
  let nodes = "node,attribute\n3,good\nintro,pause\n";
  let (edges, attributes) = read_story_tables(edges.as_bytes(), nodes.as_bytes()).unwrap();
  assert_eq!(edges[1].target, text("3"));
  assert_eq!(attributes[0].node, edges[1].target);

  let (edges, attributes) =
    read_story_tables("source,target\n1,2\n".as_bytes(), "node,attribute\n2,bad\n".as_bytes())
      .unwrap();
  assert_eq!(edges[0], EdgeRecord::new(1, 2));
  assert_eq!(attributes[0], AttributeRecord::new(2, "bad"));
}

#[test]
fn loads_story_tables_from_files() {
  let dir = tempfile::tempdir().unwrap();
  let edges = dir.path().join("edgelist.csv");
  let nodes = dir.path().join("nodeAttributes.csv");
  std::fs::write(&edges, "source,target\nintro,7\n").unwrap();
  std::fs::write(&nodes, "node,attribute\n7,good\n").unwrap();
  let (edges, attributes) = load_story_tables(&edges, &nodes).unwrap();
  assert_eq!(edges[0].target, text("7"));
  assert_eq!(attributes[0].node, text("7"));
}
