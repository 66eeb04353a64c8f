//! Loads the edge and node-attribute tables from CSV.
//!
//! Both tables carry a header row: `source,target` and `node,attribute`.
//! Cells are read as text and typed per table: ids are `Int` only when every id
//! cell in the table is a canonical integer, otherwise every id keeps its
//! source text. [read_story_tables] makes that decision once for both tables so
//! a storylet has the same id in each.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::StoryError;
use crate::types::{Attribute, AttributeRecord, EdgeRecord, NodeId};

#[derive(Debug, Deserialize)]
struct RawEdge {
  source: String,
  target: String,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
  node: String,
  attribute: Attribute,
}

fn read_table<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, StoryError> {
  let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
  let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
  Ok(rows)
}

fn edge_cells(rows: &[RawEdge]) -> impl Iterator<Item = &str> {
  rows.iter().flat_map(|r| [r.source.as_str(), r.target.as_str()])
}

fn attribute_cells(rows: &[RawAttribute]) -> impl Iterator<Item = &str> {
  rows.iter().map(|r| r.node.as_str())
}

fn type_edges(rows: Vec<RawEdge>, integers: bool) -> Vec<EdgeRecord> {
  rows
    .into_iter()
    .map(|r| EdgeRecord {
      source: NodeId::from_cell(&r.source, integers),
      target: NodeId::from_cell(&r.target, integers),
    })
    .collect()
}

fn type_attributes(rows: Vec<RawAttribute>, integers: bool) -> Vec<AttributeRecord> {
  rows
    .into_iter()
    .map(|r| AttributeRecord {
      node: NodeId::from_cell(&r.node, integers),
      attribute: r.attribute,
    })
    .collect()
}

/// Reads `source,target` rows in file order.
pub fn read_edgelist<R: Read>(reader: R) -> Result<Vec<EdgeRecord>, StoryError> {
  let rows: Vec<RawEdge> = read_table(reader)?;
  let integers = NodeId::all_integers(edge_cells(&rows));
  Ok(type_edges(rows, integers))
}

/// Reads `node,attribute` rows in file order. Unknown labels are kept.
pub fn read_node_attributes<R: Read>(reader: R) -> Result<Vec<AttributeRecord>, StoryError> {
  let rows: Vec<RawAttribute> = read_table(reader)?;
  let integers = NodeId::all_integers(attribute_cells(&rows));
  Ok(type_attributes(rows, integers))
}

/// Reads both tables, typing the ids of the two together.
pub fn read_story_tables<E: Read, A: Read>(
  edges: E,
  attributes: A,
) -> Result<(Vec<EdgeRecord>, Vec<AttributeRecord>), StoryError> {
  let edges: Vec<RawEdge> = read_table(edges)?;
  let attributes: Vec<RawAttribute> = read_table(attributes)?;
  let integers = NodeId::all_integers(edge_cells(&edges).chain(attribute_cells(&attributes)));
  debug!(integers, "typed story ids");
  Ok((type_edges(edges, integers), type_attributes(attributes, integers)))
}

#[instrument(level = "trace")]
pub fn load_edgelist(path: &Path) -> Result<Vec<EdgeRecord>, StoryError> {
  let rows = read_edgelist(std::fs::File::open(path)?)?;
  debug!(rows = rows.len(), path = %path.display(), "loaded edge list");
  Ok(rows)
}

#[instrument(level = "trace")]
pub fn load_node_attributes(path: &Path) -> Result<Vec<AttributeRecord>, StoryError> {
  let rows = read_node_attributes(std::fs::File::open(path)?)?;
  debug!(rows = rows.len(), path = %path.display(), "loaded node attributes");
  Ok(rows)
}

#[instrument(level = "trace")]
pub fn load_story_tables(
  edges: &Path,
  attributes: &Path,
) -> Result<(Vec<EdgeRecord>, Vec<AttributeRecord>), StoryError> {
  let tables = read_story_tables(std::fs::File::open(edges)?, std::fs::File::open(attributes)?)?;
  debug!(
    edges = tables.0.len(),
    attributes = tables.1.len(),
    "loaded story tables"
  );
  Ok(tables)
}
