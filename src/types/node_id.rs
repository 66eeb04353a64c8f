//! Identity of a storylet.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of a storylet, as it appears in the input tables.
///
/// Ordering is numeric for `Int` and lexicographic for `Text`; every `Int` sorts
/// before every `Text`. `Text` keeps the exact source text, so `"01"`, `"1"` and
/// `"1.0"` are three different storylets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
  Int(i64),
  Text(String),
}

/// Integer value of `s` if `s` is its canonical decimal spelling (`7`, `-3`,
/// but not `07`, `+7`, `7.0` or `7e0`).
fn canonical_int(s: &str) -> Option<i64> {
  let v = s.parse::<i64>().ok()?;
  (v.to_string() == s).then_some(v)
}

impl NodeId {
  /// Whether a whole table of raw id cells can be typed as `Int` without
  /// changing the text of any cell.
  pub fn all_integers<'a>(cells: impl IntoIterator<Item = &'a str>) -> bool {
    cells.into_iter().all(|c| canonical_int(c).is_some())
  }

  /// Builds an id from one raw cell, given the table-wide decision from
  /// [all_integers](Self::all_integers).
  pub fn from_cell(cell: &str, integers: bool) -> Self {
    match canonical_int(cell) {
      Some(v) if integers => NodeId::Int(v),
      _ => NodeId::Text(cell.to_string()),
    }
  }
}

impl From<i64> for NodeId {
  fn from(v: i64) -> Self {
    NodeId::Int(v)
  }
}

impl From<i32> for NodeId {
  fn from(v: i32) -> Self {
    NodeId::Int(v.into())
  }
}

impl From<&str> for NodeId {
  fn from(s: &str) -> Self {
    match s.parse() {
      Ok(id) => id,
      Err(never) => match never {},
    }
  }
}

impl FromStr for NodeId {
  type Err = std::convert::Infallible;

  /// A canonical integer becomes `Int`; anything else is kept as text.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    Ok(match canonical_int(s) {
      Some(v) => NodeId::Int(v),
      None => NodeId::Text(s.to_string()),
    })
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeId::Int(v) => write!(f, "{}", v),
      NodeId::Text(s) => write!(f, "{}", s),
    }
  }
}

impl Serialize for NodeId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      NodeId::Int(v) => serializer.serialize_i64(*v),
      NodeId::Text(s) => serializer.serialize_str(s),
    }
  }
}

struct NodeIdVisitor;

impl Visitor<'_> for NodeIdVisitor {
  type Value = NodeId;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("an integer or a string node id")
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
    Ok(NodeId::Int(v))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
    Ok(match i64::try_from(v) {
      Ok(v) => NodeId::Int(v),
      Err(_) => NodeId::Text(v.to_string()),
    })
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
    Ok(NodeId::Text(v.to_string()))
  }
}

/// Numbers become `Int` and strings stay `Text` verbatim. Tables are typed
/// column-wide by [table_io](crate::table_io) instead.
impl<'de> Deserialize<'de> for NodeId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(NodeIdVisitor)
  }
}
