//! Writes a story as a Graphviz `digraph` description.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Write;

use tracing::instrument;

use crate::error::StoryError;
use crate::types::{AttributeRecord, EdgeRecord, NodeId, Report};

/// Graph name used when the caller does not pick one.
pub const DEFAULT_GRAPH_NAME: &str = "myGraph";

/// Options for [write_dot].
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOptions {
  /// Omit attributed nodes that take part in no edge.
  pub skip_isolated: bool,
}

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Alphanumeric identifier not starting with a digit, and not a keyword.
fn is_plain_identifier(s: &str) -> bool {
  let mut chars = s.chars();
  let Some(first) = chars.next() else {
    return false;
  };
  let word = |c: char| c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii();
  (first == '_' || first.is_ascii_alphabetic() || !first.is_ascii())
    && chars.all(word)
    && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
}

/// `-?(.[0-9]+ | [0-9]+(.[0-9]*)?)`
fn is_numeral(s: &str) -> bool {
  let digits = s.strip_prefix('-').unwrap_or(s);
  let (whole, frac) = match digits.split_once('.') {
    Some((w, f)) => (w, Some(f)),
    None => (digits, None),
  };
  let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
  match frac {
    None => !whole.is_empty() && all_digits(whole),
    Some(f) => all_digits(whole) && all_digits(f) && !(whole.is_empty() && f.is_empty()),
  }
}

/// `s` as a DOT id: bare when it already is one, quoted otherwise.
pub fn dot_id_str(s: &str) -> Cow<'_, str> {
  if is_plain_identifier(s) || is_numeral(s) {
    Cow::Borrowed(s)
  } else {
    Cow::Owned(format!(
      "\"{}\"",
      s.replace('\\', "\\\\").replace('"', "\\\"")
    ))
  }
}

/// A node id as written in the description.
pub fn dot_id(id: &NodeId) -> Cow<'_, str> {
  match id {
    NodeId::Int(v) => Cow::Owned(v.to_string()),
    NodeId::Text(s) => dot_id_str(s),
  }
}

/// Writes the header, one styled declaration per attribute row, one line per
/// edge and the closing brace.
///
/// Rows with unknown labels are declared without a fill color and returned as
/// reports. They are logged when the attribute table is built, not here.
#[instrument(level = "trace", skip(out, attributes, edges))]
pub fn write_dot<W: Write>(
  out: &mut W,
  graph_name: &str,
  attributes: &[AttributeRecord],
  edges: &[EdgeRecord],
  options: DotOptions,
) -> Result<Vec<Report>, StoryError> {
  let connected: HashSet<&NodeId> = edges
    .iter()
    .flat_map(|e| [&e.source, &e.target])
    .collect();
  let mut reports = Vec::new();

  writeln!(out, "digraph {} {{", dot_id_str(graph_name))?;
  for row in attributes {
    if options.skip_isolated && !connected.contains(&row.node) {
      continue;
    }
    match row.attribute.fill_color() {
      Some(color) => writeln!(
        out,
        "{} [style=filled, fillcolor = \"{}\"];",
        dot_id(&row.node),
        color
      )?,
      None => {
        reports.push(Report::UnknownAttribute {
          node: row.node.clone(),
          label: row.attribute.to_string(),
        });
        writeln!(out, "{};", dot_id(&row.node))?;
      }
    }
  }
  for edge in edges {
    writeln!(out, "{} -> {};", dot_id(&edge.source), dot_id(&edge.target))?;
  }
  writeln!(out, "}}")?;
  Ok(reports)
}

/// Renders the description into a string.
pub fn to_dot_string(
  graph_name: &str,
  attributes: &[AttributeRecord],
  edges: &[EdgeRecord],
  options: DotOptions,
) -> Result<String, StoryError> {
  let mut buf = Vec::new();
  write_dot(&mut buf, graph_name, attributes, edges, options)?;
  String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
