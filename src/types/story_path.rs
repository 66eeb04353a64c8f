//! A root-to-leaf path and its statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{EndType, NodeAttributes, NodeId};

/// Key assigned to a path in discovery order.
pub type PathKey = usize;

/// Paths keyed by discovery order; iteration follows key order.
pub type PathCollection = BTreeMap<PathKey, StoryPath>;

/// Per-path statistics written to the path-statistics sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStatistics {
  /// Number of nodes on the path.
  pub length: usize,
  /// Classification of the last node, if it has one.
  pub end_type: Option<EndType>,
  pub pause_count: usize,
  /// 0-based position of the first pause node.
  pub first_pause: Option<usize>,
}

impl PathStatistics {
  pub fn compute(ids: &[NodeId], attributes: &NodeAttributes) -> Self {
    let end_type = ids.last().and_then(|end| attributes.end_type(end));
    let mut pause_count = 0;
    let mut first_pause = None;
    for (i, id) in ids.iter().enumerate() {
      if attributes.is_pause(id) {
        first_pause.get_or_insert(i);
        pause_count += 1;
      }
    }
    Self {
      length: ids.len(),
      end_type,
      pause_count,
      first_pause,
    }
  }
}

/// An ordered sequence of distinct node ids ending on a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryPath {
  pub ids: Vec<NodeId>,
  pub stats: PathStatistics,
}

impl StoryPath {
  pub fn new(ids: Vec<NodeId>, attributes: &NodeAttributes) -> Self {
    let stats = PathStatistics::compute(&ids, attributes);
    Self { ids, stats }
  }

  pub fn end(&self) -> Option<&NodeId> {
    self.ids.last()
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  /// `[1, 2, 3]`: a JSON array with `", "` separators.
  pub fn path_string(&self) -> Result<String, serde_json::Error> {
    let parts = self
      .ids
      .iter()
      .map(serde_json::to_string)
      .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", parts.join(", ")))
  }
}
