//! One row of the input edge table.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A directed edge between two storylets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
  pub source: NodeId,
  pub target: NodeId,
}

impl EdgeRecord {
  pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
    Self {
      source: source.into(),
      target: target.into(),
    }
  }

  pub fn is_self_loop(&self) -> bool {
    self.source == self.target
  }
}
