//! A storylet inside a [`StoryGraph`](super::StoryGraph) arena.

use super::NodeId;

/// Stable index of a node inside its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
  pub fn index(self) -> usize {
    self.0
  }
}

/// A storylet: its id, its outgoing edges in insertion order, and the last
/// node that pointed at it.
#[derive(Debug, Clone)]
pub struct StoryNode {
  pub id: NodeId,
  /// May hold the same handle more than once if the edge table repeats an edge.
  pub(crate) children: Vec<NodeHandle>,
  /// Used for root detection only, never for traversal.
  pub(crate) parent: Option<NodeHandle>,
}

impl StoryNode {
  pub(crate) fn new(id: NodeId) -> Self {
    Self {
      id,
      children: Vec::new(),
      parent: None,
    }
  }

  pub fn children(&self) -> &[NodeHandle] {
    &self.children
  }

  pub fn parent(&self) -> Option<NodeHandle> {
    self.parent
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  pub fn is_root(&self) -> bool {
    self.parent.is_none()
  }
}
