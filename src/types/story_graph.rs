//! Rooted directed story graph built incrementally from an edge table.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::{EdgeRecord, NodeHandle, NodeId, StoryNode};
use crate::error::StoryError;

/// Directed graph of storylets stored as an arena.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
  pub title: String,
  nodes: Vec<StoryNode>,
  index: HashMap<NodeId, NodeHandle>,
  roots: Vec<NodeId>,
  root: Option<NodeId>,
}

impl StoryGraph {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Self::default()
    }
  }

  /// Builds a graph by applying every edge in table order.
  pub fn from_edges(title: impl Into<String>, edges: &[EdgeRecord]) -> Self {
    let mut graph = Self::new(title);
    for edge in edges {
      graph.add_edge(edge.source.clone(), edge.target.clone());
    }
    graph
  }

  fn ensure(&mut self, id: NodeId) -> NodeHandle {
    if let Some(&h) = self.index.get(&id) {
      return h;
    }
    let h = NodeHandle(self.nodes.len());
    self.nodes.push(StoryNode::new(id.clone()));
    self.index.insert(id, h);
    h
  }

  /// Adds `source -> target`, creating either node on first sight.
  ///
  /// The target's parent is overwritten with `source` (last writer wins) and
  /// the target is appended to the source's children even if already present.
  pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) {
    let s = self.ensure(source.into());
    let t = self.ensure(target.into());
    self.nodes[t.0].parent = Some(s);
    self.nodes[s.0].children.push(t);
  }

  /// Recomputes the nodes that never received a parent, in creation order.
  #[instrument(level = "trace", skip(self), fields(title = %self.title))]
  pub fn find_roots(&mut self) -> &[NodeId] {
    self.roots = self
      .nodes
      .iter()
      .filter(|n| n.is_root())
      .map(|n| n.id.clone())
      .collect();
    debug!(roots = self.roots.len(), "found roots");
    &self.roots
  }

  /// Roots as of the last [`find_roots`](Self::find_roots) call.
  pub fn roots(&self) -> &[NodeId] {
    &self.roots
  }

  /// The smallest root id, so repeated runs on the same input start from the same node.
  pub fn choose_default_root(&self) -> Option<NodeId> {
    self.roots.iter().min().cloned()
  }

  /// Designates an explicit start node.
  pub fn set_root(&mut self, id: NodeId) -> Result<(), StoryError> {
    if !self.contains(&id) {
      return Err(StoryError::UnknownNode(id));
    }
    self.root = Some(id);
    Ok(())
  }

  pub fn root(&self) -> Option<&NodeId> {
    self.root.as_ref()
  }

  pub fn contains(&self, id: &NodeId) -> bool {
    self.index.contains_key(id)
  }

  /// The id spelled `raw` in this graph, whether its table was typed as
  /// integers or as text. Falls back to parsing `raw` when neither is present.
  pub fn id_for(&self, raw: &str) -> NodeId {
    let text = NodeId::Text(raw.trim().to_string());
    if self.contains(&text) {
      text
    } else {
      NodeId::from(raw)
    }
  }

  pub fn handle_of(&self, id: &NodeId) -> Option<NodeHandle> {
    self.index.get(id).copied()
  }

  pub fn node(&self, handle: NodeHandle) -> &StoryNode {
    &self.nodes[handle.0]
  }

  pub fn get(&self, id: &NodeId) -> Option<&StoryNode> {
    self.handle_of(id).map(|h| self.node(h))
  }

  /// Child ids of `id` in edge insertion order.
  pub fn children_of(&self, id: &NodeId) -> Option<Vec<&NodeId>> {
    self
      .get(id)
      .map(|n| n.children.iter().map(|&c| &self.node(c).id).collect())
  }

  pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
    self.get(id)?.parent.map(|p| &self.node(p).id)
  }

  /// Node ids in creation order.
  pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
    self.nodes.iter().map(|n| &n.id)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
