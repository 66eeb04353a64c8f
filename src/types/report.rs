//! Reportable, non-fatal conditions found while analysing a story.

use std::fmt;

use super::NodeId;

/// A condition worth telling the user about that does not stop the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
  /// Descending into `child` from `ancestor` would revisit a node already on the path.
  CycleSkipped { ancestor: NodeId, child: NodeId },
  /// A path ends on a node that is labelled neither good nor bad.
  UnclassifiedEnd { node: NodeId },
  /// An attribute row carries a label outside good/bad/pause.
  UnknownAttribute { node: NodeId, label: String },
  /// An attributed node exists in the graph but no enumerated path reaches it.
  UnreachedAttribute { node: NodeId },
  /// An attributed node does not appear in the edge table at all.
  AttributeNotInGraph { node: NodeId },
  /// A descent was cut at `node` because it hit the configured depth limit.
  DepthLimited { node: NodeId, depth: usize },
}

impl Report {
  /// Emits the report on the diagnostic channel.
  pub fn log(&self) {
    tracing::warn!(report = ?self, "{}", self);
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Report::CycleSkipped { ancestor, child } => write!(
        f,
        "skipped descending into {} from {} to avoid a cycle",
        child, ancestor
      ),
      Report::UnclassifiedEnd { node } => write!(
        f,
        "path ends on {} which has no good/bad attribute: node list and edge list do not match",
        node
      ),
      Report::UnknownAttribute { node, label } => {
        write!(f, "unknown attribute {:?} on node {}", label, node)
      }
      Report::UnreachedAttribute { node } => {
        write!(f, "attributed node {} is not reached by any path", node)
      }
      Report::AttributeNotInGraph { node } => {
        write!(f, "attributed node {} does not appear in the edge list", node)
      }
      Report::DepthLimited { node, depth } => {
        write!(f, "stopped descending at {} (depth limit {})", node, depth)
      }
    }
  }
}
