//! Error type for story loading, traversal, projection and rendering.
//!
//! Only hard failures live here. Conditions that are reported but do not stop the
//! analysis (cycles, unclassified endings, unknown labels) are [`Report`](crate::types::Report)s.

use thiserror::Error;

use crate::types::NodeId;

/// Hard failures of the story analysis.
#[derive(Debug, Error)]
pub enum StoryError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  /// An explicitly requested node is not part of the graph.
  #[error("node {0} is not in the graph")]
  UnknownNode(NodeId),

  /// Traversal was requested but no start node could be determined.
  #[error("graph has no root to start from")]
  NoRoot,

  #[error("clustering threshold must be within [0, 1], got {0}")]
  InvalidThreshold(f64),

  /// Edgelist projection would produce more rows than allowed.
  #[error("edgelist projection needs {needed} rows, more than the limit of {limit}")]
  CapacityExceeded { needed: usize, limit: usize },

  /// The external layout tool could not be run or exited unsuccessfully.
  #[error("rendering failed: {0}")]
  Render(String),
}
