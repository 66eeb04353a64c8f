//! Flattens a path collection back into a deduplicated edge list.
//!
//! Node attributes are not touched: a renderer fed with the projected edges
//! still uses the attribute table of the original story.

use std::collections::HashSet;

use tracing::instrument;

use crate::error::StoryError;
use crate::types::{EdgeRecord, PathCollection};

/// Upper bound on generated rows before deduplication.
pub const DEFAULT_MAX_ROWS: usize = 100_000;

/// Emits one edge per consecutive id pair of every path, keeping the first
/// occurrence of each distinct edge.
///
/// Fails with [StoryError::CapacityExceeded] before collecting anything if the
/// paths would generate more than `max_rows` rows.
#[instrument(level = "trace", skip(paths), fields(paths = paths.len()))]
pub fn paths_to_edgelist(
  paths: &PathCollection,
  max_rows: usize,
) -> Result<Vec<EdgeRecord>, StoryError> {
  let needed: usize = paths
    .values()
    .map(|p| p.ids.len().saturating_sub(1))
    .sum();
  if needed > max_rows {
    return Err(StoryError::CapacityExceeded {
      needed,
      limit: max_rows,
    });
  }

  let mut seen = HashSet::new();
  let mut edges = Vec::new();
  for path in paths.values() {
    for pair in path.ids.windows(2) {
      let edge = EdgeRecord::new(pair[0].clone(), pair[1].clone());
      if seen.insert(edge.clone()) {
        edges.push(edge);
      }
    }
  }
  Ok(edges)
}
