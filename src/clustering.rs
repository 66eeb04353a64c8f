//! Iterative clustering of paths by Jaccard distance.
//!
//! Close pairs are merged by keeping one of the two paths at random; the loser
//! is deleted at the end of the pass. Passes repeat until one deletes nothing.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::StoryError;
use crate::types::{NodeId, PathCollection, PathKey, StoryPath};

/// Jaccard distance between the node sets of two paths: `1 - |A ∩ B| / |A ∪ B|`.
///
/// Two empty paths are identical (distance 0).
pub fn similarity(a: &[NodeId], b: &[NodeId]) -> f64 {
  let a: HashSet<&NodeId> = a.iter().collect();
  let b: HashSet<&NodeId> = b.iter().collect();
  let union = a.union(&b).count();
  if union == 0 {
    return 0.0;
  }
  let shared = a.intersection(&b).count();
  1.0 - shared as f64 / union as f64
}

/// Keeps one of the two paths, each with probability one half.
pub fn merge_paths<'p, R: Rng + ?Sized>(
  a: &'p StoryPath,
  b: &'p StoryPath,
  rng: &mut R,
) -> &'p StoryPath {
  if rng.gen_bool(0.5) { a } else { b }
}

fn check_threshold(threshold: f64) -> Result<(), StoryError> {
  if (0.0..=1.0).contains(&threshold) {
    Ok(())
  } else {
    Err(StoryError::InvalidThreshold(threshold))
  }
}

/// One sweep over every unordered pair `(i, j)`, `i < j` in key order.
///
/// A close pair replaces path `i` with the merge result and marks `j` for
/// deletion. Marked paths stay in the collection, and keep taking part in the
/// remaining pairs, until the caller removes them.
#[instrument(level = "trace", skip(paths, rng), fields(paths = paths.len()))]
pub fn cluster_pass<R: Rng + ?Sized>(
  paths: &mut PathCollection,
  threshold: f64,
  rng: &mut R,
) -> Result<BTreeSet<PathKey>, StoryError> {
  check_threshold(threshold)?;
  let keys: Vec<PathKey> = paths.keys().copied().collect();
  let mut to_delete = BTreeSet::new();
  for (n, &i) in keys.iter().enumerate() {
    for &j in &keys[n + 1..] {
      let (a, b) = (&paths[&i], &paths[&j]);
      if similarity(&a.ids, &b.ids) <= threshold {
        let merged = merge_paths(a, b, rng).clone();
        paths.insert(i, merged);
        to_delete.insert(j);
      }
    }
  }
  debug!(marked = to_delete.len(), "cluster pass done");
  Ok(to_delete)
}

/// Summary of an [iterative_cluster] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterOutcome {
  /// Number of passes, including the final one that deleted nothing.
  pub passes: usize,
  /// Keys removed over all passes.
  pub removed: Vec<PathKey>,
}

/// Repeats [cluster_pass] and removes marked paths until a pass marks none.
#[instrument(level = "trace", skip(paths, rng), fields(paths = paths.len()))]
pub fn iterative_cluster<R: Rng + ?Sized>(
  paths: &mut PathCollection,
  threshold: f64,
  rng: &mut R,
) -> Result<ClusterOutcome, StoryError> {
  check_threshold(threshold)?;
  let mut outcome = ClusterOutcome::default();
  loop {
    let marked = cluster_pass(paths, threshold, rng)?;
    outcome.passes += 1;
    if marked.is_empty() {
      break;
    }
    for key in marked {
      paths.remove(&key);
      outcome.removed.push(key);
    }
  }
  info!(
    passes = outcome.passes,
    removed = outcome.removed.len(),
    remaining = paths.len(),
    "clustering reached a fixed point"
  );
  Ok(outcome)
}
