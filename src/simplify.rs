//! Edge-table hygiene applied before a graph is built.

use std::collections::HashSet;

use crate::types::EdgeRecord;

/// Drops exact duplicate rows (first occurrence kept, order preserved), then self-loops.
pub fn simplify(edges: &[EdgeRecord]) -> Vec<EdgeRecord> {
  let mut seen = HashSet::new();
  edges
    .iter()
    .filter(|e| seen.insert(*e))
    .filter(|e| !e.is_self_loop())
    .cloned()
    .collect()
}

/// Rows that repeat an earlier row; every later occurrence is returned.
pub fn duplicates(edges: &[EdgeRecord]) -> Vec<EdgeRecord> {
  let mut seen = HashSet::new();
  edges
    .iter()
    .filter(|e| !seen.insert(*e))
    .cloned()
    .collect()
}

/// Rows whose source equals their target.
pub fn self_loops(edges: &[EdgeRecord]) -> Vec<EdgeRecord> {
  edges.iter().filter(|e| e.is_self_loop()).cloned().collect()
}
