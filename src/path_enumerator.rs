//! Depth-first enumeration of every simple root-to-leaf path.
//!
//! The walk keeps an explicit frame stack instead of recursing, so deep stories
//! cannot overflow the call stack. Each frame remembers which child to try next;
//! popping a frame pops the node from the current path, which restores the path
//! for the sibling iteration of the parent frame.

use tracing::{debug, info, instrument};

use crate::error::StoryError;
use crate::types::{
  NodeAttributes, NodeHandle, NodeId, PathCollection, PathKey, Report, StoryGraph, StoryPath,
};

/// Receives every path as soon as it is discovered.
pub trait PathSink {
  fn record(&mut self, key: PathKey, path: &StoryPath) -> Result<(), StoryError>;
}

/// Discards paths; use when only the returned collection is needed.
impl PathSink for () {
  fn record(&mut self, _key: PathKey, _path: &StoryPath) -> Result<(), StoryError> {
    Ok(())
  }
}

/// Options for [enumerate_paths].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumerationOptions {
  /// Maximum number of nodes on a path. Descents that would go deeper are
  /// pruned and reported. `None` enumerates without bound.
  pub max_depth: Option<usize>,
}

/// Paths found by a walk plus everything reported along the way.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
  pub paths: PathCollection,
  pub reports: Vec<Report>,
}

impl Enumeration {
  /// Number of back-edges that were skipped.
  pub fn cycles_skipped(&self) -> usize {
    self
      .reports
      .iter()
      .filter(|r| matches!(r, Report::CycleSkipped { .. }))
      .count()
  }
}

struct Frame {
  node: NodeHandle,
  next_child: usize,
}

struct Walk<'a, S: ?Sized> {
  graph: &'a StoryGraph,
  attributes: &'a NodeAttributes,
  options: EnumerationOptions,
  sink: &'a mut S,
  path: Vec<NodeHandle>,
  on_path: Vec<bool>,
  reached: Vec<bool>,
  frames: Vec<Frame>,
  result: Enumeration,
}

impl<S: PathSink + ?Sized> Walk<'_, S> {
  fn id(&self, h: NodeHandle) -> NodeId {
    self.graph.node(h).id.clone()
  }

  fn report(&mut self, report: Report) {
    report.log();
    self.result.reports.push(report);
  }

  fn enter(&mut self, h: NodeHandle) -> Result<(), StoryError> {
    self.path.push(h);
    self.on_path[h.index()] = true;
    self.reached[h.index()] = true;
    self.frames.push(Frame {
      node: h,
      next_child: 0,
    });
    if self.graph.node(h).is_leaf() {
      self.record()?;
    }
    Ok(())
  }

  fn leave(&mut self) {
    self.frames.pop();
    if let Some(h) = self.path.pop() {
      self.on_path[h.index()] = false;
    }
  }

  fn record(&mut self) -> Result<(), StoryError> {
    let ids = self.path.iter().map(|&h| self.id(h)).collect();
    let path = StoryPath::new(ids, self.attributes);
    if path.stats.end_type.is_none() {
      if let Some(end) = path.end().cloned() {
        self.report(Report::UnclassifiedEnd { node: end });
      }
    }
    let key = self.result.paths.len();
    debug!(key, length = path.len(), "path discovered");
    self.sink.record(key, &path)?;
    self.result.paths.insert(key, path);
    Ok(())
  }

  fn run(&mut self, start: NodeHandle) -> Result<(), StoryError> {
    let graph = self.graph;
    self.enter(start)?;
    while let Some(frame) = self.frames.last_mut() {
      let parent = frame.node;
      let Some(&child) = graph.node(parent).children().get(frame.next_child) else {
        self.leave();
        continue;
      };
      frame.next_child += 1;

      if self.on_path[child.index()] {
        self.report(Report::CycleSkipped {
          ancestor: self.id(parent),
          child: self.id(child),
        });
        continue;
      }
      if let Some(max) = self.options.max_depth {
        if self.path.len() >= max {
          self.report(Report::DepthLimited {
            node: self.id(child),
            depth: max,
          });
          continue;
        }
      }
      self.enter(child)?;
    }
    Ok(())
  }

  /// Attributed nodes the walk never touched, or that are not in the graph at all.
  fn check_attributes(&mut self) {
    let mut pending = Vec::new();
    for id in self.attributes.nodes() {
      match self.graph.handle_of(id) {
        None => pending.push(Report::AttributeNotInGraph { node: id.clone() }),
        Some(h) if !self.reached[h.index()] => {
          pending.push(Report::UnreachedAttribute { node: id.clone() })
        }
        Some(_) => {}
      }
    }
    for report in pending {
      self.report(report);
    }
  }
}

/// Enumerates every simple path from `root` to a leaf, feeding each to `sink`
/// in discovery order.
///
/// Children are visited in edge insertion order. A child already on the current
/// path is skipped and reported as a cycle. Paths are keyed `0, 1, 2, ...`.
/// If the sink fails, the walk stops and the error is returned; paths already
/// handed to the sink stay there.
#[instrument(level = "trace", skip(graph, attributes, sink), fields(title = %graph.title))]
pub fn enumerate_paths<S: PathSink + ?Sized>(
  graph: &StoryGraph,
  root: &NodeId,
  attributes: &NodeAttributes,
  options: EnumerationOptions,
  sink: &mut S,
) -> Result<Enumeration, StoryError> {
  let start = graph
    .handle_of(root)
    .ok_or_else(|| StoryError::UnknownNode(root.clone()))?;
  let mut walk = Walk {
    graph,
    attributes,
    options,
    sink,
    path: Vec::new(),
    on_path: vec![false; graph.len()],
    reached: vec![false; graph.len()],
    frames: Vec::new(),
    result: Enumeration::default(),
  };
  walk.run(start)?;
  walk.check_attributes();
  info!(
    paths = walk.result.paths.len(),
    reports = walk.result.reports.len(),
    "enumeration finished"
  );
  Ok(walk.result)
}
