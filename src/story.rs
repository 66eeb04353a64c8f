//! `StoryStructure`: one story's tables, graph and paths, and the steps that
//! move data between them.
//!
//! Typical flow: load tables → (simplify) → make graph → enumerate or save path
//! statistics → (cluster) → project paths back to edges → save dot / figure.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rand::Rng;
use tracing::{info, instrument};

use crate::clustering::{ClusterOutcome, iterative_cluster};
use crate::dot_writer::{DotOptions, write_dot};
use crate::edgelist::{DEFAULT_MAX_ROWS, paths_to_edgelist};
use crate::error::StoryError;
use crate::path_enumerator::{EnumerationOptions, PathSink, enumerate_paths};
use crate::path_stats_io::PathStatsWriter;
use crate::render::render_figure;
use crate::simplify;
use crate::table_io;
use crate::types::{
  AttributeRecord, EdgeRecord, NodeAttributes, NodeId, PathCollection, Report, StoryGraph,
};

/// Tables, graph and paths of a single story.
#[derive(Debug, Clone)]
pub struct StoryStructure {
  pub title: String,
  pub edges: Vec<EdgeRecord>,
  pub attributes: NodeAttributes,
  pub graph: StoryGraph,
  pub paths: PathCollection,
  /// Ceiling for [paths_to_edgelist](Self::paths_to_edgelist).
  pub max_edgelist_rows: usize,
}

impl Default for StoryStructure {
  fn default() -> Self {
    Self::new("my story")
  }
}

impl StoryStructure {
  pub fn new(title: impl Into<String>) -> Self {
    let title = title.into();
    Self {
      graph: StoryGraph::new(title.clone()),
      title,
      edges: Vec::new(),
      attributes: NodeAttributes::new(),
      paths: PathCollection::new(),
      max_edgelist_rows: DEFAULT_MAX_ROWS,
    }
  }

  /// Builds a story from in-memory tables.
  pub fn from_tables(
    title: impl Into<String>,
    edges: Vec<EdgeRecord>,
    attributes: Vec<AttributeRecord>,
  ) -> Self {
    let mut story = Self::new(title);
    story.edges = edges;
    story.attributes = NodeAttributes::from_records(attributes);
    story
  }

  pub fn load_edgelist(&mut self, path: &Path) -> Result<(), StoryError> {
    self.edges = table_io::load_edgelist(path)?;
    Ok(())
  }

  pub fn load_node_attributes(&mut self, path: &Path) -> Result<(), StoryError> {
    self.attributes = NodeAttributes::from_records(table_io::load_node_attributes(path)?);
    Ok(())
  }

  /// Loads whichever tables are given. When both are, their ids are typed
  /// together.
  pub fn load_story(&mut self, edges: Option<&Path>, nodes: Option<&Path>) -> Result<(), StoryError> {
    match (edges, nodes) {
      (Some(edges), Some(nodes)) => {
        let (edges, attributes) = table_io::load_story_tables(edges, nodes)?;
        self.edges = edges;
        self.attributes = NodeAttributes::from_records(attributes);
      }
      (Some(edges), None) => self.load_edgelist(edges)?,
      (None, Some(nodes)) => self.load_node_attributes(nodes)?,
      (None, None) => {}
    }
    Ok(())
  }

  /// Removes duplicate edges and self-loops from the edge table.
  pub fn simplify(&mut self) {
    let before = self.edges.len();
    self.edges = simplify::simplify(&self.edges);
    info!(before, after = self.edges.len(), "simplified edge list");
  }

  pub fn duplicates(&self) -> Vec<EdgeRecord> {
    simplify::duplicates(&self.edges)
  }

  pub fn self_loops(&self) -> Vec<EdgeRecord> {
    simplify::self_loops(&self.edges)
  }

  /// Rebuilds the graph from the current edge table, finds its roots and
  /// designates the smallest root as the start. Returns that root.
  #[instrument(level = "trace", skip(self), fields(title = %self.title))]
  pub fn make_graph(&mut self) -> Result<Option<NodeId>, StoryError> {
    self.graph = StoryGraph::from_edges(self.title.clone(), &self.edges);
    self.graph.find_roots();
    let root = self.graph.choose_default_root();
    if let Some(id) = &root {
      self.graph.set_root(id.clone())?;
    }
    info!(nodes = self.graph.len(), roots = self.graph.roots().len(), root = ?root, "graph built");
    Ok(root)
  }

  /// Roots of the graph, i.e. every possible beginning.
  pub fn start(&self) -> &[NodeId] {
    self.graph.roots()
  }

  fn resolve_root(&mut self, root: Option<NodeId>) -> Result<NodeId, StoryError> {
    if let Some(id) = root {
      self.graph.set_root(id)?;
    }
    self.graph.root().cloned().ok_or(StoryError::NoRoot)
  }

  fn walk<S: PathSink + ?Sized>(
    &mut self,
    root: Option<NodeId>,
    options: EnumerationOptions,
    sink: &mut S,
  ) -> Result<Vec<Report>, StoryError> {
    let root = self.resolve_root(root)?;
    let enumeration = enumerate_paths(&self.graph, &root, &self.attributes, options, sink)?;
    self.paths = enumeration.paths;
    Ok(enumeration.reports)
  }

  /// Enumerates every path from `root` (or the designated root) into [Self::paths].
  pub fn enumerate_paths(
    &mut self,
    root: Option<NodeId>,
    options: EnumerationOptions,
  ) -> Result<Vec<Report>, StoryError> {
    self.walk(root, options, &mut ())
  }

  /// Like [enumerate_paths](Self::enumerate_paths), also streaming one statistics
  /// line per path to `path`.
  ///
  /// The file is flushed even when the walk fails; lines written up to the
  /// failure stay in it.
  #[instrument(level = "trace", skip(self, options))]
  pub fn save_path_stats(
    &mut self,
    path: &Path,
    root: Option<NodeId>,
    options: EnumerationOptions,
  ) -> Result<Vec<Report>, StoryError> {
    let mut writer = PathStatsWriter::new(BufWriter::new(File::create(path)?))?;
    let walked = self.walk(root, options, &mut writer);
    let flushed = writer.flush();
    let reports = walked?;
    flushed?;
    info!(paths = writer.lines(), file = %path.display(), "path statistics saved");
    Ok(reports)
  }

  /// Clusters [Self::paths] in place until a fixed point is reached.
  pub fn iterative_cluster_paths<R: Rng + ?Sized>(
    &mut self,
    threshold: f64,
    rng: &mut R,
  ) -> Result<ClusterOutcome, StoryError> {
    iterative_cluster(&mut self.paths, threshold, rng)
  }

  /// Replaces the edge table with the edges of [Self::paths].
  ///
  /// The attribute table is left as is.
  pub fn paths_to_edgelist(&mut self) -> Result<(), StoryError> {
    self.edges = paths_to_edgelist(&self.paths, self.max_edgelist_rows)?;
    Ok(())
  }

  pub fn save_dot(
    &self,
    path: &Path,
    graph_name: &str,
    options: DotOptions,
  ) -> Result<Vec<Report>, StoryError> {
    let mut out = BufWriter::new(File::create(path)?);
    let reports = write_dot(
      &mut out,
      graph_name,
      self.attributes.records(),
      &self.edges,
      options,
    )?;
    std::io::Write::flush(&mut out)?;
    Ok(reports)
  }

  /// Writes `<figure>.dot` next to `figure` and renders it with `dot_cmd`.
  pub fn save_fig(
    &self,
    figure: &Path,
    graph_name: &str,
    dot_cmd: &str,
    options: DotOptions,
  ) -> Result<Vec<Report>, StoryError> {
    let dot_path = figure.with_extension("dot");
    let reports = self.save_dot(&dot_path, graph_name, options)?;
    render_figure(dot_cmd, &dot_path, figure)?;
    Ok(reports)
  }
}
