//! # storystructure
//!
//! Analyze the structure of branching stories.
//!
//! A story is a directed graph of storylets built from an edge table, plus a
//! node-attribute table that labels storylets as good or bad endings or as
//! pauses. The crate enumerates every simple path from the start of the story
//! to an ending, computes statistics for each path, optionally clusters
//! similar paths, and projects the surviving paths back into an edge list for
//! rendering with Graphviz.
//!
//! ## Architecture
//!
//! - [types]: ids, attribute labels, the arena-backed [StoryGraph], paths and reports.
//! - [simplify]: duplicate-edge and self-loop removal on the raw edge table.
//! - [path_enumerator]: explicit-stack depth-first enumeration with cycle pruning.
//! - [clustering]: Jaccard-distance clustering iterated to a fixed point.
//! - [edgelist]: paths back to a deduplicated edge list.
//! - [table_io], [path_stats_io], [dot_writer], [render]: the I/O boundaries.
//! - [story]: [StoryStructure], which ties the steps together.

pub mod clustering;
pub mod dot_writer;
pub mod edgelist;
pub mod error;
pub mod path_enumerator;
pub mod path_stats_io;
pub mod render;
pub mod simplify;
pub mod story;
pub mod table_io;
#[cfg(test)]
mod table_io_test;
pub mod types;

pub use error::StoryError;
pub use path_enumerator::{EnumerationOptions, enumerate_paths};
pub use story::StoryStructure;
pub use types::{EdgeRecord, NodeId, StoryGraph, StoryPath};
