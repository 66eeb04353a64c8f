//! Story graph, attribute and path types.

mod attribute;
mod edge_record;
mod node_attributes;
#[cfg(test)]
mod node_attributes_test;
mod node_id;
mod report;
mod story_graph;
mod story_node;
mod story_path;

pub use attribute::{Attribute, BAD_COLOR, EndType, GOOD_COLOR, PAUSE_COLOR};
pub use edge_record::EdgeRecord;
pub use node_attributes::{AttributeRecord, NodeAttributes};
pub use node_id::NodeId;
pub use report::Report;
pub use story_graph::StoryGraph;
pub use story_node::{NodeHandle, StoryNode};
pub use story_path::{PathCollection, PathKey, PathStatistics, StoryPath};
