//! The node-attribute table and lookups derived from it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Attribute, EndType, NodeId, Report};

/// One row of the node-attribute table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
  pub node: NodeId,
  pub attribute: Attribute,
}

impl AttributeRecord {
  pub fn new(node: impl Into<NodeId>, attribute: impl Into<Attribute>) -> Self {
    Self {
      node: node.into(),
      attribute: attribute.into(),
    }
  }
}

/// Node-attribute table plus per-category membership sets.
///
/// A node may carry several rows; each category is tracked independently.
#[derive(Debug, Clone, Default)]
pub struct NodeAttributes {
  records: Vec<AttributeRecord>,
  good: HashSet<NodeId>,
  bad: HashSet<NodeId>,
  pause: HashSet<NodeId>,
}

impl NodeAttributes {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds the table, logging every row whose label is unknown.
  pub fn from_records(records: Vec<AttributeRecord>) -> Self {
    let mut attrs = Self::new();
    for record in records {
      attrs.push(record);
    }
    attrs
  }

  pub fn push(&mut self, record: AttributeRecord) {
    match &record.attribute {
      Attribute::Good => {
        self.good.insert(record.node.clone());
      }
      Attribute::Bad => {
        self.bad.insert(record.node.clone());
      }
      Attribute::Pause => {
        self.pause.insert(record.node.clone());
      }
      Attribute::Unknown(label) => Report::UnknownAttribute {
        node: record.node.clone(),
        label: label.clone(),
      }
      .log(),
    }
    self.records.push(record);
  }

  /// Rows in table order.
  pub fn records(&self) -> &[AttributeRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Good is checked before bad, so a node labelled both ends well.
  pub fn end_type(&self, id: &NodeId) -> Option<EndType> {
    if self.good.contains(id) {
      Some(EndType::Good)
    } else if self.bad.contains(id) {
      Some(EndType::Bad)
    } else {
      None
    }
  }

  pub fn is_pause(&self, id: &NodeId) -> bool {
    self.pause.contains(id)
  }

  /// Rows with labels outside good/bad/pause.
  pub fn unknown(&self) -> Vec<Report> {
    self
      .records
      .iter()
      .filter_map(|r| match &r.attribute {
        Attribute::Unknown(label) => Some(Report::UnknownAttribute {
          node: r.node.clone(),
          label: label.clone(),
        }),
        _ => None,
      })
      .collect()
  }

  /// Distinct attributed node ids in first-seen order.
  pub fn nodes(&self) -> Vec<&NodeId> {
    let mut seen = HashSet::new();
    self
      .records
      .iter()
      .map(|r| &r.node)
      .filter(|id| seen.insert(*id))
      .collect()
  }
}
