//! Tests for `NodeAttributes`.

use super::{Attribute, AttributeRecord, EndType, NodeAttributes, NodeId, Report};

fn table() -> NodeAttributes {
  NodeAttributes::from_records(vec![
    AttributeRecord::new(3, "good"),
    AttributeRecord::new(4, "bad"),
    AttributeRecord::new(2, "pause"),
    AttributeRecord::new(5, "sparkly"),
  ])
}

#[test]
fn end_type_lookup() {
  let t = table();
  assert_eq!(t.end_type(&NodeId::Int(3)), Some(EndType::Good));
  assert_eq!(t.end_type(&NodeId::Int(4)), Some(EndType::Bad));
  assert_eq!(t.end_type(&NodeId::Int(2)), None);
  assert_eq!(t.end_type(&NodeId::Int(99)), None);
}

#[test]
fn good_wins_over_bad() {
  let t = NodeAttributes::from_records(vec![
    AttributeRecord::new(1, "bad"),
    AttributeRecord::new(1, "good"),
  ]);
  assert_eq!(t.end_type(&NodeId::Int(1)), Some(EndType::Good));
}

#[test]
fn pause_lookup() {
  let t = table();
  assert!(t.is_pause(&NodeId::Int(2)));
  assert!(!t.is_pause(&NodeId::Int(3)));
}

#[test]
fn unknown_labels_are_kept_and_reported() {
  let t = table();
  assert_eq!(t.len(), 4);
  assert_eq!(t.records()[3].attribute, Attribute::Unknown("sparkly".to_string()));
  assert_eq!(
    t.unknown(),
    vec![Report::UnknownAttribute {
      node: NodeId::Int(5),
      label: "sparkly".to_string()
    }]
  );
}

#[test]
fn nodes_are_distinct_in_table_order() {
  let t = NodeAttributes::from_records(vec![
    AttributeRecord::new(9, "pause"),
    AttributeRecord::new(1, "good"),
    AttributeRecord::new(9, "good"),
  ]);
  assert_eq!(t.nodes(), vec![&NodeId::Int(9), &NodeId::Int(1)]);
}
