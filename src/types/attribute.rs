//! Categorical storylet labels and path end classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label attached to a storylet in the node-attribute table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
  Good,
  Bad,
  Pause,
  /// Any label outside the known categories, kept verbatim for reporting.
  Unknown(String),
}

impl Attribute {
  /// Fill color used when rendering a storylet with this label.
  pub fn fill_color(&self) -> Option<&'static str> {
    match self {
      Attribute::Good => Some(GOOD_COLOR),
      Attribute::Bad => Some(BAD_COLOR),
      Attribute::Pause => Some(PAUSE_COLOR),
      Attribute::Unknown(_) => None,
    }
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, Attribute::Unknown(_))
  }
}

/// Green.
pub const GOOD_COLOR: &str = "#7aa457";
/// Red.
pub const BAD_COLOR: &str = "#cb6751";
/// Violet.
pub const PAUSE_COLOR: &str = "#9e6ebd";

impl From<&str> for Attribute {
  fn from(s: &str) -> Self {
    match s {
      "good" => Attribute::Good,
      "bad" => Attribute::Bad,
      "pause" => Attribute::Pause,
      other => Attribute::Unknown(other.to_string()),
    }
  }
}

impl From<String> for Attribute {
  fn from(s: String) -> Self {
    Attribute::from(s.as_str())
  }
}

impl From<Attribute> for String {
  fn from(a: Attribute) -> Self {
    a.to_string()
  }
}

impl fmt::Display for Attribute {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Attribute::Good => write!(f, "good"),
      Attribute::Bad => write!(f, "bad"),
      Attribute::Pause => write!(f, "pause"),
      Attribute::Unknown(label) => write!(f, "{}", label),
    }
  }
}

/// How a path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
  Good,
  Bad,
}

impl fmt::Display for EndType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EndType::Good => write!(f, "good"),
      EndType::Bad => write!(f, "bad"),
    }
  }
}
