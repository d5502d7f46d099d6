//! Direction of a connection point.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a connection point on a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
  Input,
  Output,
  Bidirectional,
}

impl ConnectionType {
  /// True if data may leave a block through a point of this type.
  pub fn emits(&self) -> bool {
    matches!(self, ConnectionType::Output | ConnectionType::Bidirectional)
  }

  /// True if data may enter a block through a point of this type.
  pub fn accepts(&self) -> bool {
    matches!(self, ConnectionType::Input | ConnectionType::Bidirectional)
  }
}

impl fmt::Display for ConnectionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConnectionType::Input => write!(f, "input"),
      ConnectionType::Output => write!(f, "output"),
      ConnectionType::Bidirectional => write!(f, "bidirectional"),
    }
  }
}
