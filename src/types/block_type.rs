//! Closed set of block kinds a pattern program is assembled from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a block. Serialized in lower case (`"pattern"`, `"loop"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
  Pattern,
  Color,
  Structure,
  Loop,
  Column,
  Row,
}

impl BlockType {
  /// Every block type, in declaration order.
  pub const ALL: [BlockType; 6] = [
    BlockType::Pattern,
    BlockType::Color,
    BlockType::Structure,
    BlockType::Loop,
    BlockType::Column,
    BlockType::Row,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      BlockType::Pattern => "pattern",
      BlockType::Color => "color",
      BlockType::Structure => "structure",
      BlockType::Loop => "loop",
      BlockType::Column => "column",
      BlockType::Row => "row",
    }
  }
}

impl fmt::Display for BlockType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BlockType {
  type Err = String;

  /// Parses a block type name, ignoring ASCII case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    BlockType::ALL
      .into_iter()
      .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("unknown block type '{}'", s))
  }
}
