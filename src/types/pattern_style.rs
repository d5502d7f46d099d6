//! Coarse style tag derived from the block composition of a pattern.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Style of a pattern, see [crate::PatternGraph::pattern_style].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStyle {
  Traditional,
  Repetition,
  Structured,
  Colorful,
  Basic,
}

impl fmt::Display for PatternStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PatternStyle::Traditional => write!(f, "traditional"),
      PatternStyle::Repetition => write!(f, "repetition"),
      PatternStyle::Structured => write!(f, "structured"),
      PatternStyle::Colorful => write!(f, "colorful"),
      PatternStyle::Basic => write!(f, "basic"),
    }
  }
}
