//! Acceptance rules for complete patterns.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::BlockType;

/// Environment variable overriding [PatternRules::anchor_type].
pub const ANCHOR_TYPE_ENV: &str = "KENTE_ANCHOR_TYPE";
/// Environment variable overriding [PatternRules::min_blocks].
pub const MIN_BLOCKS_ENV: &str = "KENTE_MIN_BLOCKS";

/// Domain rules applied by [crate::PatternGraph::is_valid_pattern] on top of
/// structural validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternRules {
  /// A complete pattern holds at least one block of this kind.
  pub anchor_type: BlockType,
  /// A complete pattern holds at least this many blocks.
  pub min_blocks: usize,
}

impl Default for PatternRules {
  fn default() -> Self {
    Self {
      anchor_type: BlockType::Pattern,
      min_blocks: 2,
    }
  }
}

impl PatternRules {
  /// Defaults overridden by `KENTE_ANCHOR_TYPE` / `KENTE_MIN_BLOCKS` when set.
  pub fn from_env() -> Self {
    Self::default().with_overrides(
      std::env::var(ANCHOR_TYPE_ENV).ok().as_deref(),
      std::env::var(MIN_BLOCKS_ENV).ok().as_deref(),
    )
  }

  /// Applies textual overrides; values that do not parse are ignored with a warning.
  pub fn with_overrides(mut self, anchor_type: Option<&str>, min_blocks: Option<&str>) -> Self {
    if let Some(raw) = anchor_type {
      match raw.parse::<BlockType>() {
        Ok(t) => self.anchor_type = t,
        Err(e) => warn!(value = %raw, error = %e, "ignoring anchor type override"),
      }
    }
    if let Some(raw) = min_blocks {
      match raw.trim().parse::<usize>() {
        Ok(n) => self.min_blocks = n,
        Err(e) => warn!(value = %raw, error = %e, "ignoring min blocks override"),
      }
    }
    self
  }
}
