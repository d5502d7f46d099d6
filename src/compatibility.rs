//! Pairing rules for connection points and block kinds.
//!
//! Pure functions; both rules are symmetric.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::types::{BlockType, ConnectionType};

/// Block kinds that may be linked directly. Each pair is listed once; lookups
/// check both orders. No kind is adjacent to itself.
const BLOCK_ADJACENCY: &[(BlockType, BlockType)] = &[
  (BlockType::Pattern, BlockType::Color),
  (BlockType::Pattern, BlockType::Structure),
  (BlockType::Pattern, BlockType::Loop),
  (BlockType::Loop, BlockType::Color),
  (BlockType::Structure, BlockType::Column),
  (BlockType::Structure, BlockType::Row),
];

static ADJACENCY_SET: Lazy<HashSet<(BlockType, BlockType)>> = Lazy::new(|| {
  BLOCK_ADJACENCY
    .iter()
    .flat_map(|&(a, b)| [(a, b), (b, a)])
    .collect()
});

/// True if a point of type `a` may be linked to a point of type `b`:
/// either side is bidirectional, or one is input and the other output.
pub fn connection_types_compatible(a: ConnectionType, b: ConnectionType) -> bool {
  use ConnectionType::*;
  matches!(
    (a, b),
    (Bidirectional, _) | (_, Bidirectional) | (Input, Output) | (Output, Input)
  )
}

/// True if blocks of kind `a` and `b` may be linked.
pub fn block_types_compatible(a: BlockType, b: BlockType) -> bool {
  ADJACENCY_SET.contains(&(a, b))
}

/// Block kinds `block_type` may be linked to, in [BlockType::ALL] order.
pub fn compatible_block_types(block_type: BlockType) -> Vec<BlockType> {
  BlockType::ALL
    .into_iter()
    .filter(|&other| block_types_compatible(block_type, other))
    .collect()
}
