//! Read-only query surface for visualization and challenge collaborators.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::pattern_graph::PatternGraph;
use crate::types::{Block, BlockId, BlockType, ConnectionQuery};

impl PatternGraph {
  /// Distinct block types present.
  pub fn block_types(&self) -> BTreeSet<BlockType> {
    self.blocks.iter().map(Block::block_type).collect()
  }

  pub fn count_blocks_by_type(&self, block_type: BlockType) -> usize {
    self
      .blocks
      .iter()
      .filter(|b| b.block_type() == block_type)
      .count()
  }

  /// Blocks whose property `name` equals `value`, in insertion order.
  pub fn blocks_by_property(&self, name: &str, value: &Value) -> Vec<&Block> {
    self
      .blocks
      .iter()
      .filter(|b| b.property(name).as_ref() == Some(value))
      .collect()
  }

  /// Adjacency list keyed by block id; links count in both directions and
  /// unlinked blocks map to an empty list.
  pub fn connection_graph(&self) -> HashMap<BlockId, Vec<BlockId>> {
    self
      .undirected_adjacency()
      .into_iter()
      .enumerate()
      .map(|(i, neighbours)| {
        (
          self.blocks[i].id().to_string(),
          neighbours
            .into_iter()
            .map(|j| self.blocks[j].id().to_string())
            .collect(),
        )
      })
      .collect()
  }

  /// True if some link in the graph answers `query`.
  pub fn contains_connection(&self, query: &ConnectionQuery) -> bool {
    match query {
      ConnectionQuery::ByBlockTypes { source, target } => self
        .flows()
        .any(|(from, to)| from.block_type() == *source && to.block_type() == *target),
      ConnectionQuery::ByDirectIds { source, target } => self
        .flows()
        .any(|(from, to)| from.id() == source.as_str() && to.id() == target.as_str()),
      ConnectionQuery::ByConnectionType { connection_type } => self
        .blocks
        .iter()
        .flat_map(|b| b.connections())
        .any(|c| c.is_linked() && c.connection_type() == *connection_type),
      ConnectionQuery::ByProperty { name, value } => self
        .blocks
        .iter()
        .any(|b| b.has_links() && b.property(name).as_ref() == Some(value)),
    }
  }

  /// Linked (from, to) block pairs where `from`'s point emits and `to`'s point
  /// accepts. Links whose partner is missing are skipped.
  fn flows(&self) -> impl Iterator<Item = (&Block, &Block)> + '_ {
    self.blocks.iter().flat_map(move |from| {
      from.connections().iter().filter_map(move |point| {
        let link = point.link()?;
        let to = self.block(&link.block_id)?;
        let partner = to.connection(&link.connection_id)?;
        (point.connection_type().emits() && partner.connection_type().accepts()).then_some((from, to))
      })
    })
  }
}
