//! The pattern graph aggregate: sole owner of blocks and their links.
//!
//! Blocks live in an arena (`Vec<Block>` plus an id index); connections refer
//! to their partners by id, so cyclic patterns need no shared ownership. Every
//! structural mutation goes through [PatternGraph::add_block],
//! [PatternGraph::remove_block], [PatternGraph::connect] or
//! [PatternGraph::disconnect], and each of them resets the validation cache.
//!
//! The graph is a plain single-threaded structure (the cache is a `Cell`, so
//! the type is `!Sync`); callers sharing one instance must serialize access.

use std::cell::Cell;
use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::compatibility::{block_types_compatible, connection_types_compatible};
use crate::config::PatternRules;
use crate::error::ConnectError;
use crate::types::{Block, BlockId, BlockType, Connection, Link, Metadata};

/// A user-assembled pattern program: blocks wired together through typed connection points.
#[derive(Debug, Clone, Default)]
pub struct PatternGraph {
  pub(crate) blocks: Vec<Block>,
  pub(crate) index: HashMap<BlockId, usize>,
  pub(crate) metadata: Metadata,
  pub(crate) rules: PatternRules,
  /// `None` when dirty, otherwise the last `validate()` result.
  pub(crate) validation_cache: Cell<Option<bool>>,
}

impl PatternGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a graph from existing blocks as-is; links are not checked and no
  /// validity is assumed until [PatternGraph::validate] is called.
  ///
  /// When two blocks share an id the first one wins and later ones are dropped.
  pub fn from_blocks(blocks: Vec<Block>, metadata: Metadata) -> Self {
    let mut graph = Self {
      metadata,
      ..Self::default()
    };
    for block in blocks {
      if graph.index.contains_key(block.id()) {
        warn!(block_id = %block.id(), "dropping block with duplicate id");
        continue;
      }
      graph.index.insert(block.id().to_string(), graph.blocks.len());
      graph.blocks.push(block);
    }
    graph
  }

  /// Replaces the acceptance rules used by [PatternGraph::is_valid_pattern].
  pub fn with_rules(mut self, rules: PatternRules) -> Self {
    self.rules = rules;
    self
  }

  pub fn rules(&self) -> &PatternRules {
    &self.rules
  }

  pub fn set_rules(&mut self, rules: PatternRules) {
    self.rules = rules;
  }

  pub fn block(&self, id: &str) -> Option<&Block> {
    self.index.get(id).map(|&i| &self.blocks[i])
  }

  /// All blocks in insertion order.
  pub fn blocks(&self) -> &[Block] {
    &self.blocks
  }

  pub fn block_count(&self) -> usize {
    self.blocks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  pub fn contains_block(&self, id: &str) -> bool {
    self.index.contains_key(id)
  }

  pub fn metadata(&self) -> &Metadata {
    &self.metadata
  }

  /// Metadata is descriptive only; changing it leaves the validation cache alone.
  pub fn metadata_mut(&mut self) -> &mut Metadata {
    &mut self.metadata
  }

  pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
    self.metadata.insert(key.into(), value)
  }

  /// Inserts a block and returns its id.
  ///
  /// An empty or already used id is replaced by a fresh UUID. Links preset on
  /// the block's connections are cleared: links are only made by [PatternGraph::connect].
  #[instrument(level = "trace", skip(self, block), fields(block_id = %block.id()))]
  pub fn add_block(&mut self, mut block: Block) -> BlockId {
    if block.id().is_empty() || self.index.contains_key(block.id()) {
      let mut fresh = Uuid::new_v4().to_string();
      while self.index.contains_key(&fresh) {
        fresh = Uuid::new_v4().to_string();
      }
      warn!(requested = %block.id(), assigned = %fresh, "block id empty or taken");
      block.set_id(fresh);
    }

    let dropped = block
      .connections_mut()
      .filter_map(|c| c.clear_link())
      .count();
    if dropped > 0 {
      warn!(block_id = %block.id(), dropped, "ignoring links preset on added block");
    }

    let id = block.id().to_string();
    self.index.insert(id.clone(), self.blocks.len());
    self.blocks.push(block);
    self.invalidate();
    id
  }

  /// Removes a block and unlinks every connection that pointed at it.
  /// Does nothing if the block does not exist.
  #[instrument(level = "trace", skip(self))]
  pub fn remove_block(&mut self, id: &str) {
    let Some(pos) = self.index.remove(id) else {
      return;
    };
    self.blocks.remove(pos);
    self.reindex();

    let mut cleared = 0usize;
    for block in &mut self.blocks {
      for c in block.connections_mut() {
        if c.linked_block_id() == Some(id) {
          c.clear_link();
          cleared += 1;
        }
      }
    }
    debug!(block_id = %id, cleared, "block removed");
    self.invalidate();
  }

  /// Links point `conn_a` of `block_a` with point `conn_b` of `block_b`.
  ///
  /// Fails without changing anything if a block or point is missing, either
  /// point is already linked, or the connection or block types do not pair.
  #[instrument(level = "trace", skip(self))]
  pub fn connect(
    &mut self,
    block_a: &str,
    conn_a: &str,
    block_b: &str,
    conn_b: &str,
  ) -> Result<(), ConnectError> {
    if let Err(e) = self.check_connect(block_a, conn_a, block_b, conn_b) {
      debug!(error = %e, "connect rejected");
      return Err(e);
    }

    if let Some(c) = self.connection_mut(block_a, conn_a) {
      c.set_link(Link::new(block_b, conn_b));
    }
    if let Some(c) = self.connection_mut(block_b, conn_b) {
      c.set_link(Link::new(block_a, conn_a));
    }
    self.invalidate();
    Ok(())
  }

  /// Unlinks two points that are linked to each other. Returns false, changing
  /// nothing, when they are not mutually linked.
  #[instrument(level = "trace", skip(self))]
  pub fn disconnect(&mut self, block_a: &str, conn_a: &str, block_b: &str, conn_b: &str) -> bool {
    let mutual = self.linked_to(block_a, conn_a, block_b, conn_b)
      && self.linked_to(block_b, conn_b, block_a, conn_a);
    if !mutual {
      debug!("disconnect ignored: points are not linked to each other");
      return false;
    }

    if let Some(c) = self.connection_mut(block_a, conn_a) {
      c.clear_link();
    }
    if let Some(c) = self.connection_mut(block_b, conn_b) {
      c.clear_link();
    }
    self.invalidate();
    true
  }

  fn check_connect(
    &self,
    block_a: &str,
    conn_a: &str,
    block_b: &str,
    conn_b: &str,
  ) -> Result<(), ConnectError> {
    let (type_a, point_a) = self.point(block_a, conn_a)?;
    let (type_b, point_b) = self.point(block_b, conn_b)?;

    for (block_id, point) in [(block_a, point_a), (block_b, point_b)] {
      if point.is_linked() {
        return Err(ConnectError::AlreadyLinked {
          block_id: block_id.to_string(),
          connection_id: point.id().to_string(),
        });
      }
    }
    if !connection_types_compatible(point_a.connection_type(), point_b.connection_type()) {
      return Err(ConnectError::IncompatibleConnectionType {
        left: point_a.connection_type(),
        right: point_b.connection_type(),
      });
    }
    if block_a == block_b || !block_types_compatible(type_a, type_b) {
      return Err(ConnectError::IncompatibleBlockType {
        left: type_a,
        right: type_b,
      });
    }
    Ok(())
  }

  fn point(&self, block_id: &str, conn_id: &str) -> Result<(BlockType, &Connection), ConnectError> {
    let block = self.block(block_id).ok_or_else(|| ConnectError::NotFound {
      block_id: block_id.to_string(),
      connection_id: None,
    })?;
    let point = block
      .connection(conn_id)
      .ok_or_else(|| ConnectError::NotFound {
        block_id: block_id.to_string(),
        connection_id: Some(conn_id.to_string()),
      })?;
    Ok((block.block_type(), point))
  }

  /// True if point (`block_id`, `conn_id`) links to (`target_block`, `target_conn`).
  fn linked_to(&self, block_id: &str, conn_id: &str, target_block: &str, target_conn: &str) -> bool {
    self
      .block(block_id)
      .and_then(|b| b.connection(conn_id))
      .and_then(Connection::link)
      .is_some_and(|l| l.points_at(target_block, target_conn))
  }

  fn connection_mut(&mut self, block_id: &str, conn_id: &str) -> Option<&mut Connection> {
    let &i = self.index.get(block_id)?;
    self.blocks[i].connection_mut(conn_id)
  }

  fn reindex(&mut self) {
    self.index = self
      .blocks
      .iter()
      .enumerate()
      .map(|(i, b)| (b.id().to_string(), i))
      .collect();
  }

  fn invalidate(&self) {
    self.validation_cache.set(None);
  }
}

impl PartialEq for PatternGraph {
  /// Graphs are equal when their blocks (in order), metadata and rules are equal.
  fn eq(&self, other: &Self) -> bool {
    self.blocks == other.blocks && self.metadata == other.metadata && self.rules == other.rules
  }
}
