//! Structural validation of link reciprocity, and domain acceptance of complete patterns.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};

use crate::compatibility::connection_types_compatible;
use crate::config::PatternRules;
use crate::pattern_graph::PatternGraph;
use crate::types::{BlockId, ConnectionId, ConnectionType, Link};

/// A linked connection whose partner does not hold up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIssue {
  /// The linked block does not exist.
  MissingBlock {
    block_id: BlockId,
    connection_id: ConnectionId,
    target: Link,
  },
  /// The linked block exists but has no such connection point.
  MissingConnection {
    block_id: BlockId,
    connection_id: ConnectionId,
    target: Link,
  },
  /// The partner is unlinked or linked elsewhere.
  NotReciprocal {
    block_id: BlockId,
    connection_id: ConnectionId,
    target: Link,
  },
  IncompatibleTypes {
    block_id: BlockId,
    connection_id: ConnectionId,
    target: Link,
    types: (ConnectionType, ConnectionType),
  },
}

impl fmt::Display for LinkIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LinkIssue::MissingBlock {
        block_id,
        connection_id,
        target,
      } => write!(
        f,
        "{}.{} links to missing block '{}'",
        block_id, connection_id, target.block_id
      ),
      LinkIssue::MissingConnection {
        block_id,
        connection_id,
        target,
      } => write!(
        f,
        "{}.{} links to missing connection '{}.{}'",
        block_id, connection_id, target.block_id, target.connection_id
      ),
      LinkIssue::NotReciprocal {
        block_id,
        connection_id,
        target,
      } => write!(
        f,
        "{}.{} links to {}.{} which does not link back",
        block_id, connection_id, target.block_id, target.connection_id
      ),
      LinkIssue::IncompatibleTypes {
        block_id,
        connection_id,
        target,
        types,
      } => write!(
        f,
        "{}.{} ({}) is linked to {}.{} ({})",
        block_id, connection_id, types.0, target.block_id, target.connection_id, types.1
      ),
    }
  }
}

impl PatternGraph {
  /// True if every linked connection has a partner that exists, links back to
  /// exactly this point, and has a compatible connection type.
  ///
  /// The result is cached until the next structural mutation.
  #[instrument(level = "trace", skip(self))]
  pub fn validate(&self) -> bool {
    if let Some(valid) = self.validation_cache.get() {
      return valid;
    }
    let valid = self.scan_links(true).is_empty();
    debug!(valid, blocks = self.blocks.len(), "validation recomputed");
    self.validation_cache.set(Some(valid));
    valid
  }

  /// Every broken link in the graph, in block then connection order. Not cached.
  pub fn link_issues(&self) -> Vec<LinkIssue> {
    self.scan_links(false)
  }

  /// A complete pattern under the graph's own [PatternRules].
  pub fn is_valid_pattern(&self) -> bool {
    self.is_valid_pattern_with(&self.rules)
  }

  /// A complete pattern: structurally valid, at least `rules.min_blocks` blocks,
  /// at least one block of `rules.anchor_type`, and no block without a link.
  #[instrument(level = "trace", skip(self))]
  pub fn is_valid_pattern_with(&self, rules: &PatternRules) -> bool {
    if !self.validate() {
      return false;
    }
    if self.blocks.len() < rules.min_blocks {
      debug!(blocks = self.blocks.len(), min = rules.min_blocks, "too few blocks");
      return false;
    }
    if !self.blocks.iter().any(|b| b.block_type() == rules.anchor_type) {
      debug!(anchor = %rules.anchor_type, "no anchor block");
      return false;
    }

    let linked_to: HashSet<&str> = self
      .blocks
      .iter()
      .flat_map(|b| b.connections())
      .filter_map(|c| c.linked_block_id())
      .collect();
    let isolated = self
      .blocks
      .iter()
      .find(|b| !b.has_links() && !linked_to.contains(b.id()));
    if let Some(b) = isolated {
      debug!(block_id = %b.id(), "isolated block");
      return false;
    }
    true
  }

  fn scan_links(&self, first_only: bool) -> Vec<LinkIssue> {
    let mut issues = Vec::new();
    for block in &self.blocks {
      for point in block.connections() {
        let Some(link) = point.link() else {
          continue;
        };
        if let Some(issue) = self.check_link(block.id(), point.id(), point.connection_type(), link) {
          issues.push(issue);
          if first_only {
            return issues;
          }
        }
      }
    }
    issues
  }

  fn check_link(
    &self,
    block_id: &str,
    connection_id: &str,
    connection_type: ConnectionType,
    link: &Link,
  ) -> Option<LinkIssue> {
    let block_id = block_id.to_string();
    let connection_id = connection_id.to_string();
    let target = link.clone();

    let Some(target_block) = self.block(&link.block_id) else {
      return Some(LinkIssue::MissingBlock {
        block_id,
        connection_id,
        target,
      });
    };
    let Some(partner) = target_block.connection(&link.connection_id) else {
      return Some(LinkIssue::MissingConnection {
        block_id,
        connection_id,
        target,
      });
    };
    let links_back = partner
      .link()
      .is_some_and(|back| back.points_at(&block_id, &connection_id));
    if !links_back {
      return Some(LinkIssue::NotReciprocal {
        block_id,
        connection_id,
        target,
      });
    }
    if !connection_types_compatible(connection_type, partner.connection_type()) {
      return Some(LinkIssue::IncompatibleTypes {
        block_id,
        connection_id,
        target,
        types: (connection_type, partner.connection_type()),
      });
    }
    None
  }
}
