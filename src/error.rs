//! Errors returned by graph mutation and by loading saved patterns.

use thiserror::Error;

use crate::types::{BlockId, BlockType, ConnectionId, ConnectionType};

/// Why [crate::PatternGraph::connect] refused to link two points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
  /// The block, or the connection point on it, does not exist.
  #[error("not found: block '{block_id}'{}", connection_suffix(.connection_id))]
  NotFound {
    block_id: BlockId,
    connection_id: Option<ConnectionId>,
  },

  /// The point already has a partner.
  #[error("connection '{connection_id}' on block '{block_id}' is already linked")]
  AlreadyLinked {
    block_id: BlockId,
    connection_id: ConnectionId,
  },

  #[error("connection types {left} and {right} cannot be linked")]
  IncompatibleConnectionType {
    left: ConnectionType,
    right: ConnectionType,
  },

  #[error("block types {left} and {right} cannot be linked")]
  IncompatibleBlockType { left: BlockType, right: BlockType },
}

fn connection_suffix(connection_id: &Option<ConnectionId>) -> String {
  connection_id
    .as_ref()
    .map(|c| format!(", connection '{}'", c))
    .unwrap_or_default()
}

/// Failure to turn saved data into a [crate::PatternGraph].
#[derive(Error, Debug)]
pub enum LoadError {
  /// Missing fields, unknown type names, duplicate ids or one-sided links.
  #[error("malformed pattern serialization: {0}")]
  MalformedSerialization(String),

  #[error("pattern file I/O: {0}")]
  Io(#[from] std::io::Error),
}
