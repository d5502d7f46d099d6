//! A typed attachment point on a block, optionally paired with a point on another block.

use serde::{Deserialize, Serialize};

use super::{BlockId, ConnectionId, ConnectionType};

/// The far end of a linked connection: a block and one of its connection points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
  pub block_id: BlockId,
  pub connection_id: ConnectionId,
}

impl Link {
  pub fn new(block_id: impl Into<BlockId>, connection_id: impl Into<ConnectionId>) -> Self {
    Self {
      block_id: block_id.into(),
      connection_id: connection_id.into(),
    }
  }

  /// True if this link targets `connection_id` on `block_id`.
  pub fn points_at(&self, block_id: &str, connection_id: &str) -> bool {
    self.block_id == block_id && self.connection_id == connection_id
  }
}

/// A connection point owned by a block.
///
/// The partner block id and partner connection id are held together in one
/// [Link], so a half-set link cannot exist in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConnectionRecord", into = "ConnectionRecord")]
pub struct Connection {
  id: ConnectionId,
  connection_type: ConnectionType,
  link: Option<Link>,
}

impl Connection {
  /// Creates an unlinked connection point.
  pub fn new(id: impl Into<ConnectionId>, connection_type: ConnectionType) -> Self {
    Self {
      id: id.into(),
      connection_type,
      link: None,
    }
  }

  /// Sets the partner of this point without any checks.
  ///
  /// Only meaningful for blocks handed to [crate::PatternGraph::from_blocks]
  /// (saved or hand-built data); [crate::PatternGraph::add_block] drops such links.
  pub fn linked_to(
    mut self,
    block_id: impl Into<BlockId>,
    connection_id: impl Into<ConnectionId>,
  ) -> Self {
    self.link = Some(Link::new(block_id, connection_id));
    self
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn connection_type(&self) -> ConnectionType {
    self.connection_type
  }

  pub fn link(&self) -> Option<&Link> {
    self.link.as_ref()
  }

  pub fn is_linked(&self) -> bool {
    self.link.is_some()
  }

  /// Id of the linked block, if any.
  pub fn linked_block_id(&self) -> Option<&str> {
    self.link.as_ref().map(|l| l.block_id.as_str())
  }

  /// Id of the linked connection on the linked block, if any.
  pub fn linked_connection_id(&self) -> Option<&str> {
    self.link.as_ref().map(|l| l.connection_id.as_str())
  }

  pub(crate) fn set_link(&mut self, link: Link) {
    self.link = Some(link);
  }

  pub(crate) fn clear_link(&mut self) -> Option<Link> {
    self.link.take()
  }
}

/// Wire form of a [Connection] (`connectedToId` / `connectedToPointId`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
  pub id: ConnectionId,
  #[serde(rename = "type")]
  pub connection_type: ConnectionType,
  #[serde(default)]
  pub connected_to_id: Option<BlockId>,
  #[serde(default)]
  pub connected_to_point_id: Option<ConnectionId>,
}

impl TryFrom<ConnectionRecord> for Connection {
  type Error = String;

  fn try_from(record: ConnectionRecord) -> Result<Self, Self::Error> {
    let link = match (record.connected_to_id, record.connected_to_point_id) {
      (Some(block_id), Some(connection_id)) => Some(Link {
        block_id,
        connection_id,
      }),
      (None, None) => None,
      (Some(_), None) => {
        return Err(format!(
          "connection '{}' has connectedToId without connectedToPointId",
          record.id
        ));
      }
      (None, Some(_)) => {
        return Err(format!(
          "connection '{}' has connectedToPointId without connectedToId",
          record.id
        ));
      }
    };
    Ok(Connection {
      id: record.id,
      connection_type: record.connection_type,
      link,
    })
  }
}

impl From<Connection> for ConnectionRecord {
  fn from(connection: Connection) -> Self {
    let (connected_to_id, connected_to_point_id) = match connection.link {
      Some(link) => (Some(link.block_id), Some(link.connection_id)),
      None => (None, None),
    };
    ConnectionRecord {
      id: connection.id,
      connection_type: connection.connection_type,
      connected_to_id,
      connected_to_point_id,
    }
  }
}
