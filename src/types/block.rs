//! A typed node of the pattern graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BlockId, BlockProperties, BlockType, Connection, Metadata};

/// A block: typed node owning a property bag and an ordered list of connection points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
  id: BlockId,
  block_type: BlockType,
  properties: BlockProperties,
  connections: Vec<Connection>,
}

impl Block {
  /// Creates a block with empty properties and no connection points.
  pub fn new(id: impl Into<BlockId>, block_type: BlockType) -> Self {
    Self {
      id: id.into(),
      block_type,
      properties: BlockProperties::default_for(block_type),
      connections: Vec::new(),
    }
  }

  /// Adds a connection point. A point with the same id is replaced in place.
  pub fn with_connection(mut self, connection: Connection) -> Self {
    match self
      .connections
      .iter_mut()
      .find(|c| c.id() == connection.id())
    {
      Some(existing) => *existing = connection,
      None => self.connections.push(connection),
    }
    self
  }

  /// Replaces the properties; they are re-read as this block's typed variant.
  pub fn with_properties(mut self, properties: BlockProperties) -> Self {
    self.properties = BlockProperties::from_map(self.block_type, properties.to_map());
    self
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn block_type(&self) -> BlockType {
    self.block_type
  }

  pub fn properties(&self) -> &BlockProperties {
    &self.properties
  }

  /// Property `name` as a JSON value.
  pub fn property(&self, name: &str) -> Option<Value> {
    self.properties.get(name)
  }

  pub fn connections(&self) -> &[Connection] {
    &self.connections
  }

  pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
    self.connections.iter().find(|c| c.id() == connection_id)
  }

  /// True if any connection point of this block is linked.
  pub fn has_links(&self) -> bool {
    self.connections.iter().any(Connection::is_linked)
  }

  pub(crate) fn set_id(&mut self, id: BlockId) {
    self.id = id;
  }

  pub(crate) fn connection_mut(&mut self, connection_id: &str) -> Option<&mut Connection> {
    self
      .connections
      .iter_mut()
      .find(|c| c.id() == connection_id)
  }

  pub(crate) fn connections_mut(&mut self) -> impl Iterator<Item = &mut Connection> {
    self.connections.iter_mut()
  }
}

/// Wire form of a [Block].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
  pub id: BlockId,
  #[serde(rename = "type")]
  pub block_type: BlockType,
  #[serde(default)]
  pub properties: Metadata,
  #[serde(default)]
  pub connections: Vec<Connection>,
}

impl TryFrom<BlockRecord> for Block {
  type Error = String;

  fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
    for (i, c) in record.connections.iter().enumerate() {
      if record.connections[..i].iter().any(|p| p.id() == c.id()) {
        return Err(format!(
          "block '{}' has duplicate connection id '{}'",
          record.id,
          c.id()
        ));
      }
    }
    Ok(Block {
      properties: BlockProperties::from_map(record.block_type, record.properties),
      id: record.id,
      block_type: record.block_type,
      connections: record.connections,
    })
  }
}

impl From<Block> for BlockRecord {
  fn from(block: Block) -> Self {
    BlockRecord {
      properties: block.properties.to_map(),
      id: block.id,
      block_type: block.block_type,
      connections: block.connections,
    }
  }
}
