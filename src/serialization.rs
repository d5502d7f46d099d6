//! JSON form of a pattern graph:
//!
//! ```json
//! { "blocks": [ { "id": "b1", "type": "pattern", "properties": {},
//!                 "connections": [ { "id": "c1", "type": "output",
//!                                    "connectedToId": "b2", "connectedToPointId": "c2" } ] } ],
//!   "metadata": {} }
//! ```
//!
//! Loading rejects data a caller could not repair through the mutation API:
//! missing fields, unknown type names, duplicate ids, and links whose partner
//! does not link back. Connection-type mismatches are left for `validate()`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::instrument;

use crate::error::LoadError;
use crate::pattern_graph::PatternGraph;
use crate::types::{Block, Metadata};

/// Wire form of a [PatternGraph].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRecord {
  pub blocks: Vec<Block>,
  #[serde(default)]
  pub metadata: Metadata,
}

#[derive(Serialize)]
struct PatternRecordRef<'a> {
  blocks: &'a [Block],
  metadata: &'a Metadata,
}

impl PatternGraph {
  /// Parses and checks a saved pattern.
  #[instrument(level = "trace", skip(json))]
  pub fn from_json(json: &str) -> Result<Self, LoadError> {
    let record: PatternRecord =
      serde_json::from_str(json).map_err(|e| LoadError::MalformedSerialization(e.to_string()))?;
    Self::try_from(record)
  }

  pub fn from_value(value: Value) -> Result<Self, LoadError> {
    let record: PatternRecord =
      serde_json::from_value(value).map_err(|e| LoadError::MalformedSerialization(e.to_string()))?;
    Self::try_from(record)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }

  pub fn to_json_pretty(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  pub fn to_value(&self) -> serde_json::Result<Value> {
    serde_json::to_value(self)
  }
}

impl TryFrom<PatternRecord> for PatternGraph {
  type Error = LoadError;

  fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
    let mut ids = HashSet::new();
    for block in &record.blocks {
      if !ids.insert(block.id()) {
        return Err(LoadError::MalformedSerialization(format!(
          "duplicate block id '{}'",
          block.id()
        )));
      }
    }
    let graph = PatternGraph::from_blocks(record.blocks, record.metadata);
    check_reciprocal(&graph)?;
    Ok(graph)
  }
}

/// Every `connectedToId`/`connectedToPointId` pair must name an existing point that points back.
fn check_reciprocal(graph: &PatternGraph) -> Result<(), LoadError> {
  for block in graph.blocks() {
    for point in block.connections() {
      let Some(link) = point.link() else {
        continue;
      };
      let links_back = graph
        .block(&link.block_id)
        .and_then(|b| b.connection(&link.connection_id))
        .and_then(|partner| partner.link())
        .is_some_and(|back| back.points_at(block.id(), point.id()));
      if !links_back {
        return Err(LoadError::MalformedSerialization(format!(
          "connection '{}' on block '{}' links to '{}.{}' without a matching reciprocal",
          point.id(),
          block.id(),
          link.block_id,
          link.connection_id
        )));
      }
    }
  }
  Ok(())
}

impl Serialize for PatternGraph {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    PatternRecordRef {
      blocks: &self.blocks,
      metadata: &self.metadata,
    }
    .serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for PatternGraph {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let record = PatternRecord::deserialize(deserializer)?;
    PatternGraph::try_from(record).map_err(serde::de::Error::custom)
  }
}
