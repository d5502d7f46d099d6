//! Property bags of blocks, typed by block kind.
//!
//! On the wire a block's `properties` is a plain JSON object. It is decoded into
//! the typed variant for the block's [BlockType]; keys the typed variant does not
//! know are kept in its `extra` map, and a bag that does not re-encode to exactly
//! the same object (e.g. a string `count` or an explicit `null` in a typed key)
//! is kept verbatim as [BlockProperties::Opaque].

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{BlockType, Metadata};

/// Properties of a `pattern` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternProps {
  /// Named motif of the pattern (e.g. `"dame_dame"`, `"nkyinkyim"`).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pattern_type: Option<String>,
  #[serde(flatten)]
  pub extra: Metadata,
}

/// Properties of a `color` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProps {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(flatten)]
  pub extra: Metadata,
}

/// Properties of a `loop` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopProps {
  /// Number of repetitions.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub count: Option<u32>,
  #[serde(flatten)]
  pub extra: Metadata,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockProperties {
  Pattern(PatternProps),
  Color(ColorProps),
  Loop(LoopProps),
  /// Untyped bag: structure/column/row blocks, or data that did not decode.
  Opaque(Metadata),
}

impl BlockProperties {
  /// Empty properties of the variant matching `block_type`.
  pub fn default_for(block_type: BlockType) -> Self {
    match block_type {
      BlockType::Pattern => BlockProperties::Pattern(PatternProps::default()),
      BlockType::Color => BlockProperties::Color(ColorProps::default()),
      BlockType::Loop => BlockProperties::Loop(LoopProps::default()),
      BlockType::Structure | BlockType::Column | BlockType::Row => {
        BlockProperties::Opaque(Metadata::new())
      }
    }
  }

  /// Decodes a wire property bag for a block of `block_type`.
  pub fn from_map(block_type: BlockType, map: Metadata) -> Self {
    match block_type {
      BlockType::Pattern => decode(map, BlockProperties::Pattern),
      BlockType::Color => decode(map, BlockProperties::Color),
      BlockType::Loop => decode(map, BlockProperties::Loop),
      BlockType::Structure | BlockType::Column | BlockType::Row => BlockProperties::Opaque(map),
    }
  }

  /// Encodes back to the wire property bag.
  pub fn to_map(&self) -> Metadata {
    match self {
      BlockProperties::Pattern(p) => encode(p),
      BlockProperties::Color(c) => encode(c),
      BlockProperties::Loop(l) => encode(l),
      BlockProperties::Opaque(m) => m.clone(),
    }
  }

  /// Value of property `name` as it appears on the wire.
  pub fn get(&self, name: &str) -> Option<Value> {
    match self {
      BlockProperties::Opaque(m) => m.get(name).cloned(),
      other => other.to_map().remove(name),
    }
  }

  pub fn pattern_type(&self) -> Option<&str> {
    match self {
      BlockProperties::Pattern(p) => p.pattern_type.as_deref(),
      BlockProperties::Opaque(m) => m.get("patternType").and_then(Value::as_str),
      _ => None,
    }
  }

  pub fn color(&self) -> Option<&str> {
    match self {
      BlockProperties::Color(c) => c.color.as_deref(),
      BlockProperties::Opaque(m) => m.get("color").and_then(Value::as_str),
      _ => None,
    }
  }

  pub fn loop_count(&self) -> Option<u32> {
    match self {
      BlockProperties::Loop(l) => l.count,
      BlockProperties::Opaque(m) => m
        .get("count")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()),
      _ => None,
    }
  }
}

fn decode<T: DeserializeOwned + Serialize>(
  map: Metadata,
  wrap: fn(T) -> BlockProperties,
) -> BlockProperties {
  match serde_json::from_value::<T>(Value::Object(map.clone())) {
    Ok(props) if encode(&props) == map => wrap(props),
    _ => BlockProperties::Opaque(map),
  }
}

fn encode<T: Serialize>(props: &T) -> Metadata {
  match serde_json::to_value(props) {
    Ok(Value::Object(map)) => map,
    _ => Metadata::new(),
  }
}
