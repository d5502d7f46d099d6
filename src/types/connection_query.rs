//! Typed questions about which links exist in a pattern graph.
//!
//! Evaluated by [crate::PatternGraph::contains_connection]. A link "flows" from
//! the side whose point emits (output or bidirectional) to the side whose point
//! accepts (input or bidirectional); a bidirectional pair flows both ways.

use serde_json::Value;

use super::{BlockId, BlockType, ConnectionType};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionQuery {
  /// A link flows from a block of type `source` into a block of type `target`.
  ByBlockTypes { source: BlockType, target: BlockType },
  /// A link flows from block `source` into block `target`.
  ByDirectIds { source: BlockId, target: BlockId },
  /// Some linked point has this connection type.
  ByConnectionType { connection_type: ConnectionType },
  /// Some block whose property `name` equals `value` has a linked point.
  ByProperty { name: String, value: Value },
}
