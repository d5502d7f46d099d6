//! Data entities of a pattern graph: blocks, their connection points and the
//! small enums that classify them.
//!
//! Blocks and connections are plain data; the [crate::PatternGraph] aggregate
//! owns them and is the only place links are created or cleared.

use serde_json::{Map, Value};

mod block;
mod block_properties;
mod block_type;
mod connection;
mod connection_query;
mod connection_type;
mod pattern_style;

pub use block::{Block, BlockRecord};
pub use block_properties::{BlockProperties, ColorProps, LoopProps, PatternProps};
pub use block_type::BlockType;
pub use connection::{Connection, ConnectionRecord, Link};
pub use connection_query::ConnectionQuery;
pub use connection_type::ConnectionType;
pub use pattern_style::PatternStyle;

/// Opaque block identifier.
pub type BlockId = String;

/// Identifier of a connection point, unique within its owning block.
pub type ConnectionId = String;

/// Free-form key/value data attached to a graph or carried in a property bag.
pub type Metadata = Map<String, Value>;
