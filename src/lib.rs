//! # kente-pattern-graph
//!
//! Block connection graphs for Kente pattern programs.
//!
//! A learner assembles a pattern "program" from typed blocks (pattern motifs,
//! colors, loops, structure, columns, rows) whose typed connection points are
//! wired together. [PatternGraph] owns those blocks and is the only way to link
//! or unlink them.
//!
//! ## Architecture
//!
//! - `types`: blocks, connection points and their classifying enums.
//! - `compatibility`: which connection types and block types may pair.
//! - [PatternGraph]: mutation (`add_block`, `remove_block`, `connect`,
//!   `disconnect`), cached validation, analytics and queries.
//! - `serialization` / `pattern_io`: the saved JSON form.

mod analytics;
pub mod compatibility;
pub mod config;
pub mod error;
#[cfg(test)]
mod error_test;
pub mod pattern_graph;
#[cfg(test)]
mod pattern_graph_test;
pub mod pattern_io;
mod query;
pub mod serialization;
#[cfg(test)]
mod serialization_test;
pub mod types;
pub mod validation;

pub use compatibility::{block_types_compatible, connection_types_compatible};
pub use config::PatternRules;
pub use error::{ConnectError, LoadError};
pub use pattern_graph::PatternGraph;
pub use pattern_io::{load_pattern, save_pattern};
pub use types::{
  Block, BlockId, BlockProperties, BlockType, Connection, ConnectionId, ConnectionQuery,
  ConnectionType, PatternStyle,
};
pub use validation::LinkIssue;
