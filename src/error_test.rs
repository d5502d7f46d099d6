//! Tests for error display.

use crate::error::{ConnectError, LoadError};
use crate::types::{BlockType, ConnectionType};

#[test]
fn not_found_mentions_connection_when_known() {
  let e = ConnectError::NotFound {
    block_id: "b1".to_string(),
    connection_id: Some("c9".to_string()),
  };
  assert_eq!(e.to_string(), "not found: block 'b1', connection 'c9'");
  let e = ConnectError::NotFound {
    block_id: "b1".to_string(),
    connection_id: None,
  };
  assert_eq!(e.to_string(), "not found: block 'b1'");
}

#[test]
fn incompatibility_messages_name_types() {
  let e = ConnectError::IncompatibleConnectionType {
    left: ConnectionType::Output,
    right: ConnectionType::Output,
  };
  assert_eq!(e.to_string(), "connection types output and output cannot be linked");
  let e = ConnectError::IncompatibleBlockType {
    left: BlockType::Color,
    right: BlockType::Column,
  };
  assert!(e.to_string().contains("color and column"));
}

#[test]
fn io_error_converts() {
  let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
  let e: LoadError = io.into();
  assert!(matches!(e, LoadError::Io(_)));
}
