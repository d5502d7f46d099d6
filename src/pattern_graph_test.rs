//! Tests for the `PatternGraph` mutation API.

use serde_json::json;

use crate::error::ConnectError;
use crate::pattern_graph::PatternGraph;
use crate::types::{Block, BlockType, Connection, ConnectionType, Metadata};

fn block(id: &str, block_type: BlockType, points: &[(&str, ConnectionType)]) -> Block {
  points.iter().fold(Block::new(id, block_type), |b, (c, t)| {
    b.with_connection(Connection::new(*c, *t))
  })
}

/// Pattern `b1` (output `c1`) and Color `b2` (input `c2`).
fn pattern_and_color() -> PatternGraph {
  let mut g = PatternGraph::new();
  g.add_block(block("b1", BlockType::Pattern, &[("c1", ConnectionType::Output)]));
  g.add_block(block("b2", BlockType::Color, &[("c2", ConnectionType::Input)]));
  g
}

#[test]
fn new_graph_is_empty() {
  let g = PatternGraph::new();
  assert!(g.is_empty());
  assert_eq!(g.block_count(), 0);
  assert!(g.metadata().is_empty());
}

#[test]
fn add_block_keeps_caller_id() {
  let mut g = PatternGraph::new();
  let id = g.add_block(Block::new("warp", BlockType::Structure));
  assert_eq!(id, "warp");
  assert!(g.contains_block("warp"));
  assert_eq!(g.block("warp").unwrap().block_type(), BlockType::Structure);
}

#[test]
fn add_block_assigns_fresh_id_when_taken_or_empty() {
  let mut g = PatternGraph::new();
  g.add_block(Block::new("a", BlockType::Pattern));
  let dup = g.add_block(Block::new("a", BlockType::Color));
  let empty = g.add_block(Block::new("", BlockType::Loop));
  assert_ne!(dup, "a");
  assert!(!empty.is_empty());
  assert_eq!(g.block_count(), 3);
  assert_eq!(g.block(&dup).unwrap().block_type(), BlockType::Color);
  assert_eq!(g.block("a").unwrap().block_type(), BlockType::Pattern);
}

#[test]
fn add_block_drops_preset_links() {
  let mut g = PatternGraph::new();
  let b = Block::new("b3", BlockType::Pattern)
    .with_connection(Connection::new("c", ConnectionType::Output).linked_to("ghost", "x"));
  g.add_block(b);
  assert!(!g.block("b3").unwrap().has_links());
  assert!(g.validate());
}

#[test]
fn connect_links_both_sides() {
  let mut g = pattern_and_color();
  assert_eq!(g.connect("b1", "c1", "b2", "c2"), Ok(()));
  let c1 = g.block("b1").unwrap().connection("c1").unwrap();
  let c2 = g.block("b2").unwrap().connection("c2").unwrap();
  assert!(c1.link().unwrap().points_at("b2", "c2"));
  assert!(c2.link().unwrap().points_at("b1", "c1"));
  assert!(g.validate());
  assert_eq!(g.count_connections(), 1);
}

#[test]
fn connect_missing_block() {
  let mut g = pattern_and_color();
  let r = g.connect("b1", "c1", "nope", "c2");
  assert_eq!(
    r,
    Err(ConnectError::NotFound {
      block_id: "nope".to_string(),
      connection_id: None
    })
  );
  assert!(!g.block("b1").unwrap().has_links());
}

#[test]
fn connect_missing_connection() {
  let mut g = pattern_and_color();
  let r = g.connect("b1", "c1", "b2", "c9");
  assert_eq!(
    r,
    Err(ConnectError::NotFound {
      block_id: "b2".to_string(),
      connection_id: Some("c9".to_string())
    })
  );
}

#[test]
fn connect_already_linked_changes_nothing() {
  let mut g = PatternGraph::new();
  g.add_block(block("a", BlockType::Pattern, &[("ca", ConnectionType::Output)]));
  g.add_block(block("b", BlockType::Color, &[("cb", ConnectionType::Input)]));
  g.add_block(block("d", BlockType::Color, &[("cd", ConnectionType::Input)]));
  g.connect("a", "ca", "d", "cd").unwrap();
  let before = g.clone();

  let r = g.connect("a", "ca", "b", "cb");
  assert_eq!(
    r,
    Err(ConnectError::AlreadyLinked {
      block_id: "a".to_string(),
      connection_id: "ca".to_string()
    })
  );
  assert_eq!(g, before);
}

#[test]
fn connect_output_to_output_rejected() {
  let mut g = PatternGraph::new();
  g.add_block(block("a", BlockType::Pattern, &[("c1", ConnectionType::Output)]));
  g.add_block(block("b", BlockType::Color, &[("c2", ConnectionType::Output)]));
  let before = g.clone();
  let r = g.connect("a", "c1", "b", "c2");
  assert_eq!(
    r,
    Err(ConnectError::IncompatibleConnectionType {
      left: ConnectionType::Output,
      right: ConnectionType::Output
    })
  );
  assert_eq!(g, before);
}

#[test]
fn connect_incompatible_block_types_rejected() {
  let mut g = PatternGraph::new();
  g.add_block(block("c", BlockType::Color, &[("o", ConnectionType::Output)]));
  g.add_block(block("col", BlockType::Column, &[("i", ConnectionType::Input)]));
  let r = g.connect("c", "o", "col", "i");
  assert_eq!(
    r,
    Err(ConnectError::IncompatibleBlockType {
      left: BlockType::Color,
      right: BlockType::Column
    })
  );
  assert_eq!(g.count_connections(), 0);
}

#[test]
fn connect_point_to_itself_rejected() {
  let mut g = PatternGraph::new();
  g.add_block(block("p", BlockType::Pattern, &[("x", ConnectionType::Bidirectional)]));
  let r = g.connect("p", "x", "p", "x");
  assert!(matches!(r, Err(ConnectError::IncompatibleBlockType { .. })));
  assert!(!g.block("p").unwrap().has_links());
}

#[test]
fn disconnect_restores_prior_state() {
  let mut g = pattern_and_color();
  let before = g.clone();
  g.connect("b1", "c1", "b2", "c2").unwrap();
  assert!(g.disconnect("b1", "c1", "b2", "c2"));
  assert_eq!(g, before);
  assert_eq!(g.count_connections(), 0);
  assert!(g.validate());
}

#[test]
fn disconnect_accepts_either_order() {
  let mut g = pattern_and_color();
  g.connect("b1", "c1", "b2", "c2").unwrap();
  assert!(g.disconnect("b2", "c2", "b1", "c1"));
  assert!(!g.block("b1").unwrap().has_links());
}

#[test]
fn disconnect_unlinked_returns_false() {
  let mut g = pattern_and_color();
  assert!(!g.disconnect("b1", "c1", "b2", "c2"));
  assert!(!g.disconnect("b1", "c1", "missing", "c2"));
}

#[test]
fn disconnect_wrong_partner_returns_false() {
  let mut g = PatternGraph::new();
  g.add_block(block("a", BlockType::Pattern, &[("o1", ConnectionType::Output), ("o2", ConnectionType::Output)]));
  g.add_block(block("b", BlockType::Color, &[("i", ConnectionType::Input)]));
  g.connect("a", "o1", "b", "i").unwrap();
  let before = g.clone();
  assert!(!g.disconnect("a", "o2", "b", "i"));
  assert_eq!(g, before);
}

#[test]
fn remove_block_clears_links_to_it() {
  let mut g = PatternGraph::new();
  g.add_block(block("p", BlockType::Pattern, &[("a", ConnectionType::Output), ("b", ConnectionType::Output)]));
  g.add_block(block("c", BlockType::Color, &[("i", ConnectionType::Input)]));
  g.add_block(block("l", BlockType::Loop, &[("i", ConnectionType::Input)]));
  g.connect("p", "a", "c", "i").unwrap();
  g.connect("p", "b", "l", "i").unwrap();

  g.remove_block("c");
  assert!(!g.contains_block("c"));
  assert_eq!(g.block_count(), 2);
  assert!(
    g.blocks()
      .iter()
      .flat_map(|b| b.connections())
      .all(|c| c.linked_block_id() != Some("c"))
  );
  assert!(g.block("p").unwrap().connection("b").unwrap().is_linked());
  assert!(g.validate());
  assert_eq!(g.count_connections(), 1);
  assert_eq!(g.block("l").unwrap().id(), "l");
}

#[test]
fn remove_missing_block_is_noop() {
  let mut g = pattern_and_color();
  let before = g.clone();
  g.remove_block("ghost");
  assert_eq!(g, before);
}

#[test]
fn from_blocks_keeps_first_duplicate() {
  let g = PatternGraph::from_blocks(
    vec![
      Block::new("x", BlockType::Pattern),
      Block::new("x", BlockType::Color),
    ],
    Metadata::new(),
  );
  assert_eq!(g.block_count(), 1);
  assert_eq!(g.block("x").unwrap().block_type(), BlockType::Pattern);
}

#[test]
fn metadata_is_free_form() {
  let mut g = PatternGraph::new();
  assert!(g.set_metadata("title", json!("Sika Futuro")).is_none());
  g.metadata_mut().insert("level".to_string(), json!(2));
  assert_eq!(g.metadata()["title"], "Sika Futuro");
  assert_eq!(g.metadata()["level"], 2);
}
