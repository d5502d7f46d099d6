//! Tests for the JSON contract.

use serde_json::json;

use crate::error::LoadError;
use crate::pattern_graph::PatternGraph;
use crate::types::{Block, BlockType, Connection, ConnectionType};

fn saved() -> serde_json::Value {
  json!({
    "blocks": [
      {
        "id": "b1",
        "type": "pattern",
        "properties": {"patternType": "nkyinkyim", "rotation": 90},
        "connections": [
          {"id": "c1", "type": "output", "connectedToId": "b2", "connectedToPointId": "c2"}
        ]
      },
      {
        "id": "b2",
        "type": "color",
        "properties": {"color": "gold"},
        "connections": [
          {"id": "c2", "type": "input", "connectedToId": "b1", "connectedToPointId": "c1"}
        ]
      }
    ],
    "metadata": {"title": "Wofro Dua Pa A", "author": {"name": "Ama"}}
  })
}

fn malformed(value: serde_json::Value) -> String {
  match PatternGraph::from_value(value) {
    Err(LoadError::MalformedSerialization(msg)) => msg,
    other => panic!("expected MalformedSerialization, got {:?}", other),
  }
}

#[test]
fn load_saved_pattern() {
  let g = PatternGraph::from_value(saved()).unwrap();
  assert_eq!(g.block_count(), 2);
  assert!(g.validate());
  assert!(g.is_valid_pattern());
  assert_eq!(g.count_connections(), 1);
  assert_eq!(g.block("b1").unwrap().properties().pattern_type(), Some("nkyinkyim"));
  assert_eq!(g.metadata()["title"], "Wofro Dua Pa A");
}

#[test]
fn save_preserves_every_field() {
  let g = PatternGraph::from_value(saved()).unwrap();
  assert_eq!(g.to_value().unwrap(), saved());
}

#[test]
fn save_preserves_null_properties() {
  let input = json!({
    "blocks": [
      {"id": "p", "type": "pattern", "properties": {"patternType": null, "size": 2}, "connections": []},
      {"id": "c", "type": "color", "properties": {"color": null}, "connections": []},
      {"id": "l", "type": "loop", "properties": {"count": null}, "connections": []}
    ],
    "metadata": {}
  });
  let g = PatternGraph::from_value(input.clone()).unwrap();
  assert_eq!(g.to_value().unwrap(), input);
}

#[test]
fn json_text_round_trip() {
  let g = PatternGraph::from_value(saved()).unwrap();
  let text = g.to_json_pretty().unwrap();
  let back = PatternGraph::from_json(&text).unwrap();
  assert_eq!(back, g);
}

#[test]
fn built_graph_serializes_nulls_for_open_points() {
  let mut g = PatternGraph::new();
  g.add_block(Block::new("b", BlockType::Structure).with_connection(Connection::new("x", ConnectionType::Input)));
  assert_eq!(
    g.to_value().unwrap(),
    json!({
      "blocks": [{
        "id": "b",
        "type": "structure",
        "properties": {},
        "connections": [{"id": "x", "type": "input", "connectedToId": null, "connectedToPointId": null}]
      }],
      "metadata": {}
    })
  );
}

#[test]
fn absent_optional_sections_default() {
  let g = PatternGraph::from_json(r#"{"blocks": [{"id": "a", "type": "row"}]}"#).unwrap();
  assert_eq!(g.block_count(), 1);
  assert!(g.metadata().is_empty());
}

#[test]
fn invalid_json_is_malformed() {
  assert!(matches!(
    PatternGraph::from_json("{not json"),
    Err(LoadError::MalformedSerialization(_))
  ));
}

#[test]
fn missing_blocks_is_malformed() {
  malformed(json!({"metadata": {}}));
}

#[test]
fn missing_block_type_is_malformed() {
  malformed(json!({"blocks": [{"id": "a"}]}));
}

#[test]
fn unknown_block_type_is_malformed() {
  let msg = malformed(json!({"blocks": [{"id": "a", "type": "loom"}]}));
  assert!(msg.contains("loom"), "{}", msg);
}

#[test]
fn duplicate_block_ids_are_malformed() {
  let msg = malformed(json!({"blocks": [
    {"id": "a", "type": "pattern"},
    {"id": "a", "type": "color"}
  ]}));
  assert!(msg.contains("duplicate block id"));
}

#[test]
fn one_sided_fields_are_malformed() {
  let mut v = saved();
  v["blocks"][0]["connections"][0]["connectedToPointId"] = json!(null);
  malformed(v);
}

#[test]
fn one_way_link_is_malformed() {
  let mut v = saved();
  v["blocks"][1]["connections"][0]["connectedToId"] = json!(null);
  v["blocks"][1]["connections"][0]["connectedToPointId"] = json!(null);
  let msg = malformed(v);
  assert!(msg.contains("reciprocal"), "{}", msg);
}

#[test]
fn dangling_link_is_malformed() {
  let mut v = saved();
  v["blocks"][0]["connections"][0]["connectedToId"] = json!("ghost");
  malformed(v);
}

#[test]
fn incompatible_types_load_but_do_not_validate() {
  let mut v = saved();
  v["blocks"][1]["connections"][0]["type"] = json!("output");
  let g = PatternGraph::from_value(v).unwrap();
  assert!(!g.validate());
}

#[test]
fn serde_deserialize_applies_the_same_checks() {
  let mut v = saved();
  v["blocks"][0]["connections"][0]["connectedToId"] = json!("ghost");
  assert!(serde_json::from_value::<PatternGraph>(v).is_err());
  assert!(serde_json::from_value::<PatternGraph>(saved()).is_ok());
}
