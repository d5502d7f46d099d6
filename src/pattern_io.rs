//! Save/load a pattern graph as a JSON file.

use std::path::Path;

use tracing::instrument;

use crate::error::LoadError;
use crate::pattern_graph::PatternGraph;

/// Extension used for saved pattern files.
pub const PATTERN_FILE_EXTENSION: &str = "kente.json";

/// Saves `graph` to `path` as pretty JSON, creating the parent directory if needed.
#[instrument(level = "trace", skip(path, graph))]
pub fn save_pattern(path: &Path, graph: &PatternGraph) -> Result<(), std::io::Error> {
  let json = graph
    .to_json_pretty()
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a pattern from `path`. Fails if the file is missing or its content is malformed.
#[instrument(level = "trace", skip(path))]
pub fn load_pattern(path: &Path) -> Result<PatternGraph, LoadError> {
  let text = std::fs::read_to_string(path)?;
  PatternGraph::from_json(&text)
}
