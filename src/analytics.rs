//! Read-only analytics over a pattern graph: link counting, reachability,
//! cycles, and the composition heuristics consumed by challenge and
//! commentary layers.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use serde_json::{Value, json};

use crate::pattern_graph::PatternGraph;
use crate::types::{BlockId, BlockType, Metadata, PatternStyle};

impl PatternGraph {
  /// Number of distinct linked pairs; a pair is counted once, not once per side.
  pub fn count_connections(&self) -> usize {
    let mut pairs = HashSet::new();
    for block in &self.blocks {
      for point in block.connections() {
        let Some(link) = point.link() else {
          continue;
        };
        let here = (block.id(), point.id());
        let there = (link.block_id.as_str(), link.connection_id.as_str());
        pairs.insert(if here <= there { (here, there) } else { (there, here) });
      }
    }
    pairs.len()
  }

  /// Every block reachable from `seed_id` following links in either direction,
  /// the seed included. Empty if the seed does not exist.
  pub fn find_connected_blocks(&self, seed_id: &str) -> HashSet<BlockId> {
    let Some(&seed) = self.index.get(seed_id) else {
      return HashSet::new();
    };
    let adjacency = self.undirected_adjacency();
    let mut seen = vec![false; self.blocks.len()];
    let mut queue = VecDeque::from([seed]);
    seen[seed] = true;
    while let Some(i) = queue.pop_front() {
      for &next in &adjacency[i] {
        if !seen[next] {
          seen[next] = true;
          queue.push_back(next);
        }
      }
    }
    seen
      .iter()
      .enumerate()
      .filter(|&(_, &s)| s)
      .map(|(i, _)| self.blocks[i].id().to_string())
      .collect()
  }

  /// Cycles of the undirected link graph.
  ///
  /// A depth-first walk is started from every block; reaching a block already on
  /// the current path (other than the one just left) records the path from that
  /// block onward. The same cycle is reported once per starting block, possibly
  /// rotated or reversed.
  pub fn find_cycles(&self) -> Vec<Vec<BlockId>> {
    let adjacency = self.undirected_adjacency();
    let n = self.blocks.len();
    let mut cycles: Vec<Vec<BlockId>> = Vec::new();

    for root in 0..n {
      let mut visited = vec![false; n];
      let mut on_path = vec![false; n];
      let mut path = vec![root];
      // (block, parent, index of the next neighbour to try)
      let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
      visited[root] = true;
      on_path[root] = true;

      while let Some(&(node, parent, next)) = stack.last() {
        let Some(&neighbour) = adjacency[node].get(next) else {
          stack.pop();
          path.pop();
          on_path[node] = false;
          continue;
        };
        if let Some(top) = stack.last_mut() {
          top.2 += 1;
        }
        if Some(neighbour) == parent {
          continue;
        }
        if on_path[neighbour] {
          if let Some(start) = path.iter().position(|&p| p == neighbour) {
            cycles.push(
              path[start..]
                .iter()
                .map(|&i| self.blocks[i].id().to_string())
                .collect(),
            );
          }
        } else if !visited[neighbour] {
          visited[neighbour] = true;
          on_path[neighbour] = true;
          path.push(neighbour);
          stack.push((neighbour, Some(node), 0));
        }
      }
    }
    cycles
  }

  /// Rough difficulty from block count: ≤3 → 1, ≤6 → 2, ≤10 → 3, ≤15 → 4, else 5.
  pub fn complexity_score(&self) -> u8 {
    match self.blocks.len() {
      0..=3 => 1,
      4..=6 => 2,
      7..=10 => 3,
      11..=15 => 4,
      _ => 5,
    }
  }

  /// Style tag, first matching rule wins: mostly pattern blocks → traditional,
  /// any loop → repetition, any column → structured, more than a third color
  /// blocks → colorful, otherwise basic.
  pub fn pattern_style(&self) -> PatternStyle {
    let total = self.blocks.len();
    let counts = self.block_type_counts();
    let count = |t: BlockType| counts.get(&t).copied().unwrap_or(0);

    if count(BlockType::Pattern) * 2 > total {
      PatternStyle::Traditional
    } else if count(BlockType::Loop) > 0 {
      PatternStyle::Repetition
    } else if count(BlockType::Column) > 0 {
      PatternStyle::Structured
    } else if count(BlockType::Color) * 3 > total {
      PatternStyle::Colorful
    } else {
      PatternStyle::Basic
    }
  }

  /// Even number of blocks overall and of every block type present.
  ///
  /// Composition only; the shape of the link graph is not inspected. An empty
  /// graph has zero of everything and so counts as symmetric.
  pub fn is_symmetric(&self) -> bool {
    self.blocks.len() % 2 == 0
      && self.block_type_counts().values().all(|c| c % 2 == 0)
  }

  /// Summary for cultural commentary collaborators: distinct motifs and colors,
  /// complexity, style, link count, symmetry and whether the pattern repeats.
  pub fn extract_cultural_context(&self) -> Metadata {
    let patterns: BTreeSet<&str> = self
      .blocks
      .iter()
      .filter(|b| b.block_type() == BlockType::Pattern)
      .filter_map(|b| b.properties().pattern_type())
      .collect();
    let colors: BTreeSet<&str> = self
      .blocks
      .iter()
      .filter(|b| b.block_type() == BlockType::Color)
      .filter_map(|b| b.properties().color())
      .collect();

    let mut context = Metadata::new();
    context.insert("patterns".to_string(), json!(patterns));
    context.insert("colors".to_string(), json!(colors));
    context.insert("complexity".to_string(), json!(self.complexity_score()));
    context.insert("style".to_string(), json!(self.pattern_style()));
    context.insert("connectionCount".to_string(), json!(self.count_connections()));
    context.insert("isSymmetric".to_string(), Value::Bool(self.is_symmetric()));
    context.insert(
      "hasLoops".to_string(),
      Value::Bool(self.blocks.iter().any(|b| b.block_type() == BlockType::Loop)),
    );
    context
  }

  pub(crate) fn block_type_counts(&self) -> BTreeMap<BlockType, usize> {
    let mut counts = BTreeMap::new();
    for b in &self.blocks {
      *counts.entry(b.block_type()).or_insert(0) += 1;
    }
    counts
  }

  /// Neighbour lists by arena index, following links both ways. Links to
  /// missing blocks and self-links are skipped; each neighbour appears once,
  /// in first-seen order.
  pub(crate) fn undirected_adjacency(&self) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.blocks.len()];
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for (i, block) in self.blocks.iter().enumerate() {
      for target in block.connections().iter().filter_map(|c| c.linked_block_id()) {
        let Some(&j) = self.index.get(target) else {
          continue;
        };
        if i == j {
          continue;
        }
        for (from, to) in [(i, j), (j, i)] {
          if seen.insert((from, to)) {
            adjacency[from].push(to);
          }
        }
      }
    }
    adjacency
  }
}
