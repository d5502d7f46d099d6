//! CLI: Check a saved Kente pattern file.
//!
//! Loads the pattern, validates its links, applies the acceptance rules and
//! prints the analytics a challenge would look at.
//!
//! Usage: `pattern_check [OPTIONS] <pattern.json>`
//! Example: pattern_check --context saved/adwinasa.kente.json
//!
//! Exit status is 1 if the file cannot be loaded or the pattern is not valid.
//!
//! Set RUST_LOG=kente_pattern_graph=trace for span enter/exit and events.

use clap::Parser;
use kente_pattern_graph::config::{ANCHOR_TYPE_ENV, MIN_BLOCKS_ENV};
use kente_pattern_graph::{BlockType, PatternRules, load_pattern};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Check a saved Kente pattern file.
#[derive(Parser, Debug)]
#[command(name = "pattern_check")]
#[command(
  after_help = r#"Environment variables (override --anchor-type and --min-blocks when set):
  KENTE_ANCHOR_TYPE   Block type a complete pattern must contain (default: pattern).
  KENTE_MIN_BLOCKS    Minimum number of blocks in a complete pattern (default: 2).

Examples:
  pattern_check saved/adwinasa.kente.json
  pattern_check --anchor-type structure --context saved/adwinasa.kente.json"#
)]
struct Args {
  /// Block type a complete pattern must contain. Overridden by KENTE_ANCHOR_TYPE if set.
  #[arg(long, value_name = "TYPE", default_value = "pattern")]
  anchor_type: BlockType,

  /// Minimum number of blocks. Overridden by KENTE_MIN_BLOCKS if set.
  #[arg(long, value_name = "N", default_value_t = 2)]
  min_blocks: usize,

  /// Also print the cultural context summary as JSON.
  #[arg(long)]
  context: bool,

  /// Path to the saved pattern file
  #[arg(value_name = "pattern.json")]
  pattern_path: PathBuf,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env vars override flags.
  let rules = PatternRules {
    anchor_type: args.anchor_type,
    min_blocks: args.min_blocks,
  }
  .with_overrides(
    env::var(ANCHOR_TYPE_ENV).ok().as_deref(),
    env::var(MIN_BLOCKS_ENV).ok().as_deref(),
  );
  info!(anchor = %rules.anchor_type, min_blocks = rules.min_blocks, path = %args.pattern_path.display(), "pattern_check starting");

  let graph = match load_pattern(&args.pattern_path) {
    Ok(g) => g.with_rules(rules),
    Err(e) => {
      eprintln!("Error loading {}: {}", args.pattern_path.display(), e);
      process::exit(1);
    }
  };

  let structurally_valid = graph.validate();
  let valid_pattern = graph.is_valid_pattern();
  info!(structurally_valid, valid_pattern, "pattern checked");

  println!("Pattern checked.");
  println!("  Blocks: {}", graph.block_count());
  println!("  Connections: {}", graph.count_connections());
  println!("  Links valid: {}", structurally_valid);
  for issue in graph.link_issues() {
    println!("    - {}", issue);
  }
  println!("  Valid pattern: {}", valid_pattern);
  println!("  Complexity: {}", graph.complexity_score());
  println!("  Style: {}", graph.pattern_style());
  println!("  Symmetric: {}", graph.is_symmetric());
  println!("  Cycles: {}", graph.find_cycles().len());

  if args.context {
    match serde_json::to_string_pretty(&graph.extract_cultural_context()) {
      Ok(json) => println!("{}", json),
      Err(e) => {
        eprintln!("Error encoding context: {}", e);
        process::exit(1);
      }
    }
  }

  if !valid_pattern {
    process::exit(1);
  }
}
