//! CLI: analyse a branching story from its edge list and node attributes.
//!
//! Usage: `storystructure [OPTIONS] --edges <edgelist.csv>`
//! Example: storystructure --edges data/edgelist.csv --nodes data/nodeAttributes.csv \
//!   --simplify --stats allPaths.dat --cluster 0.2 --seed 1 --figure clustered.png
//!
//! Path statistics go to the `--stats` file, the summary to stdout, and every
//! reportable condition (cycles, unclassified endings, unknown labels) to stderr.
//!
//! Set RUST_LOG=storystructure=debug for per-path events.

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;
use std::process;
use storystructure::dot_writer::{DEFAULT_GRAPH_NAME, DotOptions};
use storystructure::render::DEFAULT_DOT_CMD;
use storystructure::{EnumerationOptions, StoryError, StoryStructure};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Analyse the structure of a branching story.
#[derive(Parser, Debug)]
#[command(name = "storystructure")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  STORYSTRUCTURE_SEED      Seed for the random choice made when two paths are merged.
  STORYSTRUCTURE_DOT_CMD   Graphviz layout binary used for --figure (default: dot).

Examples:
  storystructure --edges edgelist.csv --nodes nodeAttributes.csv --stats allPaths.dat
  storystructure --edges edgelist.csv --nodes nodeAttributes.csv --cluster 0.2 --dot clustered.dot"#
)]
struct Args {
  /// Edge table (CSV with `source,target` header)
  #[arg(long, value_name = "CSV")]
  edges: PathBuf,

  /// Node attribute table (CSV with `node,attribute` header)
  #[arg(long, value_name = "CSV")]
  nodes: Option<PathBuf>,

  /// Story title
  #[arg(long, default_value = "my story")]
  title: String,

  /// Remove duplicate edges and self-loops before building the graph
  #[arg(long)]
  simplify: bool,

  /// Start node. Default: the smallest root
  #[arg(long, value_name = "ID")]
  root: Option<String>,

  /// Write one statistics line per path to this file
  #[arg(long, value_name = "FILE")]
  stats: Option<PathBuf>,

  /// Prune descents longer than this many nodes
  #[arg(long, value_name = "N")]
  max_depth: Option<usize>,

  /// Cluster paths whose Jaccard distance is at most this threshold, then
  /// replace the edge list with the surviving paths
  #[arg(long, value_name = "THRESHOLD")]
  cluster: Option<f64>,

  /// Seed for clustering. Overridden by STORYSTRUCTURE_SEED if set
  #[arg(long)]
  seed: Option<u64>,

  /// Write the graph description to this file
  #[arg(long, value_name = "FILE")]
  dot: Option<PathBuf>,

  /// Graph name used in the description
  #[arg(long, default_value = DEFAULT_GRAPH_NAME)]
  graph_name: String,

  /// Leave attributed nodes without edges out of the description
  #[arg(long)]
  skip_isolated: bool,

  /// Render a figure (format from the extension); the description is written next to it
  #[arg(long, value_name = "FILE")]
  figure: Option<PathBuf>,

  /// Graphviz layout binary. Overridden by STORYSTRUCTURE_DOT_CMD if set
  #[arg(long, value_name = "CMD", default_value = DEFAULT_DOT_CMD)]
  dot_cmd: String,
}

fn run(args: &Args) -> Result<(), StoryError> {
  // Env vars override flags.
  let seed = env::var("STORYSTRUCTURE_SEED")
    .ok()
    .and_then(|s| s.parse().ok())
    .or(args.seed);
  let dot_cmd = env::var("STORYSTRUCTURE_DOT_CMD").unwrap_or_else(|_| args.dot_cmd.clone());
  info!(seed = ?seed, dot_cmd = %dot_cmd, "options (env or flags)");

  let mut story = StoryStructure::new(args.title.clone());
  story.load_story(Some(args.edges.as_path()), args.nodes.as_deref())?;

  let duplicates = story.duplicates().len();
  let self_loops = story.self_loops().len();
  if args.simplify {
    story.simplify();
  }
  let default_root = story.make_graph()?;
  println!("Nodes: {}", story.graph.len());
  println!(
    "Roots: {}",
    story
      .start()
      .iter()
      .map(|r| r.to_string())
      .collect::<Vec<_>>()
      .join(", ")
  );
  println!("Duplicate edges: {}", duplicates);
  println!("Self loops: {}", self_loops);

  let root = args.root.as_deref().map(|raw| story.graph.id_for(raw));
  let enumerated = root.is_some() || default_root.is_some();
  if enumerated {
    let options = EnumerationOptions {
      max_depth: args.max_depth,
    };
    let reports = match &args.stats {
      Some(path) => story.save_path_stats(path, root, options)?,
      None => story.enumerate_paths(root, options)?,
    };
    println!("Paths: {}", story.paths.len());
    println!(
      "Reports: {}",
      reports.len() + story.attributes.unknown().len()
    );
  } else {
    println!("Paths: 0 (no root)");
  }

  if let Some(threshold) = args.cluster {
    // Projecting an empty path set would wipe the edge table.
    if !enumerated {
      return Err(StoryError::NoRoot);
    }
    let mut rng = match seed {
      Some(s) => StdRng::seed_from_u64(s),
      None => StdRng::from_entropy(),
    };
    let outcome = story.iterative_cluster_paths(threshold, &mut rng)?;
    story.paths_to_edgelist()?;
    println!(
      "Clustered paths: {} ({} passes)",
      story.paths.len(),
      outcome.passes
    );
  }

  let dot_options = DotOptions {
    skip_isolated: args.skip_isolated,
  };
  if let Some(path) = &args.dot {
    story.save_dot(path, &args.graph_name, dot_options)?;
    println!("Graph description: {}", path.display());
  }
  if let Some(path) = &args.figure {
    story.save_fig(path, &args.graph_name, &dot_cmd, dot_options)?;
    println!("Figure: {}", path.display());
  }
  Ok(())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  info!(edges = %args.edges.display(), "storystructure starting");

  if let Err(e) = run(&args) {
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}
