//! Grapheval CLI
//!
//! Evaluates a predicted RDF graph against a gold-standard graph and prints
//! the metric report as pretty JSON on stdout. The predicted graph comes
//! from `--pred-graph` or, when omitted, from stdin; the ontology used for
//! hierarchy scoring is named by the configuration file.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use grapheval_metrics::{compute_metrics, EvalConfig, EvalMode, ExtractionCache, FsExtractionCache};
use grapheval_rdf::{detect_format, Graph, RdfFormat};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grapheval")]
#[command(author, version, about = "Evaluate RDF graphs against a gold standard")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Path to the gold standard RDF graph file.
    #[arg(long)]
    gold_graph: PathBuf,

    /// Path to the predicted mapping file; an empty file marks the mapping
    /// as invalid and suppresses all metrics.
    #[arg(long)]
    pred_mapping: PathBuf,

    /// Path to the predicted RDF graph file. Read from stdin when omitted.
    #[arg(long)]
    pred_graph: Option<PathBuf>,

    /// Evaluate only the ontology-free common metrics.
    #[arg(long, conflicts_with = "only_in_domain")]
    only_common: bool,

    /// Evaluate only the domain and hierarchy metrics.
    #[arg(long, conflicts_with = "only_common")]
    only_in_domain: bool,
}

impl Cli {
    fn mode(&self) -> EvalMode {
        if self.only_common {
            EvalMode::Common
        } else if self.only_in_domain {
            EvalMode::InDomain
        } else {
            EvalMode::All
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_data = fs::read_to_string(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;
    let config: EvalConfig =
        serde_json::from_str(&config_data).context("parsing configuration")?;

    let gold_graph = Graph::parse_file(&cli.gold_graph)
        .with_context(|| format!("parsing gold graph {}", cli.gold_graph.display()))?;
    let pred_graph = load_pred_graph(cli.pred_graph.as_deref())?;

    let mapping = fs::read_to_string(&cli.pred_mapping)
        .with_context(|| format!("reading mapping {}", cli.pred_mapping.display()))?;
    let mapping_valid = !mapping.trim().is_empty();

    let ontology_graph = match &config.ontology_file {
        Some(path) => Some(
            Graph::parse_file(path)
                .with_context(|| format!("parsing ontology {}", path.display()))?,
        ),
        None => None,
    };

    // Schema extraction results are cached next to the ontology file.
    let cache = config
        .ontology_file
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| FsExtractionCache::new(dir.join(".grapheval_cache")));

    let report = compute_metrics(
        &gold_graph,
        &pred_graph,
        ontology_graph.as_ref(),
        &config,
        cache.as_ref().map(|c| c as &dyn ExtractionCache),
        mapping_valid,
        cli.mode(),
    )?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_pred_graph(path: Option<&Path>) -> Result<Graph> {
    match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("reading predicted graph {}", path.display()))?;
            Graph::parse_str(&data, detect_format(path))
                .with_context(|| format!("parsing predicted graph {}", path.display()))
        }
        None => {
            let mut data = String::new();
            std::io::stdin()
                .read_to_string(&mut data)
                .context("reading predicted graph from stdin")?;
            Graph::parse_str(&data, RdfFormat::Turtle)
                .context("parsing predicted graph from stdin")
        }
    }
}
