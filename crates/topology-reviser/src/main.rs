//! # Topology Reviser
//!
//! Batch CLI: loads per-subsystem JSON records and an optional polygon
//! catalog file, runs the revision core (C1-C6) once over the assembled
//! graph, and writes the revised buffer/transporter graph to a sink.
//!
//! The revision core is single-threaded and batch by design — there is
//! no event loop here, just a straight-line pipeline that runs to
//! completion and exits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grid_ingest::SubsystemInput;
use grid_revise::RevisedGraph;
use topology_reviser::catalog_io::load_region_catalogs;
use topology_reviser::config::ReviserConfig;
use topology_reviser::emit::{GraphSink, JsonGraphSink};

/// Revises per-subsystem geospatial infrastructure descriptions into one
/// consistent buffer/transporter graph.
#[derive(Parser, Debug)]
#[command(name = "topology-reviser")]
#[command(about = "Clusters, snaps, and renames a multi-energy infrastructure graph")]
struct Args {
    /// Path to a TOML config file. Overrides built-in defaults; CLI flags
    /// below override the config file in turn.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// One JSON-encoded `SubsystemInput` per occurrence, assembled by C1
    /// in the order given. Overrides `input.subsystem_files` from config.
    #[arg(short, long = "subsystem")]
    subsystem_files: Vec<PathBuf>,

    /// Polygon catalog JSON file for C6 region/ISO attribution. Overrides
    /// `input.catalog_file` from config.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Where to write the revised graph. Overrides `output.path`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level filter, e.g. `info`, `debug`, `topology_reviser=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReviserConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ReviserConfig::default(),
    };

    if !args.subsystem_files.is_empty() {
        config.input.subsystem_files = args
            .subsystem_files
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
    }
    if let Some(catalog) = &args.catalog {
        config.input.catalog_file = Some(catalog.to_string_lossy().to_string());
    }
    if let Some(output) = &args.output {
        config.output.path = output.to_string_lossy().to_string();
    }
    let log_level = args.log_level.as_deref().unwrap_or(&config.logging.level);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!(
        subsystems = config.input.subsystem_files.len(),
        output = %config.output.path,
        "starting topology revision"
    );

    let inputs = load_subsystem_inputs(&config.input.subsystem_files)?;
    let catalog_path = config.input.catalog_file.as_ref().map(PathBuf::from);
    let catalogs = load_region_catalogs(catalog_path.as_deref().map(Path::new))
        .context("loading region catalogs")?;

    let graph = grid_revise::revise(&inputs, &catalogs).context("revision pipeline failed")?;
    report_summary(&graph);

    let sink = JsonGraphSink::new(config.output.path.clone(), config.output.pretty);
    sink.emit(&graph).context("writing revised graph")?;

    info!(path = %config.output.path, "revised graph written");
    Ok(())
}

fn load_subsystem_inputs(paths: &[String]) -> Result<Vec<SubsystemInput>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading subsystem input {path}"))?;
        let input: SubsystemInput =
            serde_json::from_str(&text).with_context(|| format!("parsing subsystem input {path}"))?;
        inputs.push(input);
    }
    Ok(inputs)
}

fn report_summary(graph: &RevisedGraph) {
    info!(
        buffers = graph.buffers.len(),
        transporters = graph.transporters.len(),
        controllers = graph.controllers.len(),
        "revision complete"
    );
    if !graph.stranded_oil_plants.is_empty() {
        warn!(
            plants = ?graph.stranded_oil_plants,
            "oil plants remain stranded outside the rescue radius"
        );
    }
}
