//! Command implementations

mod config;
mod gallery;
mod inspect;
mod map;

use crate::batch::{self, BatchSummary};
use crate::cli::{Cli, Commands, IngestArgs};
use crate::config_loader;
use crate::errors;
use crate::output::OutputWriter;
use crate::progress;
use anyhow::Result;
use photomap_core::config::{CliConfigOverrides, LayeredConfig};
use photomap_core::{IngestPipeline, PhotoCollection};
use std::path::Path;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Map(args) => map::execute(args, config_path, &output).await,
        Commands::Gallery(args) => gallery::execute(args, config_path, &output).await,
        Commands::Inspect(args) => inspect::execute(args, config_path, &output).await,
        Commands::Config => config::execute(config_path, &output),
    }
}

/// Config overrides carried by the shared ingest flags
fn ingest_overrides(args: &IngestArgs) -> CliConfigOverrides {
    CliConfigOverrides {
        max_concurrency: args.max_concurrency,
        timeout_secs: args.timeout_secs,
        verify_decode: args.no_decode.then_some(false),
        ..Default::default()
    }
}

/// Scan the inputs and run them through a fresh collection
async fn run_ingest(
    args: &IngestArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<(PhotoCollection, BatchSummary)> {
    let files = batch::scan_paths(&args.paths, args.recursive)?;
    if files.is_empty() {
        return Err(errors::no_photos_found(args.recursive).into());
    }

    if !output.is_json() {
        let total_bytes: u64 = files.iter().map(|f| f.size).sum();
        output.info(format!("Found {} photos ({} bytes)", files.len(), total_bytes));
    }

    let collection = PhotoCollection::new();
    let pipeline = IngestPipeline::from_config(collection.clone(), config);
    let report =
        progress::ingest_with_progress(pipeline, batch::to_sources(&files), !output.is_json())
            .await;

    Ok((collection, BatchSummary::new(report)))
}

fn load_config(config_path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    config_loader::load_config_with_overrides(config_path, overrides)
}
