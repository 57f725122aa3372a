//! Map command implementation

use super::{ingest_overrides, load_config, run_ingest};
use crate::cli::MapArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::MapOutput;
use anyhow::{Context, Result};
use chrono::Utc;
use photomap_core::config::parse_center;
use photomap_core::render::{render_map_page, to_feature_collection, MapSettings};
use std::fs;
use std::path::Path;

pub async fn execute(args: MapArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let mut overrides = ingest_overrides(&args.ingest);
    overrides.map_zoom = args.zoom;
    overrides.map_center = args
        .center
        .as_deref()
        .map(parse_center)
        .transpose()
        .context("Invalid --center value")?;

    let config = load_config(config_path, overrides)?;
    let (collection, summary) = run_ingest(&args.ingest, &config, output).await?;

    let records = collection.snapshot();
    let page = render_map_page(&records, &MapSettings::from(&config))
        .context("Failed to render map page")?;
    write_output(&args.output, &page)?;

    if let Some(geojson_path) = &args.geojson {
        let fc = to_feature_collection(&records);
        let json = serde_json::to_string_pretty(&fc).context("Failed to serialize GeoJSON")?;
        write_output(geojson_path, &json)?;
    }

    if output.is_json() {
        output.result(MapOutput {
            output_path: args.output.display().to_string(),
            geojson_path: args.geojson.as_ref().map(|p| p.display().to_string()),
            generated_at: Utc::now(),
            summary: summary.to_output(),
        })?;
    } else {
        summary.display(output);
        println!();
        output.success(format!(
            "Wrote map with {} photos to {}",
            summary.located(),
            args.output.display()
        ));
        if let Some(geojson_path) = &args.geojson {
            output.success(format!("Wrote GeoJSON to {}", geojson_path.display()));
        }
    }

    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        errors::output_not_writable(&path.display().to_string(), &e.to_string()).into()
    })
}
