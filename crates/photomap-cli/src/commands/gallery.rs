//! Gallery command implementation

use super::{ingest_overrides, load_config, run_ingest};
use crate::cli::GalleryArgs;
use crate::output::OutputWriter;
use crate::output_types::{GalleryItem, GalleryOutput};
use anyhow::Result;
use photomap_core::render::format_coordinates;
use std::path::Path;
use tabled::Tabled;

#[derive(Tabled)]
struct GalleryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    file_name: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
}

pub async fn execute(
    args: GalleryArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let config = load_config(config_path, ingest_overrides(&args.ingest))?;
    let (collection, summary) = run_ingest(&args.ingest, &config, output).await?;
    let records = collection.snapshot();

    if output.is_json() {
        let photos = records
            .iter()
            .enumerate()
            .map(|(index, r)| GalleryItem {
                index,
                file_name: r.file_name.clone(),
                latitude: r.latitude,
                longitude: r.longitude,
                coordinates: format_coordinates(r.latitude, r.longitude),
            })
            .collect();

        output.result(GalleryOutput {
            photos,
            summary: summary.to_output(),
        })?;
    } else {
        output.section("Located Photos");

        let rows: Vec<GalleryRow> = records
            .iter()
            .enumerate()
            .map(|(index, r)| GalleryRow {
                index,
                file_name: r.file_name.clone(),
                latitude: format!("{:.5}", r.latitude),
                longitude: format!("{:.5}", r.longitude),
            })
            .collect();

        output.table(rows);
        summary.display(output);
    }

    Ok(())
}
