//! Inspect command implementation

use super::load_config;
use crate::batch::describe;
use crate::cli::InspectArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::InspectOutput;
use crate::progress::create_spinner;
use anyhow::Result;
use photomap_core::config::CliConfigOverrides;
use photomap_core::ingest::{DropKind, Inspection};
use photomap_core::models::{Dms, HemisphereRef, PhotoSource};
use photomap_core::{IngestPipeline, PhotoCollection};
use std::path::Path;

pub async fn execute(args: InspectArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    if !args.file.is_file() {
        return Err(errors::input_not_found(&args.file.display().to_string()).into());
    }

    let config = load_config(config_path, CliConfigOverrides::default())?;
    let pipeline = IngestPipeline::from_config(PhotoCollection::new(), &config);
    let source = PhotoSource::from_path(&args.file);

    let spinner = (!output.is_json()).then(|| create_spinner("Reading photo..."));
    let result = pipeline.inspect(&source).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let inspect_output = match result {
        Ok(inspection) => located_output(inspection),
        Err(err) => InspectOutput {
            file_name: source.file_name(),
            mime: None,
            size_bytes: None,
            dimensions: None,
            tags: None,
            latitude_ref_defaulted: false,
            longitude_ref_defaulted: false,
            coordinates: None,
            drop_kind: Some(DropKind::from_error(&err)),
            reason: Some(err.to_string()),
        },
    };

    if output.is_json() {
        output.result(inspect_output)?;
    } else {
        display(&inspect_output, output);
    }

    Ok(())
}

fn located_output(inspection: Inspection) -> InspectOutput {
    let tags = inspection.tags;

    InspectOutput {
        file_name: inspection.file_name,
        mime: Some(inspection.mime),
        size_bytes: Some(inspection.size_bytes),
        dimensions: inspection.dimensions,
        latitude_ref_defaulted: tags.latitude_ref.is_none(),
        longitude_ref_defaulted: tags.longitude_ref.is_none(),
        coordinates: inspection.coordinates,
        drop_kind: inspection.drop_kind,
        reason: inspection.reason,
        tags: Some(tags),
    }
}

fn display(inspection: &InspectOutput, output: &OutputWriter) {
    output.section(format!("Photo: {}", inspection.file_name));

    if let Some(mime) = &inspection.mime {
        output.kv("Type", mime);
    }
    if let Some(size) = inspection.size_bytes {
        output.kv("Size", format!("{} bytes", size));
    }
    if let Some((width, height)) = inspection.dimensions {
        output.kv("Dimensions", format!("{} x {}", width, height));
    }

    if let Some(tags) = &inspection.tags {
        output.section("GPS Tags");
        output.kv("Latitude", format_dms(tags.latitude.as_ref()));
        output.kv(
            "Latitude Ref",
            format_reference(tags.latitude_ref_or_default(), inspection.latitude_ref_defaulted),
        );
        output.kv("Longitude", format_dms(tags.longitude.as_ref()));
        output.kv(
            "Longitude Ref",
            format_reference(tags.longitude_ref_or_default(), inspection.longitude_ref_defaulted),
        );
    }

    match (&inspection.coordinates, &inspection.drop_kind) {
        (Some(coords), _) => {
            output.section("Decimal Coordinates");
            output.kv("Latitude", format!("{:.6}", coords.latitude));
            output.kv("Longitude", format!("{:.6}", coords.longitude));
            println!();
            output.success("This photo would appear on the map");
        }
        (None, Some(kind)) => {
            println!();
            let reason = inspection.reason.as_deref().unwrap_or(kind.as_str());
            output.warning(format!("Skipped: {} ({})", describe(*kind), reason));
        }
        (None, None) => {}
    }
}

fn format_dms(dms: Option<&Dms>) -> String {
    dms.map(|d| d.to_string()).unwrap_or_else(|| "(missing)".to_string())
}

fn format_reference(reference: HemisphereRef, defaulted: bool) -> String {
    if defaulted {
        format!("{} (default)", reference)
    } else {
        reference.to_string()
    }
}
