use chrono::{DateTime, Utc};
use photomap_core::ingest::{DropKind, DroppedFile};
use photomap_core::models::{Coordinates, RawGeotags};
use serde::Serialize;
use std::collections::BTreeMap;

/// Output for map command
#[derive(Debug, Serialize)]
pub struct MapOutput {
    pub output_path: String,
    pub geojson_path: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub summary: BatchOutput,
}

/// Located vs skipped counts for one ingest batch
#[derive(Debug, Serialize)]
pub struct BatchOutput {
    pub submitted: usize,
    pub located: usize,
    pub skipped: usize,
    pub skipped_by_kind: BTreeMap<String, usize>,
    pub skipped_files: Vec<DroppedFile>,
}

/// Output for gallery command
#[derive(Debug, Serialize)]
pub struct GalleryOutput {
    pub photos: Vec<GalleryItem>,
    pub summary: BatchOutput,
}

#[derive(Debug, Serialize)]
pub struct GalleryItem {
    pub index: usize,
    pub file_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coordinates: String,
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub file_name: String,
    pub mime: Option<String>,
    pub size_bytes: Option<usize>,
    pub dimensions: Option<(u32, u32)>,
    pub tags: Option<RawGeotags>,
    pub latitude_ref_defaulted: bool,
    pub longitude_ref_defaulted: bool,
    pub coordinates: Option<Coordinates>,
    /// Why the pipeline would skip this photo
    pub drop_kind: Option<DropKind>,
    pub reason: Option<String>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: BTreeMap<String, ConfigValue>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    pub value: String,
    pub source: String,
}
