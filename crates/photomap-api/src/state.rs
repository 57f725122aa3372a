use photomap_core::render::MapSettings;
use photomap_core::{IngestPipeline, PhotoCollection};

use crate::config::ApiConfig;

/// One server process is one session with one photo collection
#[derive(Debug, Clone)]
pub struct AppState {
    pub collection: PhotoCollection,
    pub pipeline: IngestPipeline,
    pub map_settings: MapSettings,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &ApiConfig) -> Self {
        let collection = PhotoCollection::new();
        let pipeline = IngestPipeline::from_config(collection.clone(), &config.photomap);

        Self {
            collection,
            pipeline,
            map_settings: MapSettings::from(&config.photomap),
            max_upload_bytes: config.max_upload_bytes(),
        }
    }
}
