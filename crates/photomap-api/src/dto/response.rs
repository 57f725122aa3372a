use photomap_core::ingest::{DroppedFile, IngestReport};
use photomap_core::render::GalleryEntry;
use serde::Serialize;

/// Upload operation response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Files received in the request
    pub submitted: usize,
    /// Photos from this request that landed on the map
    pub appended: usize,
    /// Photos in the session after this request
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<Vec<DroppedFile>>,
}

impl UploadResponse {
    pub fn from_report(report: IngestReport, total: usize, include_drops: bool) -> Self {
        Self {
            submitted: report.submitted,
            appended: report.appended,
            total,
            dropped: include_drops.then_some(report.dropped),
        }
    }
}

/// A located photo, with its image served separately
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub index: usize,
    pub file_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coordinates: String,
    pub image_url: String,
}

impl From<GalleryEntry> for PhotoResponse {
    fn from(entry: GalleryEntry) -> Self {
        Self {
            image_url: format!("/api/v1/photos/{}/image", entry.index),
            index: entry.index,
            file_name: entry.file_name,
            latitude: entry.latitude,
            longitude: entry.longitude,
            coordinates: entry.coordinates,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "photomap-api",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
