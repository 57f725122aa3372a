use bytes::Bytes;
use photomap_core::ingest::IngestReport;
use photomap_core::models::PhotoSource;

use crate::state::AppState;

/// A file received in a multipart upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

/// Service for ingesting uploaded photos into the session
pub struct IngestService;

impl IngestService {
    /// Run every upload through the pipeline; dropped photos are not errors
    pub async fn ingest_uploads(state: &AppState, uploads: Vec<Upload>) -> IngestReport {
        let sources = uploads
            .into_iter()
            .map(|u| PhotoSource::upload(u.file_name, u.data))
            .collect();

        let report = state.pipeline.ingest(sources).await;

        tracing::info!(
            submitted = report.submitted,
            appended = report.appended,
            total = state.collection.len(),
            "Upload ingested"
        );

        report
    }
}
