use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use geojson::FeatureCollection;
use photomap_core::render::{gallery, to_feature_collection};

use crate::dto::{PhotoResponse, UploadQuery, UploadResponse};
use crate::error::ApiError;
use crate::services::{IngestService, Upload};
use crate::state::AppState;

pub async fn upload_photos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    tracing::info!("Processing photo upload");

    let uploads = extract_files(&mut multipart).await?;

    tracing::info!(files = uploads.len(), "Received photos for ingestion");

    let report = IngestService::ingest_uploads(&state, uploads).await;
    let total = state.collection.len();

    Ok(Json(UploadResponse::from_report(report, total, query.report)))
}

pub async fn list_photos(State(state): State<Arc<AppState>>) -> Json<Vec<PhotoResponse>> {
    let records = state.collection.snapshot();
    Json(gallery(&records).into_iter().map(PhotoResponse::from).collect())
}

pub async fn photos_geojson(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let records = state.collection.snapshot();
    Json(to_feature_collection(&records))
}

pub async fn photo_image(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .collection
        .get(index)
        .ok_or_else(|| ApiError::not_found(format!("No photo at index {}", index)))?;

    Ok(([(header::CONTENT_TYPE, record.mime)], record.image_data))
}

/// Every field carrying a file name is a photo
async fn extract_files(multipart: &mut Multipart) -> Result<Vec<Upload>, ApiError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(|e| {
            ApiError::bad_request("Failed to read file data").with_details(e.to_string())
        })?;

        uploads.push(Upload { file_name, data });
    }

    if uploads.is_empty() {
        return Err(ApiError::bad_request("No files provided")
            .with_details("Expected one or more file fields in the multipart form"));
    }

    Ok(uploads)
}
