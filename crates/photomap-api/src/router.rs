use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Map page
        .route("/", get(handlers::map_page))
        // Photos
        .route("/api/v1/photos", post(handlers::upload_photos).get(handlers::list_photos))
        .route("/api/v1/photos/geojson", get(handlers::photos_geojson))
        .route("/api/v1/photos/{index}/image", get(handlers::photo_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
