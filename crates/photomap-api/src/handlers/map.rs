use std::sync::Arc;

use axum::{extract::State, response::Html};
use photomap_core::render::render_map_page;

use crate::error::ApiError;
use crate::state::AppState;

/// Map page for the current session
pub async fn map_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let records = state.collection.snapshot();
    let page = render_map_page(&records, &state.map_settings)?;
    Ok(Html(page))
}
