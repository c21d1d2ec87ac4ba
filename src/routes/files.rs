use axum::extract::State;
use axum::Json;

use crate::models::file::FileRecord;
use crate::services::listing_service;
use crate::state::AppState;

pub async fn list_files(State(state): State<AppState>) -> Json<Vec<FileRecord>> {
    Json(listing_service::list_available_files(&state).await)
}
