pub mod files;
pub mod health;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_size as usize;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let x_request_id = http::HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(files::list_files))
        .route("/test", get(health::hello).post(health::hello_post))
        .route("/health", get(health::health))
        .route("/status", get(health::status))
        // Uploads: `/upload` picks a variant from the content type
        .route("/upload", post(upload::upload))
        .route("/upload/urls", post(upload::upload_urls))
        .route("/upload/files", post(upload::upload_files))
        // Over-limit bodies are rejected by the extractors, so the 413
        // goes through AppError like any other error
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        // Outermost, so every response carries the CORS headers
        .layer(cors)
        .with_state(state)
}
