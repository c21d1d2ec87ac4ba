use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::upload::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub bucket: String,
    pub table: String,
    pub uptime_seconds: i64,
    pub version: &'static str,
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}

pub async fn hello_post() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World via POST"))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds();

    Json(StatusResponse {
        bucket: state.config.bucket_name.clone(),
        table: state.config.table_name.clone(),
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION"),
    })
}
