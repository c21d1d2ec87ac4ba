use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppError;
use crate::models::upload::{UploadFilesResponse, UploadUrlsRequest, UploadedFile};
use crate::services::upload_service;
use crate::state::AppState;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// `multipart/form-data` bodies are stored as files; anything else is read
/// as a JSON list of URLs to fetch.
pub async fn upload(State(state): State<AppState>, request: Request) -> Result<Response, AppError> {
    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await;
        Ok(upload_files(State(state), multipart).await?.into_response())
    } else {
        let payload = Json::<UploadUrlsRequest>::from_request(request, &state).await;
        Ok(upload_urls(State(state), payload).await?.into_response())
    }
}

pub async fn upload_urls(
    State(state): State<AppState>,
    payload: Result<Json<UploadUrlsRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, AppError> {
    let Json(req) = payload?;
    let urls = req.urls.unwrap_or_default();

    tracing::info!(count = urls.len(), "Uploading files from URLs");

    let stored = upload_service::upload_from_urls(&state, &urls).await?;
    Ok(Json(stored))
}

pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadFilesResponse>, AppError> {
    let mut multipart = multipart?;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        // Parts without a filename are plain form fields
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;

        files.push(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    let count = upload_service::upload_files(&state, files).await?;

    Ok(Json(UploadFilesResponse {
        message: "Files uploaded successfully".into(),
        count,
    }))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.get(..MULTIPART_FORM_DATA.len()))
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART_FORM_DATA))
}
