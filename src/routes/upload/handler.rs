use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::AppError, utils::success_to_api_response};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct MediaHostResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// POST /upload，文件字段名为 image
#[axum::debug_handler]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let url = forward_to_media_host(&state, multipart, "image").await?;
    Ok((StatusCode::OK, success_to_api_response(UploadResponse { url })))
}

/// POST /upload-image，文件字段名为 file
#[axum::debug_handler]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let url = forward_to_media_host(&state, multipart, "file").await?;
    Ok((StatusCode::OK, success_to_api_response(UploadResponse { url })))
}

/// 把 multipart 文件原样转发给外部媒体托管服务，返回托管 URL
async fn forward_to_media_host(
    state: &AppState,
    mut multipart: Multipart,
    field_name: &str,
) -> Result<String, AppError> {
    let upload_url = state
        .config
        .media_upload_url
        .clone()
        .ok_or_else(|| AppError::Internal("Media upload is not configured".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed multipart body".to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload.bin".to_string());
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("Failed to read uploaded file".to_string()))?;

        let mut part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name);
        if let Some(ct) = content_type {
            part = part
                .mime_str(&ct)
                .map_err(|_| AppError::BadRequest("Invalid content type".to_string()))?;
        }

        let form = reqwest::multipart::Form::new().part("file", part);
        let mut request = state.http.post(&upload_url).multipart(form);
        if let Some(key) = &state.config.media_api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            tracing::error!("Media host returned {}", resp.status());
            return Err(AppError::Internal("Failed to upload image".to_string()));
        }

        let body: MediaHostResponse = resp.json().await?;
        return body
            .secure_url
            .or(body.url)
            .ok_or_else(|| AppError::Internal("Media host returned no URL".to_string()));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
