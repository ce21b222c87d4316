//! Standalone photo uploads, outside the dish lifecycle.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use cookorder_core::photo::{check_photo_name, check_size, upload_object_name, FALLBACK_CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::multipart::{accept_form, read_file_part};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub status: &'static str,
    pub object_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignedUploadRequest {
    pub filename: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadResponse {
    pub object_name: String,
    pub upload_url: String,
    /// Clients must send this exact `Content-Type` with the PUT.
    pub content_type: &'static str,
    pub expires_in_secs: u64,
}

/// POST /upload
///
/// Stores the multipart `file` part under `{uuid}_{filename}` and returns
/// the object name.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let file = read_file_part(accept_form(multipart)?, "file")
        .await?
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    check_size(file.data.len())?;

    let object_name = upload_object_name(&file.file_name, Uuid::new_v4());
    let content_type = file
        .content_type
        .as_deref()
        .unwrap_or(FALLBACK_CONTENT_TYPE);

    state
        .storage
        .upload(&object_name, file.data.to_vec(), content_type)
        .await?;
    tracing::info!(object_name = %object_name, "File uploaded");

    Ok(Json(UploadResponse {
        status: "uploaded",
        object_name,
    }))
}

/// POST /upload/signed-url
///
/// Issues a time-limited PUT URL so a client can send a dish photo straight
/// to the bucket. The returned object name can then be stored on a dish.
pub async fn signed_upload_url(
    State(state): State<AppState>,
    payload: Result<Json<SignedUploadRequest>, JsonRejection>,
) -> AppResult<Json<SignedUploadResponse>> {
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let checked = check_photo_name(&body.filename)?;
    let object_name = checked.object_name();
    let content_type = checked.format.content_type();
    let ttl = state.config.signed_url_ttl();

    let upload_url = state
        .storage
        .signed_upload_url(&object_name, content_type, ttl)
        .await?;

    Ok(Json(SignedUploadResponse {
        object_name,
        upload_url,
        content_type,
        expires_in_secs: ttl.as_secs(),
    }))
}
