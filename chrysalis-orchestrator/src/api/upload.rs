//! Upload API Handlers
//!
//! Stashes a legacy file set in memory ahead of job submission, so the UI can
//! upload once and then drive endpoint selection without re-sending files.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use chrysalis_core::dto::upload::{UploadFilesResponse, UploadRequest, UploadResponse};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::service::job::validate_file_set;
use crate::state::AppState;

/// POST /upload
/// Validate and stash a file set, returning its upload id.
pub async fn upload_files(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UploadRequest>,
) -> ApiResult<Json<UploadResponse>> {
    validate_file_set(&req.files).map_err(ApiError::BadRequest)?;

    let file_count = req.files.len();
    let upload_id = state.uploads.insert(req.files).await;

    tracing::info!("Stored upload {} ({} files)", upload_id, file_count);

    Ok(Json(UploadResponse {
        success: true,
        upload_id,
        file_count,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub upload_id: String,
}

/// GET /upload?uploadId=<id>
/// Retrieve a previously stashed file set.
pub async fn get_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadQuery>,
) -> ApiResult<Json<UploadFilesResponse>> {
    let files = state
        .uploads
        .get(&params.upload_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Upload not found".to_string()))?;

    Ok(Json(UploadFilesResponse {
        success: true,
        files,
    }))
}
