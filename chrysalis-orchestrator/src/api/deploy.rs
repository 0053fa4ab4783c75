//! Deployment API Handlers
//!
//! Fire-and-forget dual deployment plus status/container observability.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use chrysalis_core::dto::deployment::{ContainerListResponse, DeployAccepted, DeployRequest};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::state::AppState;

/// POST /deploy
/// Accept a dual deployment for a finished migration. Returns 202 right
/// after the `Deploying` slot is written; the outcome is observed by polling.
pub async fn request_deploy(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DeployRequest>,
) -> ApiResult<(StatusCode, Json<DeployAccepted>)> {
    if req.migration_id.trim().is_empty() {
        return Err(ApiError::BadRequest("migrationId is required".to_string()));
    }

    state.coordinator.request_deployment(req.migration_id).await;

    Ok((
        StatusCode::ACCEPTED,
        Json(DeployAccepted {
            success: true,
            message: "Deployment started".to_string(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct DeployQuery {
    pub status: Option<bool>,
}

/// GET /deploy
/// With `status=true`, the current deployment slot (or an idle placeholder);
/// without, a listing of known managed containers.
pub async fn deploy_status(
    State(state): State<AppState>,
    Query(params): Query<DeployQuery>,
) -> ApiResult<Response> {
    if params.status.unwrap_or(false) {
        return Ok(match state.deployments.load().await {
            Some(slot) => Json(slot).into_response(),
            None => Json(serde_json::json!({ "status": "idle" })).into_response(),
        });
    }

    let containers = state
        .coordinator
        .list_containers()
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to list containers: {}", e)))?;

    Ok(Json(ContainerListResponse {
        success: true,
        containers,
    })
    .into_response())
}
