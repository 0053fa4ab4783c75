//! Job API Handlers
//!
//! HTTP endpoints for the migration job lifecycle: submission and polling.
//! Submission acknowledges immediately; all progress is observed through
//! `GET /jobs?jobId=<id>`.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use chrysalis_core::dto::job::{
    JobListResponse, JobStatusResponse, SubmitJobRequest, SubmitJobResponse,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::service::job as job_service;
use crate::state::AppState;

/// POST /jobs
/// Validate the payload, create the job and launch the pipeline executor.
pub async fn submit_job(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SubmitJobRequest>,
) -> ApiResult<(StatusCode, Json<SubmitJobResponse>)> {
    tracing::info!(
        "Job submission for endpoint {} -> {}",
        req.selected_endpoint_id,
        req.service_name
    );

    let job_id = job_service::submit(&state, req)
        .await
        .map_err(ApiError::BadRequest)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitJobResponse {
            success: true,
            job_id,
        }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    pub job_id: Option<String>,
}

/// GET /jobs
/// With `jobId`, the full status of one job; without, a listing of all
/// non-terminal jobs.
pub async fn query_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobQuery>,
) -> ApiResult<Response> {
    match params.job_id {
        Some(job_id) => {
            let job = state
                .jobs
                .get(&job_id)
                .await
                .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

            let response = JobStatusResponse {
                success: true,
                status: job.status,
                progress: job.progress.clone(),
                elapsed_seconds: job.elapsed_seconds(),
                result: job.result,
                error: job.error,
            };
            Ok(Json(response).into_response())
        }
        None => {
            let jobs = state.jobs.list_active().await;
            Ok(Json(JobListResponse { jobs }).into_response())
        }
    }
}
