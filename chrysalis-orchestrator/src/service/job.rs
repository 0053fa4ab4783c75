//! Job submission
//!
//! Validates the payload, creates the pending record and launches the
//! pipeline executor detached from the request. The HTTP response carries
//! only the job id; everything else is observed by polling.

use std::sync::Arc;

use uuid::Uuid;

use chrysalis_core::domain::artifact::{
    MAX_FILE_ENTRIES, MAX_TOTAL_CONTENT_BYTES, SourceFile,
};
use chrysalis_core::domain::job::Job;
use chrysalis_core::dto::job::SubmitJobRequest;

use crate::service::pipeline;
use crate::state::AppState;

/// Shared file-set validation used by both upload and job submission.
pub fn validate_file_set(files: &[SourceFile]) -> Result<(), String> {
    if files.is_empty() {
        return Err("At least one source file is required".to_string());
    }

    if files.len() > MAX_FILE_ENTRIES {
        return Err(format!(
            "Too many files: {} (limit {})",
            files.len(),
            MAX_FILE_ENTRIES
        ));
    }

    let total_bytes: usize = files.iter().map(|f| f.content.len()).sum();
    if total_bytes > MAX_TOTAL_CONTENT_BYTES {
        return Err(format!(
            "File set too large: {} bytes (limit {})",
            total_bytes, MAX_TOTAL_CONTENT_BYTES
        ));
    }

    if files.iter().any(|f| f.path.trim().is_empty()) {
        return Err("File paths cannot be empty".to_string());
    }

    Ok(())
}

/// Validates the full submission payload. Rejection means no job is created.
pub fn validate(req: &SubmitJobRequest) -> Result<(), String> {
    validate_file_set(&req.files)?;

    if req.selected_endpoint_id.trim().is_empty() {
        return Err("selectedEndpointId is required".to_string());
    }

    if req.service_name.trim().is_empty() {
        return Err("serviceName is required".to_string());
    }

    Ok(())
}

/// Job ids combine a monotonic timestamp with a random suffix so concurrent
/// submissions cannot collide.
pub fn generate_job_id() -> String {
    format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &Uuid::new_v4().simple().to_string()[..7]
    )
}

/// Creates a pending job and launches the executor without waiting for it.
pub async fn submit(state: &AppState, req: SubmitJobRequest) -> Result<String, String> {
    validate(&req)?;

    let job_id = generate_job_id();
    state.jobs.insert(Job::pending(job_id.clone())).await;

    tracing::info!(
        "Job {} created for endpoint {} ({} files)",
        job_id,
        req.selected_endpoint_id,
        req.files.len()
    );

    let jobs = state.jobs.clone();
    let stages = Arc::clone(&state.stages);
    let output_dir = state.config.output_dir.clone();
    let id = job_id.clone();
    tokio::spawn(async move {
        pipeline::run(jobs, stages, output_dir, id, req).await;
    });

    Ok(job_id)
}
