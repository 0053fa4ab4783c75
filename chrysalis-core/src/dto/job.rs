//! Job submission and polling DTOs

use serde::{Deserialize, Serialize};

use crate::domain::artifact::{MigrationResult, SourceFile, TargetLanguage};
use crate::domain::job::JobStatus;

/// Request to submit a migration job: `POST /jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobRequest {
    pub upload_id: String,
    pub files: Vec<SourceFile>,
    pub selected_endpoint_id: String,
    pub target_language: TargetLanguage,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobResponse {
    pub success: bool,
    pub job_id: String,
}

/// Full status of one job: `GET /jobs?jobId=<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub success: bool,
    pub status: JobStatus,
    pub progress: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MigrationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_seconds: i64,
}

/// Lightweight view of one non-terminal job for the observability listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    pub status: JobStatus,
    pub progress: String,
    /// Seconds since submission.
    pub elapsed: i64,
}

/// Listing of all non-terminal jobs: `GET /jobs` with no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobSummary>,
}
