//! Job domain types

use serde::{Deserialize, Serialize};

use crate::domain::artifact::MigrationResult;

/// One run of the five-stage migration pipeline, tracked by id.
///
/// The job store exclusively owns the record; while the job is non-terminal
/// the pipeline executor for that job is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    /// Human-readable stage label. Updated before each stage starts and
    /// never regresses.
    pub progress: String,
    /// Present only when the job is `Completed`.
    pub result: Option<MigrationResult>,
    /// Present only when the job is `Failed`.
    pub error: Option<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Job {
    /// Creates a fresh pending job record.
    pub fn pending(id: String) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
            progress: "Waiting to start".to_string(),
            result: None,
            error: None,
            started_at: chrono::Utc::now(),
        }
    }

    /// Seconds elapsed since the job was created.
    pub fn elapsed_seconds(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}

/// Job execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// A terminal job is never mutated again and is eventually reaped.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}
