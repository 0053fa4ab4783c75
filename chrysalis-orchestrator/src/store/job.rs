//! In-memory job store
//!
//! Process-wide table of job records keyed by job id. Single-process and
//! deliberately non-durable: records live for the duration of the run plus a
//! fixed retention window after completion.
//!
//! Mutation discipline: handlers insert and read; while a job is non-terminal
//! only the pipeline executor for that job writes to it, so no per-record
//! locking beyond the map's RwLock is needed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use chrysalis_core::domain::artifact::MigrationResult;
use chrysalis_core::domain::job::{Job, JobStatus};
use chrysalis_core::dto::job::JobSummary;

/// Default retention window for terminal jobs, measured from completion.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
    retention: Duration,
}

impl JobStore {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    pub fn with_retention(retention: Duration) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }

    /// Inserts a fresh job record.
    pub async fn insert(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Returns a snapshot of one job, or None if it was never submitted or
    /// already reaped.
    pub async fn get(&self, id: &str) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Transitions a pending job to running. Returns false if the job is
    /// missing or not pending, in which case the caller must not execute it.
    pub async fn begin(&self, id: &str) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(id) {
            Some(job) if job.status == JobStatus::Pending => {
                job.status = JobStatus::Running;
                true
            }
            _ => false,
        }
    }

    /// Updates the progress label of a running job. Progress only ever moves
    /// forward because the executor is the sole writer and calls this in
    /// stage order.
    pub async fn set_progress(&self, id: &str, progress: &str) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.progress = progress.to_string();
        }
    }

    /// Writes the terminal `completed` state and schedules the record for
    /// removal after the retention window.
    pub async fn complete(&self, id: &str, result: MigrationResult) {
        {
            let mut jobs = self.jobs.write().await;
            if let Some(job) = jobs.get_mut(id) {
                job.status = JobStatus::Completed;
                job.result = Some(result);
            }
        }
        self.schedule_reap(id.to_string());
    }

    /// Writes the terminal `failed` state and schedules the record for
    /// removal after the retention window.
    pub async fn fail(&self, id: &str, error: String) {
        {
            let mut jobs = self.jobs.write().await;
            if let Some(job) = jobs.get_mut(id) {
                job.status = JobStatus::Failed;
                job.error = Some(error);
            }
        }
        self.schedule_reap(id.to_string());
    }

    /// Removes a record outright.
    pub async fn remove(&self, id: &str) {
        self.jobs.write().await.remove(id);
    }

    /// Lightweight listing of all non-terminal jobs for observability.
    pub async fn list_active(&self) -> Vec<JobSummary> {
        self.jobs
            .read()
            .await
            .values()
            .filter(|job| !job.status.is_terminal())
            .map(|job| JobSummary {
                id: job.id.clone(),
                status: job.status,
                progress: job.progress.clone(),
                elapsed: job.elapsed_seconds(),
            })
            .collect()
    }

    /// Detached reaper: the retention window is measured from completion,
    /// not from submission.
    fn schedule_reap(&self, id: String) {
        let store = self.clone();
        let deadline = tokio::time::Instant::now() + store.retention;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tracing::debug!("Reaping terminal job {}", id);
            store.remove(&id).await;
        });
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
