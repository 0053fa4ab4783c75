//! Pipeline executor
//!
//! Runs the five migration stages in fixed order for one job, updating the
//! job's progress before each stage and writing the terminal state exactly
//! once. Stages 1-4 are wrapped in the retry policy; packaging is pure
//! bookkeeping and never retried. Any stage's post-retry failure aborts the
//! remaining stages and fails the job; non-fatal verification issues become
//! warnings in the result metadata instead.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use chrysalis_core::domain::artifact::{
    GeneratedService, IssueSeverity, MigrationMetadata, MigrationResult, SourceFile,
    VerificationReport,
};
use chrysalis_core::dto::job::SubmitJobRequest;
use chrysalis_core::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, retry};

use crate::stages::{StageError, StageProvider};
use crate::store::job::JobStore;

pub const STEP_ARCHITECTURE: &str = "architecture-analysis";
pub const STEP_ENDPOINT_ANALYSIS: &str = "endpoint-analysis";
pub const STEP_GENERATION: &str = "microservice-generation";
pub const STEP_VERIFICATION: &str = "verification";
pub const STEP_PACKAGING: &str = "packaging";

/// Cap on the related-files sample handed to endpoint analysis.
const MAX_RELATED_FILES: usize = 10;

/// Files always included for context, referenced or not.
const MIN_CONTEXT_FILES: usize = 5;

/// Entry point for the detached executor task. All results are side effects
/// on the job store.
pub async fn run(
    jobs: JobStore,
    stages: Arc<dyn StageProvider>,
    output_dir: PathBuf,
    job_id: String,
    req: SubmitJobRequest,
) {
    if !jobs.begin(&job_id).await {
        tracing::warn!("Job {} is missing or not pending, skipping execution", job_id);
        return;
    }

    tracing::info!("Starting migration workflow for job {}", job_id);

    match execute(&jobs, stages.as_ref(), &output_dir, &job_id, &req).await {
        Ok(result) => {
            tracing::info!(
                "Job {} completed in {}ms ({} warnings)",
                job_id,
                result.metadata.total_duration_ms,
                result.metadata.warnings.len()
            );
            jobs.complete(&job_id, result).await;
        }
        Err(err) => {
            tracing::error!("Job {} failed: {}", job_id, err);
            jobs.fail(&job_id, err.to_string()).await;
        }
    }
}

async fn execute(
    jobs: &JobStore,
    stages: &dyn StageProvider,
    output_dir: &Path,
    job_id: &str,
    req: &SubmitJobRequest,
) -> Result<MigrationResult, StageError> {
    let started = Instant::now();
    let mut steps_completed = Vec::new();
    let mut warnings = Vec::new();

    // Stage 1: architecture analysis over the full file set.
    jobs.set_progress(job_id, "Analyzing monolith architecture (step 1/5)")
        .await;
    let architecture = retry(
        || stages.analyze_architecture(&req.files),
        DEFAULT_MAX_RETRIES,
        DEFAULT_BASE_DELAY,
    )
    .await?;
    steps_completed.push(STEP_ARCHITECTURE.to_string());
    tracing::debug!(
        "Job {}: found {} endpoints",
        job_id,
        architecture.endpoints.len()
    );

    // Locate the previously selected endpoint and its source file.
    let endpoint = architecture
        .endpoints
        .iter()
        .find(|ep| ep.id == req.selected_endpoint_id)
        .cloned()
        .ok_or_else(|| {
            StageError::new(
                STEP_ENDPOINT_ANALYSIS,
                format!("Endpoint {} not found", req.selected_endpoint_id),
            )
        })?;

    let main_file = req
        .files
        .iter()
        .find(|f| f.path == endpoint.file || f.path.ends_with(&endpoint.file))
        .ok_or_else(|| {
            StageError::new(
                STEP_ENDPOINT_ANALYSIS,
                format!("File {} not found", endpoint.file),
            )
        })?;

    let related = related_files(&req.files, &main_file.content);

    // Stage 2: endpoint analysis with the architecture's endpoint node
    // carried forward.
    jobs.set_progress(job_id, "Analyzing selected endpoint (step 2/5)")
        .await;
    let analysis = retry(
        || stages.analyze_endpoint(&endpoint, &main_file.content, &related),
        DEFAULT_MAX_RETRIES,
        DEFAULT_BASE_DELAY,
    )
    .await?;
    steps_completed.push(STEP_ENDPOINT_ANALYSIS.to_string());

    // Stage 3: code generation for the chosen target language.
    jobs.set_progress(
        job_id,
        &format!(
            "Generating {} microservice (step 3/5)",
            req.target_language.label()
        ),
    )
    .await;
    let service = retry(
        || stages.generate_service(&analysis, req.target_language, &req.service_name),
        DEFAULT_MAX_RETRIES,
        DEFAULT_BASE_DELAY,
    )
    .await?;
    steps_completed.push(STEP_GENERATION.to_string());

    // Stage 4: verification. Issues are aggregated as warnings, never thrown.
    jobs.set_progress(job_id, "Verifying generated code (step 4/5)")
        .await;
    let verification = retry(
        || stages.verify(&service),
        DEFAULT_MAX_RETRIES,
        DEFAULT_BASE_DELAY,
    )
    .await?;
    steps_completed.push(STEP_VERIFICATION.to_string());

    let error_count = verification
        .issues
        .iter()
        .filter(|i| i.severity == IssueSeverity::Error)
        .count();
    let warning_count = verification
        .issues
        .iter()
        .filter(|i| i.severity == IssueSeverity::Warning)
        .count();
    if error_count > 0 {
        warnings.push(format!("Found {} errors in generated code", error_count));
    }
    if warning_count > 0 {
        warnings.push(format!(
            "Found {} warnings in generated code",
            warning_count
        ));
    }

    // Stage 5: packaging. Mint the migration id and persist the bundle.
    jobs.set_progress(job_id, "Packaging microservice (step 5/5)")
        .await;
    let migration_id = format!(
        "migration-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &Uuid::new_v4().simple().to_string()[..7]
    );
    write_bundle(output_dir, &migration_id, &service, &verification)
        .await
        .map_err(|e| {
            StageError::new(STEP_PACKAGING, format!("Failed to persist bundle: {}", e))
        })?;
    steps_completed.push(STEP_PACKAGING.to_string());

    Ok(MigrationResult {
        architecture,
        endpoint_analysis: analysis,
        service,
        verification,
        migration_id,
        timestamp: chrono::Utc::now(),
        metadata: MigrationMetadata {
            total_duration_ms: started.elapsed().as_millis() as u64,
            steps_completed,
            warnings,
        },
    })
}

/// Best-effort sampling of files for endpoint-analysis context: files whose
/// name or path is referenced in the main file's text, padded with the first
/// few files seen, capped at ten. A tunable policy, not a correctness
/// invariant.
fn related_files(files: &[SourceFile], main_content: &str) -> Vec<SourceFile> {
    let mut related = Vec::new();

    for file in files {
        let file_name = file.path.rsplit('/').next().unwrap_or("");

        if main_content.contains(file_name)
            || main_content.contains(&file.path)
            || related.len() < MIN_CONTEXT_FILES
        {
            related.push(file.clone());
            if related.len() >= MAX_RELATED_FILES {
                break;
            }
        }
    }

    related
}

/// Writes the generated bundle under `<output_dir>/<migration_id>` so a
/// later deployment request can locate it.
async fn write_bundle(
    output_dir: &Path,
    migration_id: &str,
    service: &GeneratedService,
    verification: &VerificationReport,
) -> std::io::Result<()> {
    let bundle_dir = output_dir.join(migration_id);
    tokio::fs::create_dir_all(&bundle_dir).await?;

    for file in &service.files {
        let rel = Path::new(&file.path);
        // Generated paths are model output; never let one escape the bundle.
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            tracing::warn!("Skipping generated file with unsafe path: {}", file.path);
            continue;
        }

        let dest = bundle_dir.join(rel);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, &file.content).await?;
    }

    tokio::fs::write(bundle_dir.join("Dockerfile"), &service.dockerfile).await?;
    tokio::fs::write(
        bundle_dir.join("README.md"),
        render_readme(service, verification),
    )
    .await?;

    Ok(())
}

fn render_readme(service: &GeneratedService, verification: &VerificationReport) -> String {
    let mut readme = format!(
        "# {}\n\n{}\n\n## Language: {}\n## Port: {}\n",
        service.service_name,
        service.description,
        service.language.label(),
        service.port
    );

    readme.push_str("\n## Build Instructions\n");
    for (idx, step) in service.build_instructions.iter().enumerate() {
        readme.push_str(&format!("{}. {}\n", idx + 1, step));
    }

    readme.push_str("\n## Run Instructions\n");
    for (idx, step) in service.run_instructions.iter().enumerate() {
        readme.push_str(&format!("{}. {}\n", idx + 1, step));
    }

    readme.push_str(&format!(
        "\n## Verification\n- Score: {}/100\n- Status: {}\n",
        verification.score,
        if verification.passed { "PASSED" } else { "FAILED" }
    ));

    if !verification.issues.is_empty() {
        readme.push_str("\n### Issues Found:\n");
        for issue in &verification.issues {
            readme.push_str(&format!("- [{:?}] {}\n", issue.severity, issue.message));
        }
    }

    readme
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrysalis_core::domain::artifact::{
        Architecture, Endpoint, EndpointAnalysis, TargetLanguage, VerificationIssue,
    };
    use chrysalis_core::domain::job::{Job, JobStatus};

    use crate::testutil;

    /// Stage provider that records invocations and can be told to fail one
    /// stage on every attempt.
    struct MockStages {
        calls: Mutex<Vec<&'static str>>,
        fail_stage: Option<&'static str>,
        verification: VerificationReport,
    }

    impl MockStages {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_stage: None,
                verification: testutil::verification_report(),
            }
        }

        fn failing_at(stage: &'static str) -> Self {
            Self {
                fail_stage: Some(stage),
                ..Self::new()
            }
        }

        fn with_verification(verification: VerificationReport) -> Self {
            Self {
                verification,
                ..Self::new()
            }
        }

        fn record(&self, stage: &'static str) -> Result<(), StageError> {
            self.calls.lock().unwrap().push(stage);
            if self.fail_stage == Some(stage) {
                Err(StageError::new(stage, "induced failure"))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StageProvider for MockStages {
        async fn analyze_architecture(
            &self,
            _files: &[SourceFile],
        ) -> Result<Architecture, StageError> {
            self.record(STEP_ARCHITECTURE)?;
            Ok(testutil::architecture("orders.php"))
        }

        async fn analyze_endpoint(
            &self,
            _endpoint: &Endpoint,
            _file_content: &str,
            _related_files: &[SourceFile],
        ) -> Result<EndpointAnalysis, StageError> {
            self.record(STEP_ENDPOINT_ANALYSIS)?;
            Ok(testutil::endpoint_analysis())
        }

        async fn generate_service(
            &self,
            _analysis: &EndpointAnalysis,
            _language: TargetLanguage,
            service_name: &str,
        ) -> Result<GeneratedService, StageError> {
            self.record(STEP_GENERATION)?;
            Ok(testutil::generated_service(service_name))
        }

        async fn verify(
            &self,
            _service: &GeneratedService,
        ) -> Result<VerificationReport, StageError> {
            self.record(STEP_VERIFICATION)?;
            Ok(self.verification.clone())
        }
    }

    fn temp_output_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "chrysalis-output-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    async fn run_job(
        stages: Arc<MockStages>,
        output_dir: PathBuf,
        req: SubmitJobRequest,
    ) -> (JobStore, String) {
        let jobs = JobStore::new();
        let job_id = "1700000000000-test01".to_string();
        jobs.insert(Job::pending(job_id.clone())).await;
        run(jobs.clone(), stages, output_dir, job_id.clone(), req).await;
        (jobs, job_id)
    }

    #[tokio::test]
    async fn test_successful_run_completes_with_all_steps() {
        let stages = Arc::new(MockStages::new());
        let output_dir = temp_output_dir("success");
        let (jobs, job_id) = run_job(
            Arc::clone(&stages),
            output_dir.clone(),
            testutil::submit_request("orders.php"),
        )
        .await;

        let job = jobs.get(&job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.error.is_none());

        let result = job.result.unwrap();
        assert!(result.migration_id.starts_with("migration-"));
        assert_eq!(
            result.metadata.steps_completed,
            vec![
                STEP_ARCHITECTURE,
                STEP_ENDPOINT_ANALYSIS,
                STEP_GENERATION,
                STEP_VERIFICATION,
                STEP_PACKAGING,
            ]
        );

        // Stages ran once each, in pipeline order.
        assert_eq!(
            stages.calls(),
            vec![
                STEP_ARCHITECTURE,
                STEP_ENDPOINT_ANALYSIS,
                STEP_GENERATION,
                STEP_VERIFICATION,
            ]
        );

        // The bundle landed on disk next to its Dockerfile.
        let bundle = output_dir.join(&result.migration_id);
        assert!(bundle.join("Dockerfile").exists());
        assert!(bundle.join("main.go").exists());
        assert!(bundle.join("README.md").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_failure_aborts_remaining_stages() {
        let stages = Arc::new(MockStages::failing_at(STEP_ENDPOINT_ANALYSIS));
        let (jobs, job_id) = run_job(
            Arc::clone(&stages),
            temp_output_dir("abort"),
            testutil::submit_request("orders.php"),
        )
        .await;

        let job = jobs.get(&job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains(STEP_ENDPOINT_ANALYSIS));
        assert!(job.result.is_none());

        // Architecture ran once, endpoint analysis was retried three times,
        // and nothing after it was ever invoked.
        assert_eq!(
            stages.calls(),
            vec![
                STEP_ARCHITECTURE,
                STEP_ENDPOINT_ANALYSIS,
                STEP_ENDPOINT_ANALYSIS,
                STEP_ENDPOINT_ANALYSIS,
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_endpoint_fails_without_running_later_stages() {
        let stages = Arc::new(MockStages::new());
        let mut req = testutil::submit_request("orders.php");
        req.selected_endpoint_id = "ep-missing".to_string();

        let (jobs, job_id) =
            run_job(Arc::clone(&stages), temp_output_dir("missing-ep"), req).await;

        let job = jobs.get(&job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("Endpoint ep-missing not found"));
        assert_eq!(stages.calls(), vec![STEP_ARCHITECTURE]);
    }

    #[tokio::test]
    async fn test_verification_issues_become_warnings_not_failures() {
        let report = VerificationReport {
            passed: false,
            issues: vec![
                VerificationIssue {
                    severity: IssueSeverity::Error,
                    message: "missing null check".to_string(),
                    file: Some("main.go".to_string()),
                    suggestion: None,
                },
                VerificationIssue {
                    severity: IssueSeverity::Error,
                    message: "unbounded query".to_string(),
                    file: None,
                    suggestion: None,
                },
                VerificationIssue {
                    severity: IssueSeverity::Warning,
                    message: "magic number".to_string(),
                    file: None,
                    suggestion: None,
                },
            ],
            score: 55,
            recommendations: vec![],
        };

        let stages = Arc::new(MockStages::with_verification(report));
        let (jobs, job_id) = run_job(
            stages,
            temp_output_dir("warnings"),
            testutil::submit_request("orders.php"),
        )
        .await;

        let job = jobs.get(&job_id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);

        let warnings = job.result.unwrap().metadata.warnings;
        assert!(warnings.contains(&"Found 2 errors in generated code".to_string()));
        assert!(warnings.contains(&"Found 1 warnings in generated code".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_jobs_never_cross_results() {
        let stages = Arc::new(MockStages::new());
        let jobs = JobStore::new();
        let output_dir = temp_output_dir("concurrent");

        let mut req_a = testutil::submit_request("orders.php");
        req_a.service_name = "orders-a".to_string();
        let mut req_b = testutil::submit_request("orders.php");
        req_b.service_name = "orders-b".to_string();

        jobs.insert(Job::pending("job-a".to_string())).await;
        jobs.insert(Job::pending("job-b".to_string())).await;

        tokio::join!(
            run(
                jobs.clone(),
                stages.clone(),
                output_dir.clone(),
                "job-a".to_string(),
                req_a
            ),
            run(
                jobs.clone(),
                stages.clone(),
                output_dir.clone(),
                "job-b".to_string(),
                req_b
            )
        );

        let result_a = jobs.get("job-a").await.unwrap().result.unwrap();
        let result_b = jobs.get("job-b").await.unwrap().result.unwrap();
        assert_eq!(result_a.service.service_name, "orders-a");
        assert_eq!(result_b.service.service_name, "orders-b");
        assert_ne!(result_a.migration_id, result_b.migration_id);
    }

    #[test]
    fn test_related_files_picks_referenced_plus_leading_context() {
        let mut files: Vec<SourceFile> = (0..20)
            .map(|i| SourceFile {
                path: format!("lib/module{:02}.php", i),
                content: String::new(),
            })
            .collect();
        files.push(SourceFile {
            path: "lib/special.php".to_string(),
            content: String::new(),
        });

        let main_content = "<?php require 'special.php'; ?>";
        let related = related_files(&files, main_content);

        // The first few files come along for context even though nothing
        // references them; the referenced file makes the cut from the back.
        assert_eq!(related.len(), MIN_CONTEXT_FILES + 1);
        assert_eq!(related[0].path, "lib/module00.php");
        assert!(related.iter().any(|f| f.path == "lib/special.php"));
    }

    #[test]
    fn test_related_files_caps_at_ten_when_everything_is_referenced() {
        let files: Vec<SourceFile> = (0..20)
            .map(|i| SourceFile {
                path: format!("lib/module{:02}.php", i),
                content: String::new(),
            })
            .collect();

        let main_content = files
            .iter()
            .map(|f| format!("require '{}';", f.path))
            .collect::<Vec<_>>()
            .join("\n");
        let related = related_files(&files, &main_content);

        assert_eq!(related.len(), MAX_RELATED_FILES);
        assert_eq!(related[9].path, "lib/module09.php");
    }

    #[test]
    fn test_related_files_small_sets_are_taken_whole() {
        let files = testutil::submit_request("orders.php").files;
        let related = related_files(&files, "no references here");
        assert_eq!(related.len(), files.len());
    }
}
