//! Pipeline stage contract
//!
//! The four analysis/generation/verification stages are opaque operations
//! backed by a model provider. The executor only depends on this trait: each
//! stage maps a typed input to a typed, schema-validated output and must be
//! idempotent, because every call is wrapped in the retry policy. A stage
//! that cannot produce a valid artifact fails with a [`StageError`]; a
//! schema-violating response is the same failure as an execution error.
//!
//! Packaging (stage 5) is pure bookkeeping and lives in the executor itself.

pub mod http;

use std::fmt;

use async_trait::async_trait;

use chrysalis_core::domain::artifact::{
    Architecture, Endpoint, EndpointAnalysis, GeneratedService, SourceFile, TargetLanguage,
    VerificationReport,
};

/// Failure of one stage invocation. Carries the stage name so job errors
/// point at the step that broke the chain.
#[derive(Debug, Clone)]
pub struct StageError {
    pub stage: &'static str,
    pub message: String,
}

impl StageError {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

impl std::error::Error for StageError {}

/// The four model-backed transformation stages of the migration pipeline.
#[async_trait]
pub trait StageProvider: Send + Sync {
    /// Stage 1: analyze the whole legacy file set into an architecture
    /// description.
    async fn analyze_architecture(&self, files: &[SourceFile])
    -> Result<Architecture, StageError>;

    /// Stage 2: analyze one endpoint, given its source file and a sample of
    /// related files for context.
    async fn analyze_endpoint(
        &self,
        endpoint: &Endpoint,
        file_content: &str,
        related_files: &[SourceFile],
    ) -> Result<EndpointAnalysis, StageError>;

    /// Stage 3: generate the replacement microservice bundle for the chosen
    /// target language.
    async fn generate_service(
        &self,
        analysis: &EndpointAnalysis,
        language: TargetLanguage,
        service_name: &str,
    ) -> Result<GeneratedService, StageError>;

    /// Stage 4: verify the generated bundle. Verification issues are data in
    /// the report, not errors; this only fails when the stage itself cannot
    /// execute.
    async fn verify(&self, service: &GeneratedService) -> Result<VerificationReport, StageError>;
}
