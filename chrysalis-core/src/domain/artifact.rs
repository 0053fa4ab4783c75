//! Pipeline artifact chain
//!
//! Typed documents produced by the migration stages, in order: architecture
//! description, endpoint analysis, generated-service bundle, verification
//! report. Stage k+1 never starts before stage k's artifact deserialized
//! cleanly into these types; a response that does not match is treated as a
//! stage failure.

use serde::{Deserialize, Serialize};

/// Maximum number of entries accepted in one submitted file set.
pub const MAX_FILE_ENTRIES: usize = 200;

/// Maximum combined content size accepted in one submitted file set.
pub const MAX_TOTAL_CONTENT_BYTES: usize = 8 * 1024 * 1024;

/// One (path, content) pair of the submitted legacy code base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// Closed set of languages the generation stage can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetLanguage {
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "node-ts")]
    NodeTs,
}

impl TargetLanguage {
    pub fn label(&self) -> &'static str {
        match self {
            TargetLanguage::Go => "Go",
            TargetLanguage::Python => "Python",
            TargetLanguage::NodeTs => "Node (TypeScript)",
        }
    }
}

// =============================================================================
// Stage 1: architecture description
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// One endpoint discovered in the legacy code base.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    pub path: String,
    pub method: HttpMethod,
    /// Source file the endpoint is implemented in.
    pub file: String,
    pub line_number: Option<u32>,
    pub description: String,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    pub folders: Vec<String>,
    pub controllers: Vec<String>,
    pub models: Vec<String>,
    pub views: Vec<String>,
}

/// Stage 1 artifact: the analyzed monolith architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    pub project_name: String,
    pub description: String,
    pub structure: ProjectStructure,
    pub endpoints: Vec<Endpoint>,
    pub technologies: Vec<String>,
    pub database_detected: bool,
    pub recommendations: Vec<String>,
}

// =============================================================================
// Stage 2: endpoint analysis
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Query,
    Body,
    Header,
    Path,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    pub source: ParameterSource,
    pub description: String,
    pub validation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLogic {
    pub summary: String,
    pub steps: Vec<String>,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    SELECT,
    INSERT,
    UPDATE,
    DELETE,
    OTHER,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseOperation {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub tables: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Internal,
    External,
    Database,
    File,
    Api,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDependency {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub description: String,
    pub critical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Json,
    Html,
    Redirect,
    File,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFormat {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub structure: String,
    pub status_codes: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationEffort {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Stage 2 artifact: deep analysis of the selected endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAnalysis {
    pub endpoint_id: String,
    pub endpoint_path: String,
    pub method: String,
    pub input_parameters: Vec<InputParameter>,
    pub business_logic: BusinessLogic,
    pub database_operations: Vec<DatabaseOperation>,
    pub dependencies: Vec<EndpointDependency>,
    pub output_format: OutputFormat,
    pub security_considerations: Vec<String>,
    pub estimated_migration_effort: MigrationEffort,
}

// =============================================================================
// Stage 3: generated-service bundle
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
    pub description: String,
}

/// Stage 3 artifact: the generated replacement microservice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedService {
    pub service_name: String,
    pub language: TargetLanguage,
    pub port: u16,
    pub description: String,
    pub files: Vec<GeneratedFile>,
    pub dockerfile: String,
    pub dependencies: Vec<String>,
    pub environment_variables: Vec<EnvironmentVariable>,
    pub build_instructions: Vec<String>,
    pub run_instructions: Vec<String>,
    pub test_command: Option<String>,
    pub api_documentation: String,
}

// =============================================================================
// Stage 4: verification report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub file: Option<String>,
    pub suggestion: Option<String>,
}

/// Stage 4 artifact: verification of the generated bundle.
///
/// Issues are data, not errors: a low score or a list of problems does not
/// fail the pipeline, it is aggregated into the result's warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub passed: bool,
    pub issues: Vec<VerificationIssue>,
    pub score: u8,
    pub recommendations: Vec<String>,
}

// =============================================================================
// Final aggregated result
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationMetadata {
    pub total_duration_ms: u64,
    pub steps_completed: Vec<String>,
    pub warnings: Vec<String>,
}

/// The full artifact chain plus the migration id minted at packaging time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub architecture: Architecture,
    pub endpoint_analysis: EndpointAnalysis,
    pub service: GeneratedService,
    pub verification: VerificationReport,
    pub migration_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub metadata: MigrationMetadata,
}
