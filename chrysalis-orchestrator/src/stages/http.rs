//! HTTP-backed stage provider
//!
//! Posts each stage to the agent service that fronts the model provider and
//! validates the response by deserializing into the declared artifact type.
//! A body that does not match the artifact schema is a stage failure,
//! indistinguishable from an execution failure as far as retry is concerned.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use chrysalis_core::domain::artifact::{
    Architecture, Endpoint, EndpointAnalysis, GeneratedService, SourceFile, TargetLanguage,
    VerificationReport,
};

use crate::stages::{StageError, StageProvider};

/// Envelope every agent endpoint wraps its artifact in.
#[derive(Debug, serde::Deserialize)]
struct AgentEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpStageProvider {
    base_url: String,
    client: Client,
}

impl HttpStageProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        stage: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, StageError> {
        let url = format!("{}/api/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| StageError::new(stage, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StageError::new(
                stage,
                format!("agent returned {}: {}", status, text),
            ));
        }

        // Typed deserialization is the schema check: a partial or malformed
        // artifact never leaves this function.
        let envelope: AgentEnvelope<T> = response
            .json()
            .await
            .map_err(|e| StageError::new(stage, format!("schema-invalid response: {}", e)))?;

        if !envelope.success {
            return Err(StageError::new(
                stage,
                envelope
                    .error
                    .unwrap_or_else(|| "agent reported failure".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| StageError::new(stage, "agent response had no data"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArchitectureRequest<'a> {
    files: &'a [SourceFile],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointAnalysisRequest<'a> {
    endpoint: &'a Endpoint,
    file_content: &'a str,
    related_files: &'a [SourceFile],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    endpoint_analysis: &'a EndpointAnalysis,
    language: TargetLanguage,
    service_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    microservice: &'a GeneratedService,
}

#[async_trait]
impl StageProvider for HttpStageProvider {
    async fn analyze_architecture(
        &self,
        files: &[SourceFile],
    ) -> Result<Architecture, StageError> {
        self.call(
            "architecture-analysis",
            "architecture",
            &ArchitectureRequest { files },
        )
        .await
    }

    async fn analyze_endpoint(
        &self,
        endpoint: &Endpoint,
        file_content: &str,
        related_files: &[SourceFile],
    ) -> Result<EndpointAnalysis, StageError> {
        self.call(
            "endpoint-analysis",
            "endpoint-analysis",
            &EndpointAnalysisRequest {
                endpoint,
                file_content,
                related_files,
            },
        )
        .await
    }

    async fn generate_service(
        &self,
        analysis: &EndpointAnalysis,
        language: TargetLanguage,
        service_name: &str,
    ) -> Result<GeneratedService, StageError> {
        self.call(
            "microservice-generation",
            "microservice-generator",
            &GenerateRequest {
                endpoint_analysis: analysis,
                language,
                service_name,
            },
        )
        .await
    }

    async fn verify(&self, service: &GeneratedService) -> Result<VerificationReport, StageError> {
        self.call(
            "verification",
            "verifier",
            &VerifyRequest {
                microservice: service,
            },
        )
        .await
    }
}
