//! Shared fixtures for unit tests.

use std::sync::Arc;
use std::time::Duration;

use chrysalis_client::{ArbiterClient, GatewayClient};

use crate::config::Config;
use crate::service::deployment::DeploymentCoordinator;
use crate::stages::http::HttpStageProvider;
use crate::state::AppState;
use crate::store::deployment::DeploymentStore;
use crate::store::job::JobStore;
use crate::store::upload::UploadStore;

use chrysalis_core::domain::artifact::{
    Architecture, BusinessLogic, Complexity, Endpoint, EndpointAnalysis, GeneratedFile,
    GeneratedService, HttpMethod, MigrationMetadata, MigrationResult, OutputFormat, OutputKind,
    ProjectStructure, SourceFile, TargetLanguage, VerificationReport,
};
use chrysalis_core::dto::job::SubmitJobRequest;

/// Full application state wired to unroutable collaborator addresses, for
/// handler and submission tests that never need a live upstream.
pub fn app_state() -> AppState {
    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        gateway_url: "http://localhost:18082".to_string(),
        arbiter_url: "http://localhost:15000".to_string(),
        agents_url: "http://localhost:13100".to_string(),
        scripts_dir: std::env::temp_dir().join("chrysalis-test-scripts"),
        output_dir: std::env::temp_dir().join(format!(
            "chrysalis-test-output-{}",
            std::process::id()
        )),
        status_file: std::env::temp_dir().join(format!(
            "chrysalis-test-status-{}.json",
            std::process::id()
        )),
        job_retention: Duration::from_secs(30 * 60),
    };

    let gateway = GatewayClient::new(&config.gateway_url);
    let arbiter = ArbiterClient::new(&config.arbiter_url);
    let deployments = DeploymentStore::new(config.status_file.clone());
    let coordinator = DeploymentCoordinator::new(
        config.scripts_dir.clone(),
        deployments.clone(),
        Arc::new(gateway.clone()),
    );

    AppState {
        stages: Arc::new(HttpStageProvider::new(&config.agents_url)),
        config: Arc::new(config),
        jobs: JobStore::new(),
        uploads: UploadStore::new(),
        deployments,
        coordinator,
        gateway,
        arbiter,
    }
}

pub fn architecture(endpoint_file: &str) -> Architecture {
    Architecture {
        project_name: "legacy-shop".to_string(),
        description: "Monolithic PHP storefront".to_string(),
        structure: ProjectStructure {
            folders: vec!["controllers".to_string()],
            controllers: vec![endpoint_file.to_string()],
            models: vec![],
            views: vec![],
        },
        endpoints: vec![Endpoint {
            id: "ep-orders".to_string(),
            path: "/orders".to_string(),
            method: HttpMethod::GET,
            file: endpoint_file.to_string(),
            line_number: Some(10),
            description: "List orders".to_string(),
            complexity: Complexity::Medium,
        }],
        technologies: vec!["php".to_string()],
        database_detected: true,
        recommendations: vec![],
    }
}

pub fn endpoint_analysis() -> EndpointAnalysis {
    EndpointAnalysis {
        endpoint_id: "ep-orders".to_string(),
        endpoint_path: "/orders".to_string(),
        method: "GET".to_string(),
        input_parameters: vec![],
        business_logic: BusinessLogic {
            summary: "Reads orders for the current user".to_string(),
            steps: vec!["query orders".to_string()],
            complexity: Complexity::Medium,
        },
        database_operations: vec![],
        dependencies: vec![],
        output_format: OutputFormat {
            kind: OutputKind::Json,
            structure: "{ orders: [] }".to_string(),
            status_codes: vec![200],
        },
        security_considerations: vec![],
        estimated_migration_effort: chrysalis_core::domain::artifact::MigrationEffort::Medium,
    }
}

pub fn generated_service(service_name: &str) -> GeneratedService {
    GeneratedService {
        service_name: service_name.to_string(),
        language: TargetLanguage::Go,
        port: 8080,
        description: "Orders microservice".to_string(),
        files: vec![GeneratedFile {
            path: "main.go".to_string(),
            content: "package main".to_string(),
            description: "entry point".to_string(),
        }],
        dockerfile: "FROM golang:1.22".to_string(),
        dependencies: vec![],
        environment_variables: vec![],
        build_instructions: vec!["go build".to_string()],
        run_instructions: vec!["./orders".to_string()],
        test_command: None,
        api_documentation: "GET /orders".to_string(),
    }
}

pub fn verification_report() -> VerificationReport {
    VerificationReport {
        passed: true,
        issues: vec![],
        score: 92,
        recommendations: vec![],
    }
}

pub fn migration_result(migration_id: &str) -> MigrationResult {
    MigrationResult {
        architecture: architecture("orders.php"),
        endpoint_analysis: endpoint_analysis(),
        service: generated_service("orders"),
        verification: verification_report(),
        migration_id: migration_id.to_string(),
        timestamp: chrono::Utc::now(),
        metadata: MigrationMetadata {
            total_duration_ms: 1234,
            steps_completed: vec![],
            warnings: vec![],
        },
    }
}

pub fn submit_request(endpoint_file: &str) -> SubmitJobRequest {
    SubmitJobRequest {
        upload_id: "upload-1".to_string(),
        files: vec![
            SourceFile {
                path: endpoint_file.to_string(),
                content: "<?php include 'db.php'; ?>".to_string(),
            },
            SourceFile {
                path: "db.php".to_string(),
                content: "<?php /* connection */ ?>".to_string(),
            },
        ],
        selected_endpoint_id: "ep-orders".to_string(),
        target_language: TargetLanguage::Go,
        service_name: "orders".to_string(),
    }
}
