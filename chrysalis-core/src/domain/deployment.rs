//! Deployment domain types

use serde::{Deserialize, Serialize};

/// Outcome of deploying one service instance (legacy or modern).
///
/// Created fresh on every deployment attempt and never mutated after being
/// placed into a [`DeploymentState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub success: bool,
    pub container_id: Option<String>,
    pub container_name: String,
    pub port: u16,
    pub url: String,
    pub error: Option<String>,
}

impl DeploymentResult {
    /// Placeholder result written while a deployment attempt is in flight.
    pub fn pending(container_name: impl Into<String>, port: u16) -> Self {
        Self {
            success: false,
            container_id: None,
            container_name: container_name.into(),
            port,
            url: format!("http://localhost:{}", port),
            error: None,
        }
    }

    pub fn succeeded(container_name: impl Into<String>, port: u16, container_id: String) -> Self {
        Self {
            container_id: Some(container_id),
            success: true,
            ..Self::pending(container_name, port)
        }
    }

    pub fn failed(container_name: impl Into<String>, port: u16, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::pending(container_name, port)
        }
    }
}

/// Aggregated status of one deployment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Idle,
    Deploying,
    Success,
    Error,
}

/// Aggregated outcome of one deployment request covering both instances.
///
/// Written `Deploying` synchronously when a request is accepted, then
/// overwritten exactly once when both underlying attempts resolve. Exactly one
/// state is live at a time; a new request supersedes the prior slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentState {
    pub status: DeploymentStatus,
    pub migration_id: String,
    pub legacy: DeploymentResult,
    pub modern: DeploymentResult,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One row of the known-containers listing (`docker ps` output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub name: String,
    pub status: String,
    pub ports: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let ok = DeploymentResult::succeeded("chrysalis-legacy", 8081, "abc123".to_string());
        assert!(ok.success);
        assert_eq!(ok.container_id.as_deref(), Some("abc123"));
        assert_eq!(ok.url, "http://localhost:8081");

        let failed = DeploymentResult::failed("chrysalis-modern-m1", 8080, "boom".to_string());
        assert!(!failed.success);
        assert!(failed.container_id.is_none());
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_state_wire_format() {
        let state = DeploymentState {
            status: DeploymentStatus::Deploying,
            migration_id: "migration-1".to_string(),
            legacy: DeploymentResult::pending("chrysalis-legacy", 8081),
            modern: DeploymentResult::pending("chrysalis-modern-migration-1", 8080),
            message: "Deployment in progress".to_string(),
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "deploying");
        assert_eq!(json["migrationId"], "migration-1");
        assert_eq!(json["legacy"]["containerName"], "chrysalis-legacy");
    }
}
