//! Deployment DTOs

use serde::{Deserialize, Serialize};

use crate::domain::deployment::ContainerInfo;

/// Request to deploy both service instances: `POST /deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub migration_id: String,
}

/// Fire-and-forget acknowledgement returned with 202.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployAccepted {
    pub success: bool,
    pub message: String,
}

/// Listing of known deployed service instances: `GET /deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerListResponse {
    pub success: bool,
    pub containers: Vec<ContainerInfo>,
}
