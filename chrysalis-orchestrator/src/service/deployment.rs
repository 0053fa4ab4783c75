//! Dual deployment coordinator
//!
//! Deploys the legacy monolith and the generated modern service side by side
//! so the gateway can shift traffic between them. A request is acknowledged
//! immediately: the coordinator writes the `Deploying` slot synchronously,
//! then finishes in a detached task. Both container deployments run
//! concurrently; the traffic lock is released only when both succeed.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use chrysalis_core::domain::deployment::{
    ContainerInfo, DeploymentResult, DeploymentState, DeploymentStatus,
};
use chrysalis_client::{ClientError, GatewayClient};

use crate::store::deployment::DeploymentStore;

/// Fixed name of the legacy monolith container; redeploys replace it.
pub const LEGACY_CONTAINER: &str = "chrysalis-legacy";
pub const LEGACY_PORT: u16 = 8081;
pub const MODERN_PORT: u16 = 8080;

/// Prefix shared by every container this system manages.
const CONTAINER_PREFIX: &str = "chrysalis-";

pub fn modern_container_name(migration_id: &str) -> String {
    format!("chrysalis-modern-{}", migration_id)
}

/// Seam between the coordinator and the traffic gateway so the unlock
/// behavior is testable without a live gateway.
#[async_trait]
pub trait TrafficControl: Send + Sync {
    async fn set_traffic_lock(&self, locked: bool) -> Result<(), ClientError>;
}

#[async_trait]
impl TrafficControl for GatewayClient {
    async fn set_traffic_lock(&self, locked: bool) -> Result<(), ClientError> {
        GatewayClient::set_traffic_lock(self, locked).await.map(|_| ())
    }
}

#[derive(Clone)]
pub struct DeploymentCoordinator {
    scripts_dir: Arc<PathBuf>,
    store: DeploymentStore,
    traffic: Arc<dyn TrafficControl>,
}

impl DeploymentCoordinator {
    pub fn new(
        scripts_dir: PathBuf,
        store: DeploymentStore,
        traffic: Arc<dyn TrafficControl>,
    ) -> Self {
        Self {
            scripts_dir: Arc::new(scripts_dir),
            store,
            traffic,
        }
    }

    /// Accepts a deployment request. The `Deploying` slot is written before
    /// this returns, so a status poll issued right after the acknowledgement
    /// already sees the in-flight deployment. The heavy lifting happens in a
    /// detached task.
    pub async fn request_deployment(&self, migration_id: String) {
        let modern_name = modern_container_name(&migration_id);
        let state = DeploymentState {
            status: DeploymentStatus::Deploying,
            migration_id: migration_id.clone(),
            legacy: DeploymentResult::pending(LEGACY_CONTAINER, LEGACY_PORT),
            modern: DeploymentResult::pending(&modern_name, MODERN_PORT),
            message: "Deployment in progress".to_string(),
            timestamp: chrono::Utc::now(),
        };
        self.store.save(&state).await;

        tracing::info!("Deployment accepted for migration {}", migration_id);

        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.finish(migration_id).await;
        });
    }

    /// Runs both deployments to completion and writes the terminal slot.
    async fn finish(&self, migration_id: String) {
        let (legacy, modern) = self.deploy_both(&migration_id).await;
        let all_ok = legacy.success && modern.success;

        if all_ok {
            // Traffic stays locked until both sides are live.
            if let Err(e) = self.traffic.set_traffic_lock(false).await {
                tracing::warn!("Failed to release traffic lock: {}", e);
            }
        }

        let state = DeploymentState {
            status: if all_ok {
                DeploymentStatus::Success
            } else {
                DeploymentStatus::Error
            },
            migration_id: migration_id.clone(),
            legacy,
            modern,
            message: if all_ok {
                "Both services deployed successfully".to_string()
            } else {
                "Deployment completed with errors".to_string()
            },
            timestamp: chrono::Utc::now(),
        };

        tracing::info!(
            "Deployment for migration {} finished: {:?}",
            migration_id,
            state.status
        );
        self.store.save(&state).await;
    }

    /// Deploys legacy and modern concurrently. A panicked deployment task is
    /// reported as a failed attempt, never poisons the slot.
    async fn deploy_both(&self, migration_id: &str) -> (DeploymentResult, DeploymentResult) {
        let modern_name = modern_container_name(migration_id);

        let legacy_task = {
            let scripts_dir = Arc::clone(&self.scripts_dir);
            tokio::spawn(async move {
                run_deploy_script(
                    &scripts_dir.join("deploy-legacy.sh"),
                    &[],
                    LEGACY_CONTAINER,
                    LEGACY_PORT,
                )
                .await
            })
        };

        let modern_task = {
            let scripts_dir = Arc::clone(&self.scripts_dir);
            let migration_id = migration_id.to_string();
            let modern_name = modern_name.clone();
            tokio::spawn(async move {
                run_deploy_script(
                    &scripts_dir.join("deploy-modern.sh"),
                    &[&migration_id],
                    &modern_name,
                    MODERN_PORT,
                )
                .await
            })
        };

        let legacy = legacy_task.await.unwrap_or_else(|e| {
            DeploymentResult::failed(
                LEGACY_CONTAINER,
                LEGACY_PORT,
                format!("deployment task crashed: {}", e),
            )
        });
        let modern = modern_task.await.unwrap_or_else(|e| {
            DeploymentResult::failed(
                &modern_name,
                MODERN_PORT,
                format!("deployment task crashed: {}", e),
            )
        });

        (legacy, modern)
    }

    /// Lists containers this system manages, via `docker ps`.
    pub async fn list_containers(&self) -> Result<Vec<ContainerInfo>, std::io::Error> {
        let output = Command::new("docker")
            .args([
                "ps",
                "-a",
                "--filter",
                &format!("name={}", CONTAINER_PREFIX),
                "--format",
                "{{.Names}}|{{.Status}}|{{.Ports}}",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_container_listing(&stdout))
    }
}

fn parse_container_listing(stdout: &str) -> Vec<ContainerInfo> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.splitn(3, '|');
            ContainerInfo {
                name: parts.next().unwrap_or_default().to_string(),
                status: parts.next().unwrap_or_default().to_string(),
                ports: parts.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// Executes one deploy script and interprets the last stdout line as the
/// container id, matching the contract of the scripts.
async fn run_deploy_script(
    script: &Path,
    args: &[&str],
    container_name: &str,
    port: u16,
) -> DeploymentResult {
    tracing::debug!("Running deploy script {}", script.display());

    let output = match Command::new("bash")
        .arg(script)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) => {
            return DeploymentResult::failed(
                container_name,
                port,
                format!("failed to run {}: {}", script.display(), e),
            );
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return DeploymentResult::failed(
            container_name,
            port,
            format!(
                "script exited with {}: {}",
                output.status,
                stderr.trim()
            ),
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(container_id) => DeploymentResult::succeeded(
            container_name,
            port,
            container_id.trim().to_string(),
        ),
        None => DeploymentResult::failed(
            container_name,
            port,
            "script produced no container id".to_string(),
        ),
    }
}
