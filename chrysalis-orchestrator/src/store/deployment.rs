//! Deployment status store
//!
//! Single-slot record persisted as a JSON file so the outcome of a
//! fire-and-forget deployment survives the triggering request (and a process
//! restart). There is exactly one live slot: a new deployment request
//! overwrites the visible state of a prior one.

use std::path::PathBuf;
use std::sync::Arc;

use chrysalis_core::domain::deployment::DeploymentState;

#[derive(Debug, Clone)]
pub struct DeploymentStore {
    path: Arc<PathBuf>,
}

impl DeploymentStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
        }
    }

    /// Overwrites the slot. A failed write is logged, not escalated: the
    /// deployment itself already happened and must not be reported as failed
    /// because of a bookkeeping error.
    pub async fn save(&self, state: &DeploymentState) {
        let json = match serde_json::to_vec_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize deployment status: {}", e);
                return;
            }
        };

        if let Err(e) = tokio::fs::write(self.path.as_ref(), json).await {
            tracing::error!(
                "Failed to save deployment status to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Reads the slot. Absent or unparsable files both read as "no known
    /// deployment".
    pub async fn load(&self) -> Option<DeploymentState> {
        let data = tokio::fs::read(self.path.as_ref()).await.ok()?;
        serde_json::from_slice(&data).ok()
    }
}
