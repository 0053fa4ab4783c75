//! Shared application state
//!
//! Everything handlers need, cloned cheaply into each request. The stores are
//! the only shared mutable resources; background tasks write into them
//! through their own clones.

use std::sync::Arc;

use chrysalis_client::{ArbiterClient, GatewayClient};

use crate::config::Config;
use crate::service::deployment::DeploymentCoordinator;
use crate::stages::StageProvider;
use crate::store::deployment::DeploymentStore;
use crate::store::job::JobStore;
use crate::store::upload::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jobs: JobStore,
    pub uploads: UploadStore,
    pub deployments: DeploymentStore,
    pub coordinator: DeploymentCoordinator,
    pub stages: Arc<dyn StageProvider>,
    pub gateway: GatewayClient,
    pub arbiter: ArbiterClient,
}
