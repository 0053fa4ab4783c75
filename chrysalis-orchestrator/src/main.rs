use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod service;
pub mod stages;
pub mod state;
pub mod store;

#[cfg(test)]
pub mod testutil;

use chrysalis_client::{ArbiterClient, GatewayClient};

use crate::service::deployment::DeploymentCoordinator;
use crate::stages::http::HttpStageProvider;
use crate::state::AppState;
use crate::store::deployment::DeploymentStore;
use crate::store::job::JobStore;
use crate::store::upload::UploadStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chrysalis_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Chrysalis Orchestrator...");

    let config = config::Config::from_env();
    config.validate().expect("Invalid configuration");

    let gateway = GatewayClient::new(&config.gateway_url);
    let arbiter = ArbiterClient::new(&config.arbiter_url);

    let jobs = JobStore::with_retention(config.job_retention);
    let uploads = UploadStore::new();
    let deployments = DeploymentStore::new(config.status_file.clone());

    let coordinator = DeploymentCoordinator::new(
        config.scripts_dir.clone(),
        deployments.clone(),
        Arc::new(gateway.clone()),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        jobs,
        uploads,
        deployments,
        coordinator,
        stages: Arc::new(HttpStageProvider::new(&config.agents_url)),
        gateway,
        arbiter,
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
