//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles endpoints for a specific domain.

pub mod deploy;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod health;
pub mod job;
pub mod upload;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/jobs", post(job::submit_job))
        .route("/jobs", get(job::query_jobs))
        // Upload endpoints
        .route("/upload", post(upload::upload_files))
        .route("/upload", get(upload::get_upload))
        // Deployment endpoints
        .route("/deploy", post(deploy::request_deploy))
        .route("/deploy", get(deploy::deploy_status))
        // Gateway and arbiter proxies
        .route("/gateway/traffic-lock", get(gateway::get_traffic_lock))
        .route("/gateway/traffic-lock", post(gateway::set_traffic_lock))
        .route("/gateway/status", get(gateway::gateway_status))
        .route("/arbiter/status", get(gateway::arbiter_status))
        .route("/arbiter/reset", post(gateway::arbiter_reset))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
