//! Gateway and Arbiter Proxy Handlers
//!
//! Thin proxies in front of the traffic gateway and the shadow-traffic
//! arbiter so the UI talks to a single origin. Reads degrade to safe
//! fallback bodies when the collaborator is unreachable (everything pinned
//! to legacy); writes surface the unavailability instead, because silently
//! dropping a lock change would be worse than failing loudly.

use axum::{Json, extract::State};

use chrysalis_core::dto::gateway::{ArbiterStatus, GatewayStatus, TrafficLock};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::JsonBody;
use crate::state::AppState;

/// GET /gateway/traffic-lock
/// Current lock state; an unreachable gateway reads as locked.
pub async fn get_traffic_lock(State(state): State<AppState>) -> Json<TrafficLock> {
    match state.gateway.traffic_lock().await {
        Ok(lock) => Json(lock),
        Err(e) => {
            tracing::warn!("Gateway unreachable, reporting locked: {}", e);
            Json(TrafficLock { locked: true })
        }
    }
}

/// POST /gateway/traffic-lock
/// Set the lock. Failures propagate as 503.
pub async fn set_traffic_lock(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TrafficLock>,
) -> ApiResult<Json<TrafficLock>> {
    let lock = state
        .gateway
        .set_traffic_lock(req.locked)
        .await
        .map_err(|e| ApiError::Unavailable(format!("Gateway unavailable: {}", e)))?;

    tracing::info!("Traffic lock set to {}", lock.locked);
    Ok(Json(lock))
}

/// GET /gateway/status
/// Gateway weight telemetry; unreachable reads as zero-weight and locked.
pub async fn gateway_status(State(state): State<AppState>) -> Json<GatewayStatus> {
    match state.gateway.status().await {
        Ok(status) => Json(status),
        Err(e) => {
            tracing::warn!("Gateway unreachable, serving fallback status: {}", e);
            Json(GatewayStatus::unavailable())
        }
    }
}

/// Envelope the UI expects around arbiter telemetry.
#[derive(Debug, serde::Serialize)]
pub struct ArbiterStatusResponse {
    pub success: bool,
    pub data: ArbiterStatus,
}

/// GET /arbiter/status
/// Arbiter consistency telemetry; unreachable reads as a pristine pending
/// migration.
pub async fn arbiter_status(State(state): State<AppState>) -> Json<ArbiterStatusResponse> {
    match state.arbiter.status().await {
        Ok(data) => Json(ArbiterStatusResponse {
            success: true,
            data,
        }),
        Err(e) => {
            tracing::warn!("Arbiter unreachable, serving fallback status: {}", e);
            Json(ArbiterStatusResponse {
                success: true,
                data: ArbiterStatus::unavailable(),
            })
        }
    }
}

/// POST /arbiter/reset
/// Reset the arbiter's counters. Failures propagate as 503.
pub async fn arbiter_reset(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    state
        .arbiter
        .reset()
        .await
        .map_err(|e| ApiError::Unavailable(format!("Arbiter unavailable: {}", e)))?;

    tracing::info!("Arbiter counters reset");
    Ok(Json(serde_json::json!({ "success": true })))
}
