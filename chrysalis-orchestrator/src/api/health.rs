//! Health Check Handler

use axum::Json;

/// GET /health
/// Liveness probe for the orchestrator itself.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "chrysalis-orchestrator"
    }))
}
