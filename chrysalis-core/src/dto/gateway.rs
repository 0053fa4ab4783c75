//! Traffic gateway and shadow-traffic arbiter DTOs
//!
//! These describe the wire shapes of an external collaborator. The arbiter
//! keeps its own snake_case field names; nothing here is computed locally.

use serde::{Deserialize, Serialize};

/// The gateway's shadow-traffic lock. Locked means only legacy receives
/// traffic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrafficLock {
    pub locked: bool,
}

/// Gateway weight/lock telemetry: `GET /gateway/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    pub php_weight: f64,
    pub python_weight: f64,
    pub traffic_locked: bool,
}

impl GatewayStatus {
    /// Fallback body served when the gateway is unreachable: everything
    /// pinned to legacy.
    pub fn unavailable() -> Self {
        Self {
            php_weight: 0.0,
            python_weight: 0.0,
            traffic_locked: true,
        }
    }
}

/// Arbiter consistency telemetry: `GET /arbiter/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbiterStatus {
    pub php_weight: f64,
    pub python_weight: f64,
    pub consistency_score: f64,
    pub total_transactions: u64,
    pub matched_transactions: u64,
    pub migration_status: String,
    pub last_decision: String,
    pub last_decision_time: String,
}

impl ArbiterStatus {
    /// Fallback body served when the arbiter is unreachable.
    pub fn unavailable() -> Self {
        Self {
            php_weight: 0.0,
            python_weight: 0.0,
            consistency_score: 100.0,
            total_transactions: 0,
            matched_transactions: 0,
            migration_status: "pending".to_string(),
            last_decision: "none".to_string(),
            last_decision_time: String::new(),
        }
    }
}
