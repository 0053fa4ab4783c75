//! Shadow-traffic arbiter endpoints

use reqwest::Client;
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::{handle_empty_response, handle_response};
use chrysalis_core::dto::gateway::ArbiterStatus;

/// Envelope the arbiter wraps its telemetry in.
#[derive(Debug, Deserialize)]
struct ArbiterEnvelope {
    success: bool,
    data: Option<ArbiterStatus>,
    error: Option<String>,
}

/// HTTP client for the shadow-traffic arbiter.
///
/// The arbiter compares legacy and modern responses for mirrored traffic and
/// adjusts the gateway weight. This client only reads its telemetry and
/// resets its counters; the arbitration logic itself is external.
#[derive(Debug, Clone)]
pub struct ArbiterClient {
    /// Base URL of the arbiter (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ArbiterClient {
    /// Create a new arbiter client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create an arbiter client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the arbiter
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the arbiter's consistency telemetry
    pub async fn status(&self) -> Result<ArbiterStatus> {
        let url = format!("{}/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        let envelope: ArbiterEnvelope = handle_response(response).await?;
        if !envelope.success {
            return Err(ClientError::api_error(
                502,
                envelope
                    .error
                    .unwrap_or_else(|| "Arbiter reported failure".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::ParseError("Arbiter response had no data".to_string()))
    }

    /// Reset the arbiter's transaction counters
    pub async fn reset(&self) -> Result<()> {
        tracing::debug!("Resetting arbiter transaction counters");

        let url = format!("{}/reset", self.base_url);
        let response = self.client.post(&url).send().await?;

        handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ArbiterClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_envelope_parses_mock_payload() {
        let envelope: ArbiterEnvelope = serde_json::from_str(
            r#"{
                "success": true,
                "data": {
                    "php_weight": 0.9,
                    "python_weight": 0.1,
                    "consistency_score": 98.5,
                    "total_transactions": 200,
                    "matched_transactions": 197,
                    "migration_status": "shadowing",
                    "last_decision": "hold",
                    "last_decision_time": "2026-08-30T10:00:00Z"
                }
            }"#,
        )
        .unwrap();

        assert!(envelope.success);
        let status = envelope.data.unwrap();
        assert_eq!(status.total_transactions, 200);
        assert_eq!(status.migration_status, "shadowing");
    }
}
