//! Traffic gateway endpoints

use reqwest::Client;

use crate::error::Result;
use crate::handle_response;
use chrysalis_core::dto::gateway::{GatewayStatus, TrafficLock};

/// HTTP client for the traffic gateway's admin API.
///
/// The gateway mirrors requests to both the legacy and the modern service and
/// routes a weighted share of live traffic; its admin surface exposes the
/// shadow-traffic lock and the current weights.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// Base URL of the gateway (e.g., "http://localhost:8082")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a gateway client with a custom HTTP client, allowing timeouts,
    /// proxies and TLS settings to be configured.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the current shadow-traffic lock
    pub async fn traffic_lock(&self) -> Result<TrafficLock> {
        let url = format!("{}/admin/traffic-lock", self.base_url);
        let response = self.client.get(&url).send().await?;

        handle_response(response).await
    }

    /// Flip the shadow-traffic lock. `locked = false` releases traffic to the
    /// modern service.
    pub async fn set_traffic_lock(&self, locked: bool) -> Result<TrafficLock> {
        tracing::debug!("Setting shadow-traffic lock to {}", locked);

        let url = format!("{}/admin/traffic-lock", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TrafficLock { locked })
            .send()
            .await?;

        handle_response(response).await
    }

    /// Read the gateway's weight/lock telemetry
    pub async fn status(&self) -> Result<GatewayStatus> {
        let url = format!("{}/admin/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        handle_response(response).await
    }
}
