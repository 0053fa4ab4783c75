//! Chrysalis collaborator clients
//!
//! Type-safe HTTP clients for the two external collaborators of the
//! migration orchestrator: the traffic gateway (shadow-traffic lock and
//! weight telemetry) and the arbiter (response-consistency telemetry).
//!
//! Both services are opaque remote collaborators. Callers are expected to
//! tolerate their unavailability: every method returns a [`ClientError`] that
//! the orchestrator downgrades to a warning plus a fallback body.
//!
//! # Example
//!
//! ```no_run
//! use chrysalis_client::GatewayClient;
//!
//! #[tokio::main]
//! async fn main() -> chrysalis_client::Result<()> {
//!     let gateway = GatewayClient::new("http://localhost:8082");
//!
//!     // Release the shadow-traffic lock after a successful dual deployment.
//!     gateway.set_traffic_lock(false).await?;
//!     Ok(())
//! }
//! ```

mod arbiter;
pub mod error;
mod gateway;

pub use arbiter::ArbiterClient;
pub use error::{ClientError, Result};
pub use gateway::GatewayClient;

use serde::de::DeserializeOwned;

/// Handle an API response and deserialize JSON.
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Handle an API response whose body is irrelevant (e.g. reset calls).
pub(crate) async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(())
}
