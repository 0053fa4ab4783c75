//! Orchestrator configuration
//!
//! All external locations (gateway, arbiter, stage agents, deploy scripts)
//! and the job retention window come from environment variables with
//! single-host defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to
    pub bind_addr: String,

    /// Traffic gateway base URL (e.g., "http://localhost:8082")
    pub gateway_url: String,

    /// Shadow-traffic arbiter base URL (e.g., "http://localhost:5000")
    pub arbiter_url: String,

    /// Base URL of the stage-agent service backing the pipeline stages
    pub agents_url: String,

    /// Directory holding deploy-legacy.sh / deploy-modern.sh
    pub scripts_dir: PathBuf,

    /// Directory packaged migration bundles are written to
    pub output_dir: PathBuf,

    /// Path of the single-slot deployment status record
    pub status_file: PathBuf,

    /// How long terminal jobs stay queryable after completion
    pub job_retention: Duration,
}

impl Config {
    /// Creates configuration from environment variables, falling back to
    /// local-development defaults.
    ///
    /// Recognized variables: BIND_ADDR, GATEWAY_URL, ARBITER_URL, AGENTS_URL,
    /// SCRIPTS_DIR, OUTPUT_DIR, STATUS_FILE, JOB_RETENTION_SECS.
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let gateway_url =
            std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:8082".to_string());

        let arbiter_url =
            std::env::var("ARBITER_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let agents_url =
            std::env::var("AGENTS_URL").unwrap_or_else(|_| "http://localhost:3100".to_string());

        let scripts_dir = std::env::var("SCRIPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("scripts"));

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output"));

        let status_file = std::env::var("STATUS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("deployment-status.json"));

        let job_retention = std::env::var("JOB_RETENTION_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30 * 60));

        Self {
            bind_addr,
            gateway_url,
            arbiter_url,
            agents_url,
            scripts_dir,
            output_dir,
            status_file,
            job_retention,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("GATEWAY_URL", &self.gateway_url),
            ("ARBITER_URL", &self.arbiter_url),
            ("AGENTS_URL", &self.agents_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{} must start with http:// or https://", name));
            }
        }

        if self.bind_addr.is_empty() {
            return Err("bind_addr cannot be empty".to_string());
        }

        if self.job_retention.is_zero() {
            return Err("job_retention must be greater than 0".to_string());
        }

        Ok(())
    }
}
