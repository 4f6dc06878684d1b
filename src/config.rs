//! Service Configuration
//!
//! Everything the binary needs is read from the environment once at startup;
//! nothing else in the crate touches environment variables.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Runtime configuration for the search service.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Base URL of the content store, without a trailing slash.
    pub store_url: String,
    pub service_key: String,
    /// Per-request timeout for all outbound store calls.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url = required("CONTENT_STORE_URL")?;
        let service_key = required("SERVICE_ROLE_KEY")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let request_timeout_ms = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_MS",
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            bind_addr,
            store_url: store_url.trim_end_matches('/').to_string(),
            service_key,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}
