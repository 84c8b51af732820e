use std::time::Duration;

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Declaration calculation service.
///
/// Every option can also be supplied through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "tax-api", version, about, long_about = None)]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "TAX_API_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "TAX_API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origin allowed to call the API from a browser. Repeat the flag (or
    /// comma-separate the environment variable) for several origins.
    #[arg(
        long = "allowed-origin",
        env = "TAX_API_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = ["http://localhost:3000", "http://localhost:5173"]
    )]
    pub allowed_origins: Vec<String>,

    /// Upper bound on handling a single request, in seconds.
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// CORS policy admitting the configured origins with any method or header.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim()).map_err(|e| ConfigError::InvalidOrigin {
                    origin: origin.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    }
}
