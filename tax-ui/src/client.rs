//! HTTP client for the declaration calculation service.
//!
//! The form talks to the service through [`CalculationService`] so it can
//! be driven by a stub in tests. [`HttpCalculationClient`] is the real
//! implementation: one POST per call, bounded by a transport timeout, no
//! retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tax_core::DeclarationRequest;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::CalculationResult;

/// Timeout applied to each calculation request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const CALCULATE_PATH: &str = "/api/v1/calculate";

/// Separator used when the service reports several problems at once.
pub const DETAIL_SEPARATOR: &str = " | ";

/// Why a calculation request did not produce a result. The `Display` form
/// is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with an error status and an explanation.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// No usable answer: connection failure, timeout, unreadable body, or an
    /// error status without a `detail`.
    #[error("{0}")]
    Transport(String),
}

#[async_trait]
pub trait CalculationService: Send + Sync {
    async fn calculate(
        &self,
        request: &DeclarationRequest,
    ) -> Result<CalculationResult, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Value,
}

/// Text of one entry of a list-valued `detail`. Validation frameworks send
/// objects carrying a `msg`.
fn entry_message(entry: Value) -> Option<String> {
    match entry {
        Value::String(text) => Some(text),
        Value::Object(mut fields) => match fields.remove("msg") {
            Some(Value::String(msg)) => Some(msg),
            _ => None,
        },
        _ => None,
    }
}

/// Extracts the user-facing message from an error response body.
///
/// Returns `None` when the body is not JSON or its `detail` holds no text
/// (`null`, booleans, numbers, bare objects), so the caller falls back to
/// its own message.
pub fn error_detail(body: &str) -> Option<String> {
    let message = match serde_json::from_str::<ErrorBody>(body).ok()?.detail {
        Value::String(message) => message,
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(entry_message)
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join(DETAIL_SEPARATOR),
        _ => return None,
    };
    (!message.is_empty()).then_some(message)
}

/// [`CalculationService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCalculationClient {
    client: Client,
    calculate_url: String,
    timeout: Duration,
}

impl HttpCalculationClient {
    /// Creates a client for the service rooted at `base_url`
    /// (e.g. `http://localhost:8000`).
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            calculate_url: format!("{}{}", base_url.trim_end_matches('/'), CALCULATE_PATH),
            timeout,
        })
    }

    pub fn calculate_url(&self) -> &str {
        &self.calculate_url
    }

    fn transport_error(
        &self,
        error: reqwest::Error,
    ) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Transport(format!(
                "timeout of {}ms exceeded",
                self.timeout.as_millis()
            ))
        } else {
            ServiceError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl CalculationService for HttpCalculationClient {
    async fn calculate(
        &self,
        request: &DeclarationRequest,
    ) -> Result<CalculationResult, ServiceError> {
        debug!(url = %self.calculate_url, "sending calculation request");

        let response = self
            .client
            .post(&self.calculate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<CalculationResult>()
                .await
                .map_err(|e| self.transport_error(e));
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "calculation service returned an error");

        match error_detail(&body) {
            Some(detail) => Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail,
            }),
            None => Err(ServiceError::Transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            ))),
        }
    }
}
