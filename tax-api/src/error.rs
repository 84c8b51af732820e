use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tax_core::CalculationError;
use thiserror::Error;
use tracing::warn;

use crate::schemas::{ErrorDetail, ErrorResponse};

/// Errors returned by the HTTP handlers. Every variant renders as a JSON
/// body with a `detail` field.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The calculator rejected the declaration.
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Input failed validation; one message per failed rule.
    #[error("validation failed: {}", .0.join(" | "))]
    Validation(Vec<String>),

    /// The body was not a well-formed declaration.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "request failed");

        let (status, detail) = match self {
            Self::Calculation(_) => (StatusCode::BAD_REQUEST, ErrorDetail::Message(message)),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::Messages(errors),
            ),
            Self::InvalidBody(body) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::Messages(vec![body]),
            ),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
