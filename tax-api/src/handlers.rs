use axum::{extract::State, response::Json};
use chrono::Local;
use tax_core::{DeclarationCalculator, DeclarationRequest};
use tracing::{debug, info, instrument};

use crate::{
    error::{ApiError, ApiJson},
    schemas::{
        AppState, CalculationResponse, HealthResponse, RegulationsResponse, TaxpayerIdentity,
        ValidationResponse,
    },
};

/// Health check endpoint
#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "working".to_string(),
        message: "Declaration calculator is ready".to_string(),
    })
}

/// Calculate a complete declaration
///
/// Runs the calculator over the submitted activities and profit/loss
/// figures and returns the report with all three tax scenarios.
#[instrument(skip_all)]
pub async fn calculate_declaration(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DeclarationRequest>,
) -> Result<Json<CalculationResponse>, ApiError> {
    debug!(
        taxpayer_id = %request.taxpayer_id,
        activities = request.activities.len(),
        "calculating declaration"
    );

    let report =
        DeclarationCalculator::from_request((*state.tax_year).clone(), &request).generate_report()?;

    info!(
        taxpayer_id = %request.taxpayer_id,
        taxable_income = report.deductions_and_exemptions.taxable_income,
        "declaration calculated"
    );

    Ok(Json(CalculationResponse {
        status: "success".to_string(),
        timestamp: Local::now(),
        taxpayer: TaxpayerIdentity {
            name: request.taxpayer_name,
            id: request.taxpayer_id,
        },
        data: report,
    }))
}

/// Current tax regulations
#[instrument(skip_all)]
pub async fn get_tax_regulations(State(state): State<AppState>) -> Json<RegulationsResponse> {
    Json(RegulationsResponse::from(state.tax_year.as_ref()))
}

/// Validate input data without calculating
#[instrument(skip_all)]
pub async fn validate_input_data(
    ApiJson(request): ApiJson<DeclarationRequest>,
) -> Result<Json<ValidationResponse>, ApiError> {
    request
        .validate_for_submit()
        .map_err(ApiError::Validation)?;

    Ok(Json(ValidationResponse {
        status: "valid".to_string(),
        message: "Input data is valid".to_string(),
    }))
}
