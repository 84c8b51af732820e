use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::{ConfigError, ServerConfig},
    handlers::{calculate_declaration, get_tax_regulations, health_check, validate_input_data},
    schemas::AppState,
};

/// Create application router with all routes and middleware
pub fn create_router(
    state: AppState,
    config: &ServerConfig,
) -> Result<Router, ConfigError> {
    let router = Router::new()
        .route("/", get(health_check))
        .route("/api/v1/calculate", post(calculate_declaration))
        .route("/api/v1/tax-regulations", get(get_tax_regulations))
        .route("/api/v1/validate-data", post(validate_input_data))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(config.cors_layer()?)
        .with_state(state);

    Ok(router)
}
