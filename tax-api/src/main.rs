use anyhow::Context;
use clap::Parser;
use tax_api::{AppState, ServerConfig, create_router};
use tax_core::TaxYearConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` with request spans from `tower_http`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::from("info,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::parse();
    let tax_year = TaxYearConfig::year_1404();
    info!(tax_year = tax_year.tax_year, "loaded tax regulations");

    let router = create_router(AppState::new(tax_year), &config)?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("listening on http://{address}");
    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
