use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tax_ui::{
    client::HttpCalculationClient,
    csv_loader,
    form::DeclarationForm,
    form_file::FormFile,
    logging,
    render::FormView,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Business tax declaration form.
///
/// Loads a declaration from a TOML form file, sends it to the calculation
/// service and prints the tax under each scenario.
#[derive(Debug, Parser)]
#[command(name = "tax-declaration", version)]
struct Cli {
    /// Form file (TOML) with taxpayer, activities and profit/loss sections.
    form: PathBuf,

    /// CSV of activity rows; replaces the activities from the form file.
    #[arg(long)]
    activities: Option<PathBuf>,

    /// Base URL of the calculation service.
    #[arg(long, env = "TAX_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log filter, e.g. `debug` or `info,tax_ui=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logging(logging::DEFAULT_LEVEL);
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let mut form = DeclarationForm::new();
    FormFile::load(&cli.form)
        .with_context(|| format!("loading form {}", cli.form.display()))?
        .apply_to(&mut form);

    if let Some(path) = &cli.activities {
        let rows = csv_loader::load_from_file(path)
            .with_context(|| format!("loading activities from {}", path.display()))?;
        debug!(rows = rows.len(), "loaded activity rows");
        form.replace_activities(rows);
    }

    let client = HttpCalculationClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("building HTTP client")?;
    info!(url = client.calculate_url(), "calculating declaration");

    let succeeded = form.submit(&client).await.is_ok();
    print!("{}", FormView(&form));

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
