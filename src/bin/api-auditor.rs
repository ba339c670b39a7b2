use std::time::Duration;

use anyhow::Result;
use api_auditor::endpoints::catalog::load_endpoints;
use api_auditor::observability::textfile::write_textfile;
use api_auditor::report::reporter::RunReporter;
use api_auditor::utils::config_loader;
use api_auditor::utils::logging;
use api_auditor::utils::logging::LogLevel;
use api_auditor::AuditError;
use clap::Parser;
use reqwest::Client;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "api-auditor.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level.to_owned());

    // -------------------------------
    // 2. Read endpoint list
    // -------------------------------

    let endpoints = load_endpoints(&service_config.paths.endpoints, &service_config.segments).await?;
    info!("{} endpoints to audit", endpoints.len());

    // -------------------------------
    // 3. Create request client
    // -------------------------------

    let client = Client::builder()
        .timeout(Duration::from_millis(service_config.settings.http_timeout_ms))
        .build()?;

    // -------------------------------
    // 4. Run
    // -------------------------------

    let mut reporter = RunReporter::from_config(client, endpoints, &service_config);
    let summary = reporter.run().await.inspect_err(|err| {
        match err.downcast_ref::<AuditError>() {
            Some(AuditError::Authentication { status, .. }) => {
                error!("authentication failed with status {}, run aborted", status)
            }
            _ => error!("run aborted: {:#}", err),
        }
    })?;

    info!(
        "run '{}' done: {} endpoints, {} failed, previous run '{}'",
        summary.run_timestamp,
        summary.rows.len(),
        summary.failed(),
        summary.last_run
    );

    // -------------------------------
    // 5. Export metrics
    // -------------------------------

    if let Some(textfile) = &service_config.settings.metrics.textfile {
        if let Err(err) = write_textfile(textfile).await {
            warn!("metrics textfile not written: {:#}", err);
        }
    }

    Ok(())
}
