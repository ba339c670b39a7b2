use std::path::PathBuf;

use anyhow::Result;
use reqwest::Client;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::cache::token_manager::TokenManager;
use crate::config::audit::{PathsConfig, SegmentsConfig, ServiceConfig};
use crate::config::settings::RetryConfig;
use crate::endpoints::catalog::EndpointSpec;
use crate::helpers::time::{now_i64, run_timestamp};
use crate::observability::metrics::get_metrics;
use crate::report::row::{ReportRow, RowStatus};
use crate::resilience::retry::RetryPolicy;
use crate::sinks::csv_sink::CsvSink;
use crate::sinks::manager::SinkManager;
use crate::sinks::run_marker::RunMarker;
use crate::sources::fetch::ResilientFetcher;
use crate::sources::oauth2::Credentials;
use crate::utils::constants::{ARCHIVE_FILE_PREFIX, LATEST_SNAPSHOT_FILE};

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_timestamp: String,
    pub last_run: String,
    pub archive_path: PathBuf,
    pub rows: Vec<ReportRow>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|row| row.status == RowStatus::Failed).count()
    }
}

/// Drives one audit run over the endpoint list
pub struct RunReporter {
    fetcher: ResilientFetcher,
    endpoints: Vec<EndpointSpec>,
    base_url: String,
    segments: SegmentsConfig,
    paths: PathsConfig,
    endpoint_delay: Duration,
}

impl RunReporter {
    pub fn new(
        fetcher: ResilientFetcher,
        endpoints: Vec<EndpointSpec>,
        service_config: &ServiceConfig,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            base_url: service_config.settings.base_url.clone(),
            segments: service_config.segments.clone(),
            paths: service_config.paths.clone(),
            endpoint_delay: Duration::from_millis(service_config.settings.endpoint_delay_ms),
        }
    }

    /// Wire token manager, fetcher and reporter from the service config
    pub fn from_config(
        client: Client,
        endpoints: Vec<EndpointSpec>,
        service_config: &ServiceConfig,
    ) -> Self {
        let tokens = TokenManager::new(
            client.clone(),
            Credentials::from(&service_config.auth),
            service_config.auth.token_lifetime_seconds,
        );
        let retry = service_config
            .settings
            .retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_else(|| RetryPolicy::from(&RetryConfig::default()));
        let fetcher = ResilientFetcher::new(client, tokens, retry);
        Self::new(fetcher, endpoints, service_config)
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        self.run_at(run_timestamp()).await
    }

    /// Full run stamped with `current_run`: reports to both CSV files, then
    /// replaces the run marker. The marker stays untouched if anything fails.
    pub async fn run_at(&mut self, current_run: String) -> Result<RunSummary> {
        let marker = RunMarker::new(&self.paths.last_run_file);
        let last_run = marker.read().await?;
        info!("run '{}' starting, last run '{}'", current_run, last_run);

        let archive_path = self
            .paths
            .exports_dir
            .join(format!("{}{}.csv", ARCHIVE_FILE_PREFIX, current_run));
        let latest_path = self.paths.visualization_dir.join(LATEST_SNAPSHOT_FILE);
        let mut sinks = SinkManager::new(
            Box::new(CsvSink::create(&archive_path)?),
            Box::new(CsvSink::create(&latest_path)?),
        );

        let rows = self.report(&mut sinks, &current_run, &last_run).await?;

        marker.replace(&current_run).await?;
        get_metrics().await.last_completed_run.set(now_i64());
        info!("run '{}' finished, archive '{}'", current_run, archive_path.display());

        Ok(RunSummary {
            run_timestamp: current_run,
            last_run,
            archive_path,
            rows,
        })
    }

    /// Fetch every endpoint in list order and write one row per endpoint to `sinks`
    pub async fn report(
        &mut self,
        sinks: &mut SinkManager,
        current_run: &str,
        last_run: &str,
    ) -> Result<Vec<ReportRow>> {
        let metrics = get_metrics().await;
        sinks.write_headers(current_run, last_run)?;

        let mut rows = Vec::with_capacity(self.endpoints.len());
        for (index, endpoint) in self.endpoints.iter().enumerate() {
            // rate limit of our own, not a server signal
            if index > 0 && !self.endpoint_delay.is_zero() {
                sleep(self.endpoint_delay).await;
            }

            let url = endpoint.url(&self.base_url, &self.segments);
            let outcome = self.fetcher.fetch(&url).await?;
            let row = ReportRow::from_outcome(url, &outcome);
            sinks.write_report_row(&row)?;

            if row.status == RowStatus::Success {
                metrics
                    .endpoint_records
                    .with_label_values(&[row.endpoint_url.as_str()])
                    .set(row.record_count as i64);
            }
            info!(
                endpoint = %row.endpoint_url,
                status = %row.status,
                record_count = row.record_count,
                message = %row.message,
                "endpoint processed"
            );
            rows.push(row);
        }
        Ok(rows)
    }
}
