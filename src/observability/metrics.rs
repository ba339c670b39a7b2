use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Endpoint metrics
    pub endpoint_fetches: IntCounterVec,
    pub endpoint_retries: IntCounter,
    pub endpoint_fetch_duration: Histogram,
    pub endpoint_records: IntGaugeVec,

    // Token metrics
    pub token_refreshes: IntCounter,
    pub token_failures: IntCounter,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub last_completed_run: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("apiauditor".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Endpoint
            endpoint_fetches: IntCounterVec::new(Opts::new("endpoint_fetches_total", "Endpoint fetches by outcome"),&["outcome"],).unwrap(),
            endpoint_retries: IntCounter::new("endpoint_retries_total", "Retries issued after a 500 response").unwrap(),
            endpoint_fetch_duration: Histogram::with_opts(HistogramOpts::new("endpoint_fetch_duration_seconds", "Fetch duration seconds, retries included").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0, 60.0])).unwrap(),
            endpoint_records: IntGaugeVec::new(Opts::new("endpoint_records", "Records returned by the last fetch"),&["endpoint"],).unwrap(),

            // Token
            token_refreshes: IntCounter::new("token_refreshes_total", "Access token acquisitions").unwrap(),
            token_failures: IntCounter::new("token_failures_total", "Failed access token acquisitions").unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors during startup",).unwrap(),
            last_completed_run: IntGauge::new("last_completed_run_timestamp_seconds", "UNIX time of the last completed run").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.endpoint_fetches.clone())).unwrap();
        reg.register(Box::new(metrics.endpoint_retries.clone())).unwrap();
        reg.register(Box::new(metrics.endpoint_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.endpoint_records.clone())).unwrap();
        reg.register(Box::new(metrics.token_refreshes.clone())).unwrap();
        reg.register(Box::new(metrics.token_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.last_completed_run.clone())).unwrap();

        metrics
    }
}
