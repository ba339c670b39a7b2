use std::path::Path;

use anyhow::{Context, Result};
use prometheus::{Encoder, TextEncoder};
use tracing::info;

use crate::helpers::fs::write_atomic;
use crate::observability::metrics::get_metrics;

/// Render the registry in the text exposition format
pub async fn render() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = get_metrics().await.registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Failed to convert metrics to string")
}

/// Dump all metrics into a textfile-collector file
pub async fn write_textfile(path: &Path) -> Result<()> {
    let content = render().await?;
    write_atomic(path, content.as_bytes()).await?;
    info!("metrics written to '{}'", path.display());
    Ok(())
}
