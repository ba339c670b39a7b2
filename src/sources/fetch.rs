use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::token_manager::TokenManager;
use crate::error::AuditError;
use crate::observability::metrics::get_metrics;
use crate::resilience::retry::RetryPolicy;

static SUCCESS_MSG: &'static str = "success";
static HTTP_ERROR_MSG: &'static str = "http_error";
static TRANSPORT_ERROR_MSG: &'static str = "transport_error";

/// Result of one endpoint fetch, retries included
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { item_count: usize },
    HttpError { status: u16, body: String },
    /// no HTTP response at all, `detail` is the transport error text
    TransportError { detail: String },
}

#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// Authenticated GET with retries on HTTP 500 only
#[derive(Debug)]
pub struct ResilientFetcher {
    client: Client,
    tokens: TokenManager,
    retry: RetryPolicy,
}

impl ResilientFetcher {
    pub fn new(client: Client, tokens: TokenManager, retry: RetryPolicy) -> Self {
        Self { client, tokens, retry }
    }

    /// Fetch `url` and normalize whatever happens into a [`FetchOutcome`].
    ///
    /// The only error is a failed token acquisition, which is fatal for the run.
    pub async fn fetch(&mut self, url: &str) -> Result<FetchOutcome, AuditError> {
        let metrics = get_metrics().await;
        let start = Instant::now();

        let client = &self.client;
        let tokens = &self.tokens;
        let mut attempt = 0u32;
        // the token is checked before every attempt, backoff may outlive it
        let response = self
            .retry
            .run_with_retry(
                || {
                    attempt += 1;
                    if attempt > 1 {
                        metrics.endpoint_retries.inc();
                    }
                    debug!("GET '{}' attempt {}", url, attempt);
                    async move {
                        let token = tokens.get_valid_token().await?;
                        Ok::<_, AuditError>(send(client, url, &token.bearer()).await)
                    }
                },
                |response| {
                    matches!(response, Ok(raw) if raw.status == StatusCode::INTERNAL_SERVER_ERROR)
                },
            )
            .await?;
        metrics
            .endpoint_fetch_duration
            .observe(start.elapsed().as_secs_f64());

        let outcome = match response {
            Ok(response) => classify(response),
            Err(err) => {
                warn!("Request failed: {}", err);
                FetchOutcome::TransportError {
                    detail: err.to_string(),
                }
            }
        };

        let label = match &outcome {
            FetchOutcome::Success { .. } => SUCCESS_MSG,
            FetchOutcome::HttpError { .. } => HTTP_ERROR_MSG,
            FetchOutcome::TransportError { .. } => TRANSPORT_ERROR_MSG,
        };
        metrics.endpoint_fetches.with_label_values(&[label]).inc();
        Ok(outcome)
    }
}

async fn send(client: &Client, url: &str, bearer: &str) -> Result<RawResponse, reqwest::Error> {
    let response = client.get(url).header(AUTHORIZATION, bearer).send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok(RawResponse { status, body })
}

fn classify(response: RawResponse) -> FetchOutcome {
    let status = response.status;
    if status != StatusCode::OK && status != StatusCode::CREATED {
        return FetchOutcome::HttpError {
            status: status.as_u16(),
            body: response.body,
        };
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Array(items)) => FetchOutcome::Success {
            item_count: items.len(),
        },
        Ok(other) => FetchOutcome::HttpError {
            status: status.as_u16(),
            body: format!("response body is not a JSON array: got {}", json_kind(&other)),
        },
        Err(err) => FetchOutcome::HttpError {
            status: status.as_u16(),
            body: format!("response body is not a JSON array: {}", err),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
