// src/tests/common/mod.rs
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::json;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::config::audit::ServiceConfig;
use crate::config::proc_loader::parse_config;
use crate::resilience::retry::RetryPolicy;
use crate::sources::oauth2::Credentials;

pub const TOKEN_PATH: &str = "/oauth/token";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn credentials(token_url: &str) -> Credentials {
    Credentials {
        token_url: token_url.to_owned(),
        api_key: "key".to_owned(),
        api_secret: "secret".to_owned(),
    }
}

/// Retry policy that never really sleeps
pub fn fast_retry(attempts: u32) -> RetryPolicy {
    RetryPolicy {
        attempts,
        backoff_factor: 2.0,
        unit: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

/// Token endpoint issuing `token-1`, `token-2`, ... and counting requests
pub fn token_route(router: Router, issued: Arc<AtomicUsize>) -> Router {
    router.route(
        TOKEN_PATH,
        post(move || {
            let issued = issued.clone();
            async move {
                let n = issued.fetch_add(1, Ordering::SeqCst) + 1;
                Json(json!({"access_token": format!("token-{}", n), "token_type": "bearer", "expires_in": 1800}))
            }
        }),
    )
}

/// Config pointing at a test server, every path inside `dir`, no delays
pub async fn service_config(dir: &Path, base_url: &str, token_url: &str) -> ServiceConfig {
    let yaml = format!(
        r#"
settings:
  base_url: "{base_url}"
  endpoint_delay_ms: 0
  retry:
    attempts: 5
    backoff_factor: 2.0
    backoff_unit_ms: 0
    max_backoff_ms: 0
auth:
  token_url: "{token_url}"
  api_key: key
  api_secret: secret
"#
    );
    parse_config(yaml, dir).await.expect("valid test config")
}
