use reqwest::Client;
use tokio::sync::Mutex;
use tracing::info;

use crate::cache::token::AccessToken;
use crate::error::AuditError;
use crate::helpers::time::now_i64;
use crate::observability::metrics::get_metrics;
use crate::sources::oauth2::{Credentials, OAuth2Source};

/// Owns the single access token of a run and renews it lazily.
///
/// The lock is held across a refresh, so concurrent callers never trigger
/// two token requests for the same expiry.
#[derive(Debug)]
pub struct TokenManager {
    source: OAuth2Source,
    lifetime_seconds: i64,
    token: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(client: Client, credentials: Credentials, lifetime_seconds: u64) -> Self {
        Self {
            source: OAuth2Source::new(client, credentials),
            lifetime_seconds: i64::try_from(lifetime_seconds).unwrap_or(i64::MAX),
            token: Mutex::new(None),
        }
    }

    /// Cached token while `now < expires_at`, a freshly acquired one otherwise
    pub async fn get_valid_token(&self) -> Result<AccessToken, AuditError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_valid_at(now_i64())) {
            return Ok(token.clone());
        }

        let token = self.refresh().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    pub async fn cached(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    async fn refresh(&self) -> Result<AccessToken, AuditError> {
        let metrics = get_metrics().await;
        let value = self
            .source
            .fetch_token()
            .await
            .inspect_err(|_| metrics.token_failures.inc())?;

        // server TTL is not read, the configured lifetime approximates it
        let token = AccessToken::new(value, now_i64().saturating_add(self.lifetime_seconds));
        metrics.token_refreshes.inc();
        info!("Successfully retrieved access token, expires at {}", token.expires_at);
        Ok(token)
    }
}
