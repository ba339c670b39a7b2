use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::audit::AuthConfig;
use crate::error::AuditError;
use crate::utils::constants::GRANT_TYPE_CLIENT_CREDENTIALS;

/// Client-credentials pair, immutable for the process lifetime
#[derive(Clone)]
pub struct Credentials {
    pub token_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl From<&AuthConfig> for Credentials {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            token_url: auth.token_url.clone(),
            api_key: auth.api_key.clone(),
            api_secret: auth.api_secret.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token_url", &self.token_url)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct OAuth2Source {
    pub credentials: Credentials,
    pub client: Client,
}

impl OAuth2Source {
    pub fn new(client: Client, credentials: Credentials) -> Self {
        Self { credentials, client }
    }

    /// Exchange key + secret for a bearer token value.
    /// Only a 200 response is accepted, nothing is retried here.
    pub async fn fetch_token(&self) -> Result<String, AuditError> {
        debug!("requesting access token from '{}'", self.credentials.token_url);
        let response = self
            .client
            .post(&self.credentials.token_url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .form(&[("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            error!("OAuth2 token request failed: {}", status);
            return Err(AuditError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.access_token)
    }
}
