//! VMware Cloud Services authentication
//!
//! Exchanges a long-lived API token for a short-lived access token at the
//! CSP gateway, caching the access token until shortly before it expires.

use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::http::ClientError;

/// Path of the CSP token-exchange endpoint.
const AUTHORIZE_PATH: &str = "csp/gateway/am/api/auth/api-tokens/authorize";

/// Token expiry buffer - refresh tokens this much before they actually expire
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Fallback TTL when the exchange response omits `expires_in`
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// CSP credentials holder with access-token caching
#[derive(Clone)]
pub struct CspCredentials {
    client: reqwest::Client,
    csp_endpoint: String,
    api_token: String,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

impl CspCredentials {
    /// Create credentials against a CSP endpoint, e.g. `https://console.cloud.vmware.com`.
    pub fn new(csp_endpoint: &str, api_token: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tmc-provider/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            csp_endpoint: csp_endpoint.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get an access token for API calls, exchanging the API token when the
    /// cached one is absent or about to expire.
    pub async fn get_token(&self) -> Result<String, ClientError> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("cached access token expired, exchanging API token");
            }
        }

        let url = format!("{}/{}", self.csp_endpoint, AUTHORIZE_PATH);

        let response = self
            .client
            .post(&url)
            .query(&[("refresh_token", self.api_token.as_str())])
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: "token exchange failed".to_string(),
            });
        }

        let authorized: AuthorizeResponse =
            response.json().await.map_err(ClientError::Request)?;

        let ttl = authorized
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);
        let expires_at = Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: authorized.access_token.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "new access token cached, expires in ~{} minutes",
            ttl.saturating_sub(TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(authorized.access_token)
    }

    /// Drop the cached token and fetch a fresh one.
    pub async fn refresh_token(&self) -> Result<String, ClientError> {
        {
            let mut cache = self.token_cache.write().await;
            *cache = None;
        }

        self.get_token().await
    }
}
