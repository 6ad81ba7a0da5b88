//! HTTP transport for TMC REST API calls

use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} bytes total]", &body[..MAX_LOG_BODY_LENGTH], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Error taxonomy for API calls.
///
/// Callers branch on [`ClientError::is_not_found`]: not-found drives
/// idempotent delete and refresh-time state pruning, everything else is a
/// hard failure.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The remote resource does not exist (HTTP 404).
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// Any other non-2xx response.
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    /// Required identifying fields were missing before a request was built.
    /// Detected locally; no network call was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse response JSON")]
    Decode(#[source] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Builds request URLs from a base endpoint, fixed API paths, identifier
/// segments, and query parameters.
///
/// Fixed paths (`path`) are trusted constants and appended verbatim;
/// identifier segments (`segment`) carry caller data and are percent-encoded.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    path: String,
    query: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            path: base.trim_end_matches('/').to_string(),
            query: Vec::new(),
        }
    }

    /// Append a fixed API path such as `v1alpha1/clusters`.
    pub fn path(mut self, path: &str) -> Self {
        self.path.push('/');
        self.path.push_str(path.trim_matches('/'));
        self
    }

    /// Append a single percent-encoded identifier segment.
    pub fn segment(mut self, segment: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&urlencoding::encode(segment));
        self
    }

    /// Append one query parameter.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.path).map_err(|e| ClientError::Url(e.to_string()))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// HTTP client wrapper for TMC API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the standard default headers.
    pub fn new() -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .user_agent(concat!("tmc-provider/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, url: &Url, token: &str) -> Result<T, ClientError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).bearer_auth(token).send().await?;
        Self::decode(url, response).await
    }

    /// Make a POST request with a JSON body and decode the response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::decode(url, response).await
    }

    /// Make a PUT request with a JSON body and decode the response.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(url.clone())
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::decode(url, response).await
    }

    /// Make a DELETE request. The response body, if any, is discarded.
    pub async fn delete(&self, url: &Url, token: &str) -> Result<(), ClientError> {
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url.clone()).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_for(url, status, &body));
        }

        Ok(())
    }

    async fn decode<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_for(url, status, &body));
        }

        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    fn error_for(url: &Url, status: StatusCode, body: &str) -> ClientError {
        // Only log sanitized/truncated error bodies to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(body));

        if status == StatusCode::NOT_FOUND {
            ClientError::NotFound { url: url.to_string() }
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message: sanitize_for_log(body),
            }
        }
    }
}
