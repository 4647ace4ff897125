//! Single-request executor
//!
//! Issues exactly one call against the TROCCO API and classifies the
//! outcome:
//! - 2xx responses are decoded from JSON into the caller's type
//! - non-2xx responses become `Error::RequestFailed` with the API's own
//!   message when the body carries one
//! - transport failures are passed through untouched
//!
//! There are no retries and no caching at this layer.

use super::query::QueryParams;
use crate::auth::ApiToken;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// User agent identifying this client and its version
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Method, query and body of a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Query parameters, appended to the URL in order
    pub query: QueryParams,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl RequestSpec {
    /// Create a GET request spec with no parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.set(key, value);
        self
    }

    /// Replace all query parameters
    #[must_use]
    pub fn query_params(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Fully-qualified URL with this spec's query string appended
    pub fn full_url(&self, url: &str) -> Result<Url> {
        let mut full = Url::parse(url)?;
        self.query.append_to(&mut full);
        Ok(full)
    }
}

/// HTTP client for the TROCCO API
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Perform one request and decode the JSON response into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &ApiToken,
        spec: &RequestSpec,
    ) -> Result<T> {
        let full_url = spec.full_url(url)?;
        debug!(method = %spec.method, url = %full_url, "Sending request");

        let mut req = self
            .client
            .request(spec.method.into(), full_url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        req = token.apply(req);

        if let Some(ref body) = spec.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let response = req.send().await?;
        let status = response.status();
        debug!(
            method = %spec.method,
            url = %full_url,
            status = status.as_u16(),
            "Received response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body).unwrap_or_else(|| status_detail(status));
            return Err(Error::request_failed(
                detail,
                full_url.as_str(),
                spec.method.as_str(),
                status.as_u16(),
            ));
        }

        let bytes = response.bytes().await?;
        let parsed = if bytes.is_empty() {
            serde_json::from_value(JsonValue::Null)
        } else {
            serde_json::from_slice(&bytes)
        };
        parsed.map_err(|e| Error::decode(format!("{e} (URL: {full_url})")))
    }

    /// Perform one GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &ApiToken) -> Result<T> {
        self.execute(url, token, &RequestSpec::new()).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Pull the API's own message out of an error body
///
/// Looks for a non-empty `message` string first, then `error`.
pub fn error_detail(body: &str) -> Option<String> {
    let json: JsonValue = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| json.get(key).and_then(JsonValue::as_str))
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// Fallback detail built from the status line
fn status_detail(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}
