//! Client configuration shared by the async and blocking clients.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT as UA};
use std::time::Duration;
use url::Url;

use super::error::ApiError;
use super::Endpoint;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "RAYSURFER_API_KEY";

/// Default service URL
pub const DEFAULT_BASE_URL: &str = "https://api.raysurfer.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("raysurfer-code-caching-cli/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a client.
///
/// The API key is optional here; it is resolved against [`API_KEY_ENV`]
/// when a client is built.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the API key from this config or the process environment.
    pub fn api_key(&self) -> Result<String, ApiError> {
        resolve_api_key(self.api_key.as_deref(), |var| std::env::var(var).ok())
    }

    /// Validate the settings and produce everything a client needs.
    pub(crate) fn resolve(&self) -> Result<ResolvedConfig, ApiError> {
        let api_key = self.api_key()?;
        let base_url = parse_base_url(&self.base_url)?;
        let headers = default_headers(&api_key)?;

        Ok(ResolvedConfig {
            base_url,
            headers,
            timeout: self.timeout,
        })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Validated configuration, ready to build an HTTP client from.
pub(crate) struct ResolvedConfig {
    pub base_url: Url,
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl ResolvedConfig {
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        build_url(&self.base_url, endpoint.path())
    }
}

/// Pick the explicit key if non-empty, otherwise look up [`API_KEY_ENV`].
pub(crate) fn resolve_api_key(
    explicit: Option<&str>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Result<String, ApiError> {
    if let Some(key) = explicit.filter(|key| !key.is_empty()) {
        return Ok(key.to_string());
    }

    lookup(API_KEY_ENV)
        .filter(|key| !key.is_empty())
        .ok_or(ApiError::MissingApiKey { var: API_KEY_ENV })
}

/// Parse a base URL, dropping trailing slashes and normalizing it to end in
/// exactly one `/` so relative joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}/", trimmed)).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "expected an http or https URL".to_string(),
        });
    }

    Ok(url)
}

fn build_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::Config(format!("Failed to build URL for {}: {}", path, e)))
}

fn default_headers(api_key: &str) -> Result<HeaderMap, ApiError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| ApiError::Config("API key contains invalid characters".to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(UA, HeaderValue::from_static(USER_AGENT));
    Ok(headers)
}
