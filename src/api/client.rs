//! Async API client.
//!
//! `RaysurferClient` wraps a single `reqwest::Client` behind an `Arc`, so
//! clones share one connection pool and any number of calls may be in
//! flight at once. No call mutates client state after construction.

use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::config::{ClientConfig, ResolvedConfig};
use super::error::ApiError;
use super::parse_response;
use super::types::{
    ApiRequest, FewShotRequest, FewShotResponse, PatternsRequest, PatternsResponse,
    SearchRequest, SearchResponse, UploadRequest, UploadResponse, VoteRequest, VoteResponse,
};

struct Inner {
    client: Client,
    config: ResolvedConfig,
}

/// Async client for the Raysurfer API.
///
/// The connection pool is released when the last clone is dropped.
#[derive(Clone)]
pub struct RaysurferClient {
    inner: Arc<Inner>,
}

impl RaysurferClient {
    /// Build a client. Fails without touching the network if no API key
    /// is available or the base URL is unusable.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let config = config.resolve()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            inner: Arc::new(Inner { client, config }),
        })
    }

    /// Build a client from defaults and `RAYSURFER_API_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }

    /// POST `request` to its endpoint and parse the typed response.
    pub async fn send<T>(&self, request: &T) -> Result<T::Response, ApiError>
    where
        T: ApiRequest,
    {
        let url = self.inner.config.endpoint_url(T::ENDPOINT)?;
        let request_id = Uuid::new_v4().to_string();

        debug!("=== API Request ===");
        debug!("URL: {}", url);
        debug!("Request ID: {}", request_id);
        debug!("Timeout: {:?}", self.inner.config.timeout);

        let response = self
            .inner
            .client
            .post(url.clone())
            .header("x-request-id", &request_id)
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        parse_response(status, &body)
    }

    /// Search for cached code snippets matching a task description.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.send(request).await
    }

    /// Upload code as a cached execution result.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, ApiError> {
        self.send(request).await
    }

    /// Vote on a cached code block.
    pub async fn vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError> {
        self.send(request).await
    }

    /// Retrieve proven task patterns.
    pub async fn patterns(&self, request: &PatternsRequest) -> Result<PatternsResponse, ApiError> {
        self.send(request).await
    }

    /// Retrieve few-shot examples for a task.
    pub async fn few_shot_examples(
        &self,
        request: &FewShotRequest,
    ) -> Result<FewShotResponse, ApiError> {
        self.send(request).await
    }
}

impl std::fmt::Debug for RaysurferClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaysurferClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
