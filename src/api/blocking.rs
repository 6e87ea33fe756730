//! Blocking API client for callers without an async runtime.
//!
//! Must not be used from inside a Tokio runtime; use
//! [`RaysurferClient`](super::RaysurferClient) there instead.

use reqwest::blocking::Client;
use tracing::debug;
use uuid::Uuid;

use super::config::{ClientConfig, ResolvedConfig};
use super::error::ApiError;
use super::parse_response;
use super::types::{
    ApiRequest, FewShotRequest, FewShotResponse, PatternsRequest, PatternsResponse,
    SearchRequest, SearchResponse, UploadRequest, UploadResponse, VoteRequest, VoteResponse,
};

/// Blocking client for the Raysurfer API, one call at a time.
pub struct BlockingRaysurferClient {
    client: Client,
    config: ResolvedConfig,
}

impl BlockingRaysurferClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let config = config.resolve()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    pub fn send<T>(&self, request: &T) -> Result<T::Response, ApiError>
    where
        T: ApiRequest,
    {
        let url = self.config.endpoint_url(T::ENDPOINT)?;
        let request_id = Uuid::new_v4().to_string();

        debug!("=== API Request (blocking) ===");
        debug!("URL: {}", url);
        debug!("Request ID: {}", request_id);

        let response = self
            .client
            .post(url.clone())
            .header("x-request-id", &request_id)
            .json(request)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        parse_response(status, &body)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.send(request)
    }

    pub fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, ApiError> {
        self.send(request)
    }

    pub fn vote(&self, request: &VoteRequest) -> Result<VoteResponse, ApiError> {
        self.send(request)
    }

    pub fn patterns(&self, request: &PatternsRequest) -> Result<PatternsResponse, ApiError> {
        self.send(request)
    }

    pub fn few_shot_examples(&self, request: &FewShotRequest) -> Result<FewShotResponse, ApiError> {
        self.send(request)
    }
}

impl std::fmt::Debug for BlockingRaysurferClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRaysurferClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
