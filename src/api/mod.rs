//! API client for the Raysurfer code-caching service.
//!
//! Two clients share the same schema, configuration and response handling:
//! [`RaysurferClient`] (async, cloneable, safe to use from several tasks at
//! once) and [`BlockingRaysurferClient`] for callers without a runtime.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use blocking::BlockingRaysurferClient;
pub use client::RaysurferClient;
pub use config::{
    ClientConfig, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, USER_AGENT, VERSION,
};
pub use error::{ApiError, ErrorKind};
pub use types::{
    ApiRequest, CodeBlock, FewShotExample, FewShotRequest, FewShotResponse, PatternEntry,
    PatternsRequest, PatternsResponse, SearchMatch, SearchRequest, SearchResponse, UploadFile,
    UploadRequest, UploadResponse, VoteRequest, VoteResponse,
};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Remote operations exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Upload,
    Vote,
    Patterns,
    FewShotExamples,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "/api/retrieve/search",
            Endpoint::Upload => "/api/store/execution-result",
            Endpoint::Vote => "/api/store/cache-usage",
            Endpoint::Patterns => "/api/retrieve/task-patterns",
            Endpoint::FewShotExamples => "/api/retrieve/few-shot-examples",
        }
    }
}

/// Turn a status code and body text into a typed response.
///
/// Non-2xx statuses become [`ApiError::Status`]; a 2xx body that does not
/// match the schema becomes [`ApiError::Validation`].
pub(crate) fn parse_response<R>(status: StatusCode, body: &str) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    debug!("=== API Response ===");
    debug!("Status: {}", status);

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    serde_json::from_str(body).map_err(ApiError::Validation)
}
