//! Error type for the transport and schema layers.

use thiserror::Error;

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials or unusable client settings; raised before any I/O
    Configuration,
    /// Non-2xx status, connection failure or timeout
    Transport,
    /// Server answered 2xx but the body does not match the schema
    Validation,
}

/// Errors raised while building a client or calling the API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "{var} environment variable is not set. \
         Set it to your Raysurfer API key before running commands."
    )]
    MissingApiKey { var: &'static str },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("API error (HTTP {status}): {}", status_detail(*status, body))]
    Status { status: u16, body: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse API response: {0}")]
    Validation(#[source] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingApiKey { .. }
            | ApiError::InvalidBaseUrl { .. }
            | ApiError::Config(_) => ErrorKind::Configuration,
            ApiError::Status { .. } | ApiError::Request { .. } => ErrorKind::Transport,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Request { source, .. } if source.is_timeout())
    }
}

/// Longest response body echoed in an error message
const MAX_BODY_CHARS: usize = 200;

fn status_detail(status: u16, body: &str) -> String {
    let body = single_line(body);
    let hint = match status {
        401 | 403 => Some("check that your API key is valid"),
        429 => Some("rate limit exceeded, wait and try again"),
        _ => None,
    };

    match (body.is_empty(), hint) {
        (true, Some(hint)) => hint.to_string(),
        (true, None) => "empty response body".to_string(),
        (false, Some(hint)) => format!("{} ({})", body, hint),
        (false, None) => body,
    }
}

/// Collapse whitespace runs (newlines included) and cap the length.
fn single_line(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_BODY_CHARS {
        flat
    } else {
        let kept: String = flat.chars().take(MAX_BODY_CHARS - 3).collect();
        format!("{}...", kept)
    }
}
