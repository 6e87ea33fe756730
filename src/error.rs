//! Command-layer error type.
//!
//! Every variant is fatal: the binary prints it as a single `Error:` line on
//! stderr and exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

use crate::api::{ApiError, ErrorKind};

#[derive(Debug, Error)]
pub enum CliError {
    /// Client could not be built (missing key, bad base URL).
    #[error("{0}")]
    Config(#[source] ApiError),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A remote operation failed; `action` names it for the user.
    #[error("{action} failed: {source}")]
    Api {
        action: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn api(action: &'static str) -> impl FnOnce(ApiError) -> CliError {
        move |source| CliError::Api { action, source }
    }

    /// Underlying API error kind, if this error came from the API layer.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            CliError::Config(err) | CliError::Api { source: err, .. } => Some(err.kind()),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        1
    }
}
