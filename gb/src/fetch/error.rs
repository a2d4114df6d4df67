//! Fetch error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a CSV source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid source location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl FetchError {
    /// Whether the resource simply does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            FetchError::NotFound { .. } => true,
            FetchError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }
}
