//! Provider types

use std::fmt;
use std::time::Duration;

/// Errors that can occur while fetching a tile from the remote dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Server answered with a non-success status
    HttpStatus { status: u16, url: String },
    /// Fetch did not complete within the configured timeout
    Timeout { url: String, timeout: Duration },
    /// Fetch was cancelled because the source is shutting down
    Cancelled,
}

impl ProviderError {
    /// Returns true if retrying later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::HttpError(_) | ProviderError::Timeout { .. } => true,
            ProviderError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            ProviderError::Cancelled => false,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            ProviderError::Timeout { url, timeout } => {
                write!(f, "Timed out after {:?} fetching {}", timeout, url)
            }
            ProviderError::Cancelled => write!(f, "Fetch cancelled"),
        }
    }
}

impl std::error::Error for ProviderError {}
