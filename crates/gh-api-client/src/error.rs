//! Error types for the GitHub REST client.

use thiserror::Error;

/// Errors that can occur while talking to the GitHub REST API.
#[derive(Error, Debug)]
pub enum GhApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL or request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The requested owner or repository does not exist (or is not visible)
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Rate limit exhausted
    #[error("GitHub API rate limit exceeded (resets at {})", .reset.as_deref().unwrap_or("unknown"))]
    RateLimited { reset: Option<String> },

    /// API returned any other error response
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl GhApiError {
    /// Whether this error means the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias using GhApiError.
pub type GhApiResult<T> = Result<T, GhApiError>;
