//! Fetch error types.

use gadown_core::CoreError;
use thiserror::Error;

use crate::source::PageCursor;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for a single request/response cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Rate limited by the API.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, if announced.
        retry_after: Option<u64>,
    },

    /// The API rejected our credentials.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Obtaining an access token failed.
    #[error("Authorization error: {0}")]
    Auth(#[from] AuthError),

    /// The response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// No credentials were configured on the context.
    #[error("No credentials configured")]
    NoCredentials,
}

impl FetchError {
    /// Returns true if repeating the request may succeed.
    ///
    /// Everything that can go wrong between sending the request and parsing
    /// the response is retried. Local setup problems are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::NoCredentials
                | Self::Core(_)
                | Self::Http(HttpError::DomainNotAllowed(_) | HttpError::InvalidUrl(_))
                | Self::Auth(AuthError::InvalidKey(_))
        )
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

// ============================================================================
// Auth Error
// ============================================================================

/// Error type for credential handling and token exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The private key could not be decoded or was rejected.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Signing the assertion failed.
    #[error("Failed to sign token assertion")]
    Signing,

    /// The token endpoint answered with a non-success status.
    #[error("Token request failed ({status}): {body}")]
    TokenRequest {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The token response could not be parsed.
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// Transport error while talking to the token endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Pipeline Error
// ============================================================================

/// Error type for a complete download.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A page could not be fetched within the retry budget.
    #[error("Request failed after {attempts} attempt(s): {source}")]
    Fetch {
        /// Requests issued in total, including retries.
        attempts: u32,
        /// The last error.
        source: FetchError,
    },

    /// A page pointed back at its own cursor.
    #[error("Pagination did not advance past {0}")]
    Stalled(PageCursor),

    /// Writing rows failed.
    #[error("Failed to write rows: {0}")]
    Sink(#[from] CoreError),

    /// The download produced no data rows.
    #[error("The query returned no data")]
    NoData,
}
