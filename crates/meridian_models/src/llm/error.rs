//! Error types for provider adapter calls.

use core::time::Duration;

/// Errors raised by a provider adapter.
///
/// Surfaced to callers as a single server-side failure. The core never
/// retries on these; retry policy belongs to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Http error (e.g.: connection error, refused connection, etc.)
    #[error("http error: {0}")]
    Http(String),

    /// The downstream call did not complete within its timeout.
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Rate limited by the provider.
    #[error("rate limited{}", .retry_after.map(|d| format!(", retry after {d:?}")).unwrap_or_default())]
    RateLimited {
        /// Suggested time to wait before retrying.
        retry_after: Option<Duration>,
    },

    /// The request could not be expressed in the provider's format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered with a body that could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Error returned by the model provider.
    #[error("provider error: {message}")]
    Provider {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error message.
        message: String,
        /// The underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProviderError {
    /// Wraps an arbitrary downstream failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
            source: None,
        }
    }
}
