//! Request transports used by the provider adapters.

#[cfg(feature = "http")]
mod http;
mod simulated;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use simulated::SimulatedTransport;

use async_trait::async_trait;
use meridian_models::llm::ProviderError;
use serde_json::Value;

/// A JSON `POST` an adapter wants delivered.
#[derive(Clone)]
pub struct HttpRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Extra headers (`content-type: application/json` is implied).
    pub headers: Vec<(&'static str, String)>,
    /// JSON request body.
    pub body: Value,
}

impl HttpRequest {
    /// Creates a request without extra headers.
    #[must_use]
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Returns the value of the first header called `name`.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl core::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| *name).collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &header_names)
            .finish_non_exhaustive()
    }
}

/// Status and raw body of a transport response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers adapter requests to a provider endpoint.
///
/// Implementations report connection-level failures as [`ProviderError`];
/// non-success statuses are returned as responses so each adapter can map
/// them with its own provider's semantics.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends `request` and returns the provider's answer.
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError>;
}

/// Maps a non-success response to the matching [`ProviderError`].
pub(crate) fn status_error(response: HttpResponse) -> ProviderError {
    match response.status {
        401 | 403 => ProviderError::Auth(response.body),
        429 => ProviderError::RateLimited { retry_after: None },
        status => ProviderError::Provider {
            status: Some(status),
            message: response.body,
            source: None,
        },
    }
}
