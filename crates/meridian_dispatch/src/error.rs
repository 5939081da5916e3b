//! Errors surfaced by the orchestrators.

use core::fmt;
use core::time::Duration;
use meridian_models::error::{ConfigurationError, ValidationError};
use meridian_models::llm::ProviderError;

/// Why a request was abandoned before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation token fired.
    Caller,
    /// The call did not finish within the configured deadline.
    Deadline(Duration),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => f.write_str("canceled by caller"),
            Self::Deadline(limit) => write!(f, "deadline of {limit:?} elapsed"),
        }
    }
}

/// Coarse classification of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request. Never retried.
    Validation,
    /// Downstream provider or retrieval failure.
    Provider,
    /// Aborted by the caller or by a deadline.
    Canceled,
    /// Startup misconfiguration.
    Configuration,
}

/// Error returned by every [`Dispatcher`](crate::Dispatcher) operation.
///
/// Adapter errors pass through unchanged inside [`DispatchError::Provider`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request failed validation. No adapter was invoked.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// A provider adapter or the retrieval collaborator failed.
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    /// The request was abandoned. No partial result is returned.
    #[error("request canceled: {0}")]
    Canceled(CancelReason),

    /// The dispatcher was assembled with an invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl DispatchError {
    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Provider(_) => ErrorKind::Provider,
            Self::Canceled(_) => ErrorKind::Canceled,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP-style status code for gateways that surface these errors.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Provider => 502,
            ErrorKind::Canceled => 499,
            ErrorKind::Configuration => 500,
        }
    }

    /// Whether the request was canceled, by the caller or a deadline.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_status_codes() {
        let validation = DispatchError::from(ValidationError::NoMessages);
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.status_code(), 400);

        let provider = DispatchError::from(ProviderError::Http("reset".to_string()));
        assert_eq!(provider.kind(), ErrorKind::Provider);
        assert_eq!(provider.status_code(), 502);

        let canceled = DispatchError::Canceled(CancelReason::Caller);
        assert!(canceled.is_canceled());
        assert_eq!(canceled.status_code(), 499);

        let config = DispatchError::from(ConfigurationError::MissingFallback);
        assert_eq!(config.status_code(), 500);
    }

    #[test]
    fn display_names_the_cause() {
        let err = DispatchError::Canceled(CancelReason::Deadline(Duration::from_secs(60)));
        assert_eq!(err.to_string(), "request canceled: deadline of 60s elapsed");

        let err = DispatchError::from(ValidationError::EmptyField("prompt"));
        assert_eq!(err.to_string(), "invalid request: field 'prompt' must not be empty");
    }
}
