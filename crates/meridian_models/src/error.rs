//! Error types for request validation and startup configuration.

/// A caller-supplied request is malformed or missing a required field.
///
/// Always reported back to the caller and never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field is empty or only whitespace.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// A numeric field is outside its accepted range.
    #[error("field '{field}' is out of range: {reason}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the accepted range.
        reason: String,
    },

    /// A chat request carried no messages.
    #[error("chat request must contain at least one message")]
    NoMessages,
}

/// The registry, catalog, or a configuration value is invalid.
///
/// Detected while the service starts. Fatal: the service must not accept
/// traffic with an invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The adapter registry was built without a fallback adapter.
    #[error("adapter registry has no fallback adapter")]
    MissingFallback,

    /// A routing pattern has an empty token.
    #[error("routing pattern for provider '{provider}' is empty")]
    EmptyPattern {
        /// Provider the pattern was registered for.
        provider: String,
    },

    /// The same routing pattern was registered more than once.
    #[error("routing pattern {0} is registered more than once")]
    DuplicatePattern(String),

    /// A routing pattern can never match because an earlier one covers it.
    #[error("routing pattern {pattern} is unreachable: shadowed by earlier pattern {shadowed_by}")]
    ShadowedPattern {
        /// The unreachable pattern.
        pattern: String,
        /// The earlier pattern that already matches every identifier it would.
        shadowed_by: String,
    },

    /// A provider name is empty.
    #[error("provider name must not be empty")]
    EmptyProviderName,

    /// The model catalog has no entries.
    #[error("model catalog is empty")]
    EmptyCatalog,

    /// Two catalog entries share a model name.
    #[error("model '{0}' appears more than once in the catalog")]
    DuplicateModel(String),

    /// A catalog entry is invalid.
    #[error("invalid catalog entry '{name}': {reason}")]
    InvalidDescriptor {
        /// Model name of the entry.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration value could not be parsed or is out of range.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Configuration key (e.g. an environment variable name).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}
