//! Dispatcher configuration.

use core::time::Duration;
use meridian_models::error::ConfigurationError;
use meridian_models::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, MAX_TEMPERATURE};

/// Default deadline for one adapter call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Default deadline for one retrieval call.
pub const DEFAULT_RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(30);

const GENERATION_TIMEOUT_KEY: &str = "MERIDIAN_GENERATION_TIMEOUT_SECS";
const RETRIEVAL_TIMEOUT_KEY: &str = "MERIDIAN_RETRIEVAL_TIMEOUT_SECS";

/// Immutable settings for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchConfig {
    generation_timeout: Duration,
    retrieval_timeout: Duration,
    chat_temperature: f32,
    chat_max_tokens: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            retrieval_timeout: DEFAULT_RETRIEVAL_TIMEOUT,
            chat_temperature: DEFAULT_TEMPERATURE,
            chat_max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl DispatchConfig {
    /// Creates a configuration with the default timeouts and chat parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `MERIDIAN_GENERATION_TIMEOUT_SECS` and
    /// `MERIDIAN_RETRIEVAL_TIMEOUT_SECS` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] if a variable is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        if let Some(raw) = lookup(GENERATION_TIMEOUT_KEY) {
            self.generation_timeout = parse_secs(GENERATION_TIMEOUT_KEY, &raw)?;
        }
        if let Some(raw) = lookup(RETRIEVAL_TIMEOUT_KEY) {
            self.retrieval_timeout = parse_secs(RETRIEVAL_TIMEOUT_KEY, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Sets the deadline for each adapter call.
    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Sets the deadline for each retrieval call.
    #[must_use]
    pub fn with_retrieval_timeout(mut self, timeout: Duration) -> Self {
        self.retrieval_timeout = timeout;
        self
    }

    /// Sets the temperature used by chat requests without an override.
    #[must_use]
    pub fn with_chat_temperature(mut self, temperature: f32) -> Self {
        self.chat_temperature = temperature;
        self
    }

    /// Sets the token limit used by chat requests without an override.
    #[must_use]
    pub fn with_chat_max_tokens(mut self, max_tokens: u32) -> Self {
        self.chat_max_tokens = max_tokens;
        self
    }

    /// Checks that timeouts are non-zero and chat defaults are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.generation_timeout.is_zero() {
            return Err(invalid(GENERATION_TIMEOUT_KEY, "timeout must be positive"));
        }
        if self.retrieval_timeout.is_zero() {
            return Err(invalid(RETRIEVAL_TIMEOUT_KEY, "timeout must be positive"));
        }
        if !self.chat_temperature.is_finite()
            || !(0.0..=MAX_TEMPERATURE).contains(&self.chat_temperature)
        {
            return Err(invalid(
                "chat_temperature",
                format!("must be within [0, {MAX_TEMPERATURE}]"),
            ));
        }
        if self.chat_max_tokens == 0 {
            return Err(invalid("chat_max_tokens", "must be positive"));
        }
        Ok(())
    }

    /// Deadline for each adapter call.
    #[must_use]
    pub fn generation_timeout(&self) -> Duration {
        self.generation_timeout
    }

    /// Deadline for each retrieval call.
    #[must_use]
    pub fn retrieval_timeout(&self) -> Duration {
        self.retrieval_timeout
    }

    /// Temperature for chat requests without an override.
    #[must_use]
    pub fn chat_temperature(&self) -> f32 {
        self.chat_temperature
    }

    /// Token limit for chat requests without an override.
    #[must_use]
    pub fn chat_max_tokens(&self) -> u32 {
        self.chat_max_tokens
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, ConfigurationError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|err| invalid(key, err.to_string()))
}

pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.generation_timeout(), Duration::from_secs(60));
        assert_eq!(config.retrieval_timeout(), Duration::from_secs(30));
        assert!((config.chat_temperature() - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.chat_max_tokens(), 1000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn overlay_reads_timeouts() {
        let config = DispatchConfig::default()
            .overlay(lookup(&[
                ("MERIDIAN_GENERATION_TIMEOUT_SECS", "5"),
                ("MERIDIAN_RETRIEVAL_TIMEOUT_SECS", " 2 "),
            ]))
            .unwrap();

        assert_eq!(config.generation_timeout(), Duration::from_secs(5));
        assert_eq!(config.retrieval_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn overlay_rejects_bad_values() {
        let err = DispatchConfig::default()
            .overlay(lookup(&[("MERIDIAN_GENERATION_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { key, .. } if key == GENERATION_TIMEOUT_KEY));

        let err = DispatchConfig::default()
            .overlay(lookup(&[("MERIDIAN_RETRIEVAL_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { key, .. } if key == RETRIEVAL_TIMEOUT_KEY));
    }

    #[test]
    fn validate_checks_chat_defaults() {
        assert!(DispatchConfig::new().with_chat_temperature(2.5).validate().is_err());
        assert!(DispatchConfig::new().with_chat_temperature(f32::NAN).validate().is_err());
        assert!(DispatchConfig::new().with_chat_max_tokens(0).validate().is_err());
    }
}
