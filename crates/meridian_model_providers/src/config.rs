//! Construction-time provider configuration.

use core::time::Duration;
use meridian_models::error::ConfigurationError;

/// Default per-call timeout for provider requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable configuration injected into an adapter when it is built.
///
/// Adapters never read the environment at call time.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ProviderConfig {
    /// Creates a configuration pointing at `base_url` with no API key.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Defaults for the `OpenAI` API.
    #[must_use]
    pub fn openai() -> Self {
        Self::new("https://api.openai.com")
    }

    /// Defaults for the Anthropic API.
    #[must_use]
    pub fn anthropic() -> Self {
        Self::new("https://api.anthropic.com")
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overlays values from `<PREFIX>_API_KEY`, `<PREFIX>_BASE_URL` and
    /// `<PREFIX>_TIMEOUT_SECS`, leaving unset variables at their current value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the timeout is not a positive
    /// integer or the resulting configuration fails [`validate`](Self::validate).
    pub fn overlay_env(self, prefix: &str) -> Result<Self, ConfigurationError> {
        self.overlay(prefix, |key| std::env::var(key).ok())
    }

    fn overlay(
        mut self,
        prefix: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(api_key) = lookup(&format!("{prefix}_API_KEY")).filter(|key| !key.is_empty()) {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup(&format!("{prefix}_BASE_URL")) {
            self.base_url = base_url;
        }

        let timeout_key = format!("{prefix}_TIMEOUT_SECS");
        if let Some(raw) = lookup(&timeout_key) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|err| ConfigurationError::InvalidValue {
                    key: timeout_key.clone(),
                    reason: err.to_string(),
                })?;
            self.timeout = Duration::from_secs(secs);
        }

        self.validate(prefix)?;
        Ok(self)
    }

    /// Checks the base URL scheme and that the timeout is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] naming the offending key.
    pub fn validate(&self, prefix: &str) -> Result<(), ConfigurationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigurationError::InvalidValue {
                key: format!("{prefix}_BASE_URL"),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigurationError::InvalidValue {
                key: format!("{prefix}_TIMEOUT_SECS"),
                reason: "timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// The API key, if configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl core::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration for every built-in provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    /// Settings for the `OpenAI`-style adapter.
    pub openai: ProviderConfig,
    /// Settings for the Anthropic-style adapter.
    pub anthropic: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::openai(),
            anthropic: ProviderConfig::anthropic(),
        }
    }
}

impl ProvidersConfig {
    /// Reads `OPENAI_*` and `ANTHROPIC_*` variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        Ok(Self {
            openai: defaults.openai.overlay_env("OPENAI")?,
            anthropic: defaults.anthropic.overlay_env("ANTHROPIC")?,
        })
    }
}
