//! Types crossing the provider adapter boundary.

use crate::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::usage::{self, UsageStats};
use serde::{Deserialize, Serialize};

/// Prompt and sampling parameters handed to a provider adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// The prompt text forwarded to the provider.
    pub prompt: String,
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Creates parameters for `prompt` with the default temperature and token limit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meridian_models::llm::GenerationParams;
    ///
    /// let params = GenerationParams::new("Hello").with_temperature(0.2);
    /// assert_eq!(params.max_tokens, 1000);
    /// ```
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum number of generated tokens.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// What an adapter returns on success: generated text plus raw accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGeneration {
    /// Generated text.
    pub text: String,
    /// Usage accounting as reported by the provider.
    pub usage: RawUsage,
}

impl RawGeneration {
    /// Creates a raw generation outcome.
    #[must_use]
    pub fn new(text: impl Into<String>, usage: RawUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Provider accounting reduced to its prompt-side and completion-side counts.
///
/// Each adapter fills this from its own wire fields (`prompt_tokens` /
/// `completion_tokens` for OpenAI-style APIs, `input_tokens` /
/// `output_tokens` for Anthropic-style APIs). Any field the provider omitted
/// stays `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawUsage {
    /// Units consumed by the prompt.
    pub prompt_units: Option<u64>,
    /// Units produced by the completion.
    pub completion_units: Option<u64>,
    /// Total as reported by the provider. Never used for the canonical total.
    pub reported_total: Option<u64>,
}

impl RawUsage {
    /// Creates raw usage from prompt and completion counts.
    #[must_use]
    pub fn new(prompt_units: Option<u64>, completion_units: Option<u64>) -> Self {
        Self {
            prompt_units,
            completion_units,
            reported_total: None,
        }
    }

    /// Records the total the provider reported alongside the counts.
    #[must_use]
    pub fn with_reported_total(mut self, total: Option<u64>) -> Self {
        self.reported_total = total;
        self
    }

    /// Normalizes this accounting into [`UsageStats`].
    ///
    /// Shorthand for [`usage::normalize`].
    #[must_use]
    pub fn normalize(&self) -> UsageStats {
        usage::normalize(self)
    }
}
