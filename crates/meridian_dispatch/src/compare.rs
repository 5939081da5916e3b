//! Running one prompt across several models.

use meridian_models::error::ValidationError;
use meridian_models::llm::GenerationParams;
use meridian_models::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationRequest, GenerationResult};
use serde::{Deserialize, Serialize};

/// A prompt to run against several models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// The shared prompt.
    pub prompt: String,
    /// Model identifiers, in report order.
    pub models: Vec<String>,
    /// Sampling temperature for every run.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Token limit for every run.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ComparisonRequest {
    /// Creates a comparison with the default temperature and token limit.
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            models: models.into_iter().map(Into::into).collect(),
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

    /// Sets the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Validates the shared prompt and parameters, and every model identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for an empty model list, and
    /// otherwise the first error any per-model request would report.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.models.is_empty() {
            return Err(ValidationError::EmptyField("models"));
        }
        self.models
            .iter()
            .try_for_each(|model| self.request_for(model).validate())
    }

    pub(crate) fn request_for(&self, model: &str) -> GenerationRequest {
        GenerationRequest::new(self.prompt.clone(), model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }

    pub(crate) fn params(&self) -> GenerationParams {
        GenerationParams::new(self.prompt.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// What happened to one model's run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    /// The model answered.
    Completed {
        /// The normalized result.
        result: GenerationResult,
    },
    /// The model failed; other runs are unaffected.
    Failed {
        /// Rendered error.
        error: String,
    },
}

/// One model's run within a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Model identifier.
    pub model: String,
    /// Provider the identifier resolved to.
    pub provider: String,
    /// Result or failure.
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
    /// Wall time of the run in milliseconds.
    pub latency_ms: u64,
}

impl ExecutionReport {
    /// The result, if the run completed.
    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.outcome {
            ExecutionOutcome::Completed { result } => Some(result),
            ExecutionOutcome::Failed { .. } => None,
        }
    }
}

/// Reports for every requested model, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The shared prompt.
    pub prompt: String,
    /// One report per requested model.
    pub executions: Vec<ExecutionReport>,
}

impl ComparisonResult {
    /// Number of runs that completed.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.executions.iter().filter(|report| report.result().is_some()).count()
    }
}
