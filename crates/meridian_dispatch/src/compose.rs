//! Answer composition for retrieval-augmented queries.

use crate::config::invalid;
use crate::pipeline;
use async_trait::async_trait;
use meridian_models::llm::{GenerationParams, ProviderError};
use meridian_models::types::{MAX_TEMPERATURE, RetrievalRequest, RetrievedSource};
use meridian_models::AdapterRegistry;
use meridian_models::error::ConfigurationError;

/// Inputs available to an [`AnswerComposer`].
#[derive(Debug, Clone, Copy)]
pub struct Composition<'a> {
    /// The validated request.
    pub request: &'a RetrievalRequest,
    /// Ranked sources, highest score first.
    pub sources: &'a [RetrievedSource],
    /// Registry for composers that generate their answer.
    pub registry: &'a AdapterRegistry,
}

/// Turns ranked sources into the answer text of a retrieval query.
#[async_trait]
pub trait AnswerComposer: Send + Sync + 'static {
    /// Composes the answer.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if a generating composer's adapter call fails.
    async fn compose(&self, composition: Composition<'_>) -> Result<String, ProviderError>;

    /// Checks the composer's own settings when the dispatcher is built.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] naming the rejected setting.
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }
}

/// Fixed answer template. Makes no adapter call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateComposer;

#[async_trait]
impl AnswerComposer for TemplateComposer {
    async fn compose(&self, composition: Composition<'_>) -> Result<String, ProviderError> {
        Ok(format!(
            "Based on the retrieved documents, here's the answer to '{}'...",
            composition.request.query
        ))
    }
}

/// Asks the request's model to answer from the retrieved context.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerativeComposer {
    temperature: f32,
    max_tokens: u32,
}

impl Default for GenerativeComposer {
    fn default() -> Self {
        let defaults = GenerationParams::new("");
        Self {
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

impl GenerativeComposer {
    /// Creates a composer using the default sampling parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sampling temperature of the answering call.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the token limit of the answering call.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl AnswerComposer for GenerativeComposer {
    async fn compose(&self, composition: Composition<'_>) -> Result<String, ProviderError> {
        let prompt = context_prompt(&composition.request.query, composition.sources);
        let params = GenerationParams::new(prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let llm = composition.registry.resolve(&composition.request.model_id);
        let result = pipeline::generate(&llm, &params).await?;
        Ok(result.content().to_string())
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(invalid(
                "generative_composer.temperature",
                format!("must be within [0, {MAX_TEMPERATURE}], got {}", self.temperature),
            ));
        }
        if self.max_tokens == 0 {
            return Err(invalid("generative_composer.max_tokens", "must be positive"));
        }
        Ok(())
    }
}

fn context_prompt(query: &str, sources: &[RetrievedSource]) -> String {
    let mut prompt = String::from("Answer the question using the context below.\n\nContext:\n");
    for (index, source) in sources.iter().enumerate() {
        prompt.push_str(&format!("[{}] {}\n", index + 1, source.content));
    }
    prompt.push_str(&format!("\nQuestion: {query}"));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prompt_numbers_sources() {
        let sources = vec![
            RetrievedSource::new("Rust has no garbage collector.", 0.9),
            RetrievedSource::new("Ownership is checked at compile time.", 0.8),
        ];

        let prompt = context_prompt("How is memory managed?", &sources);
        assert!(prompt.contains("[1] Rust has no garbage collector.\n"));
        assert!(prompt.contains("[2] Ownership is checked at compile time.\n"));
        assert!(prompt.ends_with("Question: How is memory managed?"));
    }

    #[test]
    fn generative_settings_are_range_checked() {
        assert!(GenerativeComposer::new().validate().is_ok());
        assert!(GenerativeComposer::new().with_temperature(2.0).validate().is_ok());
        assert!(TemplateComposer.validate().is_ok());

        for temperature in [-0.1, 2.5, f32::NAN] {
            let err = GenerativeComposer::new()
                .with_temperature(temperature)
                .validate()
                .unwrap_err();
            assert!(
                matches!(err, ConfigurationError::InvalidValue { ref key, .. } if key == "generative_composer.temperature"),
                "{temperature}: {err}"
            );
        }

        let err = GenerativeComposer::new().with_max_tokens(0).validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { ref key, .. } if key == "generative_composer.max_tokens"));
    }

    #[test]
    fn context_prompt_without_sources_still_asks() {
        let prompt = context_prompt("Anything?", &[]);
        assert!(prompt.ends_with("Question: Anything?"));
    }
}
