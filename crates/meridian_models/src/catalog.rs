//! Static catalog of models offered to callers.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A catalog entry describing one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Model identifier, as passed in requests.
    pub name: String,
    /// Provider family (`"openai"`, `"anthropic"`, ...).
    pub provider: String,
    /// Human-readable name.
    pub display_name: String,
    /// Context limit advertised for the model.
    pub max_tokens: u32,
    /// Whether the provider can stream responses for this model.
    #[serde(default)]
    pub supports_streaming: bool,
}

impl ModelDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        display_name: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            display_name: display_name.into(),
            max_tokens,
            supports_streaming: false,
        }
    }

    /// Marks the model as supporting streaming.
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.supports_streaming = true;
        self
    }
}

/// Ordered, validated, read-only list of [`ModelDescriptor`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// Validates and wraps a list of descriptors, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the list is empty, a name repeats,
    /// or an entry has an empty name/provider or a zero token limit.
    pub fn new(models: Vec<ModelDescriptor>) -> Result<Self, ConfigurationError> {
        if models.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for model in &models {
            let invalid = |reason: &str| ConfigurationError::InvalidDescriptor {
                name: model.name.clone(),
                reason: reason.to_string(),
            };
            if model.name.trim().is_empty() {
                return Err(invalid("name is empty"));
            }
            if model.provider.trim().is_empty() {
                return Err(invalid("provider is empty"));
            }
            if model.max_tokens == 0 {
                return Err(invalid("max tokens must be positive"));
            }
            if !seen.insert(model.name.as_str()) {
                return Err(ConfigurationError::DuplicateModel(model.name.clone()));
            }
        }

        Ok(Self { models })
    }

    /// The catalog served by default.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelDescriptor::new("gpt-4", "openai", "GPT-4", 8192).streaming(),
                ModelDescriptor::new("gpt-3.5-turbo", "openai", "GPT-3.5 Turbo", 4096).streaming(),
                ModelDescriptor::new("claude-3-opus", "anthropic", "Claude 3 Opus", 4096)
                    .streaming(),
                ModelDescriptor::new("mistral-7b", "huggingface", "Mistral 7B", 2048),
            ],
        }
    }

    /// Returns the descriptors in catalog order.
    #[must_use]
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Looks up a descriptor by model name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Always `false` for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
