//! Resolved adapter handle.

use super::error::ProviderError;
use super::provider::ProviderAdapter;
use super::types::{GenerationParams, RawGeneration};
use std::sync::Arc;

/// A handle binding a model identifier to the adapter that serves it.
///
/// Created via [`AdapterRegistry::resolve()`](crate::AdapterRegistry::resolve).
#[derive(Clone)]
pub struct Llm {
    adapter: Arc<dyn ProviderAdapter>,
    provider: String,
    model: String,
    fallback: bool,
}

impl Llm {
    /// Creates a new handle from an adapter, its provider name and the model identifier.
    #[must_use]
    pub(crate) fn new(
        adapter: Arc<dyn ProviderAdapter>,
        provider: String,
        model: String,
        fallback: bool,
    ) -> Self {
        Self {
            adapter,
            provider,
            model,
            fallback,
        }
    }

    /// Sends a generation request to the resolved adapter.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the adapter call fails.
    pub async fn generate(&self, params: &GenerationParams) -> Result<RawGeneration, ProviderError> {
        self.adapter.generate(&self.model, params).await
    }

    /// Returns the model identifier this handle was resolved for.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Returns the name of the provider whose adapter answers this model.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider
    }

    /// Whether no routing pattern matched and the fallback adapter was chosen.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl core::fmt::Debug for Llm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Llm")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
