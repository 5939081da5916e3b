//! The [`ProviderAdapter`] trait for model providers.

use super::error::ProviderError;
use super::types::{GenerationParams, RawGeneration};
use async_trait::async_trait;

/// Trait implemented by provider adapters for text generation.
///
/// One implementation exists per backend model family. Adapters are stateless
/// apart from the configuration they were constructed with: they must not
/// cache results or mutate shared state, and they never retry internally.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Sends a generation request to the provider.
    ///
    /// # Arguments
    ///
    /// * `model` - The model identifier on which to perform generation
    /// * `params` - Prompt and sampling parameters
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on any downstream fault (transport failure,
    /// timeout, authentication failure, malformed upstream response).
    async fn generate(
        &self,
        model: &str,
        params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError>;
}
