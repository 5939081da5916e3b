//! Adapter for identifiers no provider pattern claims.

use async_trait::async_trait;
use meridian_models::llm::{
    GenerationParams, ProviderAdapter, ProviderError, RawGeneration, RawUsage,
};

/// Synthesizes a placeholder answer without contacting any external system.
///
/// Always succeeds, which keeps registry resolution total.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAdapter;

impl FallbackAdapter {
    /// Prompt units reported for every placeholder.
    pub const PROMPT_UNITS: u64 = 10;
    /// Completion units reported for every placeholder.
    pub const COMPLETION_UNITS: u64 = 20;

    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderAdapter for FallbackAdapter {
    async fn generate(
        &self,
        model: &str,
        _params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        Ok(RawGeneration::new(
            format!("Response from {model}"),
            RawUsage::new(Some(Self::PROMPT_UNITS), Some(Self::COMPLETION_UNITS))
                .with_reported_total(Some(Self::PROMPT_UNITS + Self::COMPLETION_UNITS)),
        ))
    }
}
