//! Shared generate-then-normalize step.

use meridian_models::llm::{GenerationParams, Llm, ProviderError};
use meridian_models::types::GenerationResult;
use meridian_models::usage;

/// Calls the resolved adapter and reduces its usage to the canonical schema.
pub(crate) async fn generate(
    llm: &Llm,
    params: &GenerationParams,
) -> Result<GenerationResult, ProviderError> {
    let raw = llm.generate(params).await.inspect_err(|err| {
        tracing::warn!(
            model = llm.model_name(),
            provider = llm.provider_name(),
            error = %err,
            "Generation failed"
        );
    })?;

    let usage = usage::normalize(&raw.usage);

    tracing::info!(
        model = llm.model_name(),
        provider = llm.provider_name(),
        prompt_tokens = usage.prompt_tokens(),
        completion_tokens = usage.completion_tokens(),
        total_tokens = usage.total_tokens(),
        "Generation completed"
    );

    Ok(GenerationResult::new(raw.text, usage))
}
