//! The request orchestrators.

use crate::cancel::bounded;
use crate::compare::{ComparisonRequest, ComparisonResult, ExecutionOutcome, ExecutionReport};
use crate::compose::{AnswerComposer, Composition, TemplateComposer};
use crate::config::DispatchConfig;
use crate::context::{ContextPolicy, LastMessage};
use crate::error::{CancelReason, DispatchError};
use crate::health::HealthStatus;
use crate::pipeline;
use crate::retrieval::{RetrievalCollaborator, StaticRetriever, rank_sources};
use chrono::Utc;
use futures::future::join_all;
use meridian_model_providers::{ProvidersConfig, Transport, standard_registry};
use meridian_models::error::ConfigurationError;
use meridian_models::llm::{GenerationParams, Llm};
use meridian_models::types::{
    ChatRequest, GenerationRequest, GenerationResult, RetrievalRequest, RetrievalResult,
};
use meridian_models::{AdapterRegistry, ModelCatalog, ModelDescriptor};
use meridian_telemetry::Clock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Entry point for every request type.
///
/// Holds only immutable, shared collaborators; cloning is cheap and clones
/// may serve requests concurrently. No state is carried across calls.
///
/// # Example
///
/// ```no_run
/// use meridian_dispatch::Dispatcher;
/// use meridian_model_providers::{ProvidersConfig, SimulatedTransport};
/// use meridian_models::types::GenerationRequest;
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::standard(
///     Arc::new(SimulatedTransport::new()),
///     &ProvidersConfig::default(),
/// )?
/// .build()?;
///
/// let result = dispatcher.execute(&GenerationRequest::new("Hello", "gpt-4")).await?;
/// println!("{}", result.content());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<AdapterRegistry>,
    catalog: Arc<ModelCatalog>,
    retriever: Arc<dyn RetrievalCollaborator>,
    composer: Arc<dyn AnswerComposer>,
    context: Arc<dyn ContextPolicy>,
    clock: Clock,
    config: DispatchConfig,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("models", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Starts a builder around `registry`.
    #[must_use]
    pub fn builder(registry: AdapterRegistry) -> DispatcherBuilder {
        DispatcherBuilder::new(registry)
    }

    /// Starts a builder around the standard routing table, with every
    /// provider adapter sending through `transport`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a provider configuration is invalid.
    pub fn standard(
        transport: Arc<dyn Transport>,
        providers: &ProvidersConfig,
    ) -> Result<DispatcherBuilder, ConfigurationError> {
        Ok(DispatcherBuilder::new(standard_registry(transport, providers)?))
    }

    /// Runs a single-prompt completion.
    ///
    /// # Errors
    ///
    /// See [`execute_with_cancel`](Self::execute_with_cancel).
    pub async fn execute(&self, request: &GenerationRequest) -> Result<GenerationResult, DispatchError> {
        self.execute_with_cancel(request, &CancellationToken::new()).await
    }

    /// Runs a single-prompt completion that `cancel` can abort.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Validation`] if the request is malformed; no adapter is called.
    /// - [`DispatchError::Provider`] if the adapter fails.
    /// - [`DispatchError::Canceled`] if `cancel` fires or the generation deadline elapses.
    pub async fn execute_with_cancel(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DispatchError> {
        request.validate()?;

        let llm = self.registry.resolve(&request.model_id);
        let params = GenerationParams::new(request.prompt.clone())
            .with_temperature(request.temperature)
            .with_max_tokens(request.max_tokens);

        self.generate(&llm, &params, cancel).await
    }

    /// Answers the latest turn of a conversation.
    ///
    /// # Errors
    ///
    /// See [`chat_with_cancel`](Self::chat_with_cancel).
    pub async fn chat(&self, request: &ChatRequest) -> Result<GenerationResult, DispatchError> {
        self.chat_with_cancel(request, &CancellationToken::new()).await
    }

    /// Answers the latest turn of a conversation; `cancel` can abort the call.
    ///
    /// The prompt comes from the configured [`ContextPolicy`]. Temperature and
    /// token limit fall back to the [`DispatchConfig`] chat defaults.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Validation`] for an empty conversation; no adapter is called.
    /// - [`DispatchError::Provider`] if the adapter fails.
    /// - [`DispatchError::Canceled`] if `cancel` fires or the generation deadline elapses.
    pub async fn chat_with_cancel(
        &self,
        request: &ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DispatchError> {
        request.validate()?;
        let prompt = self.context.effective_prompt(&request.messages)?;

        let llm = self.registry.resolve(&request.model_id);
        let params = GenerationParams::new(prompt)
            .with_temperature(request.temperature.unwrap_or(self.config.chat_temperature()))
            .with_max_tokens(request.max_tokens.unwrap_or(self.config.chat_max_tokens()));

        tracing::debug!(
            model = %request.model_id,
            turns = request.messages.len(),
            "Dispatching chat turn"
        );

        self.generate(&llm, &params, cancel).await
    }

    /// Answers a query from retrieved documents.
    ///
    /// # Errors
    ///
    /// See [`retrieval_query_with_cancel`](Self::retrieval_query_with_cancel).
    pub async fn retrieval_query(
        &self,
        request: &RetrievalRequest,
    ) -> Result<RetrievalResult, DispatchError> {
        self.retrieval_query_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Answers a query from retrieved documents; `cancel` can abort the call.
    ///
    /// Sources are ranked by descending score, cleaned of non-finite scores,
    /// clamped into `[0, 1]` and truncated to `top_k` before the answer is
    /// composed.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Validation`] if the request is malformed.
    /// - [`DispatchError::Provider`] if retrieval or a generating composer fails.
    /// - [`DispatchError::Canceled`] if `cancel` fires or a deadline elapses.
    pub async fn retrieval_query_with_cancel(
        &self,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> Result<RetrievalResult, DispatchError> {
        request.validate()?;

        let retrieved = bounded(
            async {
                self.retriever
                    .retrieve(&request.query, request.top_k)
                    .await
                    .map_err(DispatchError::from)
            },
            self.config.retrieval_timeout(),
            cancel,
        )
        .await?;

        let sources = rank_sources(retrieved, request.top_k);

        let answer = bounded(
            async {
                self.composer
                    .compose(Composition {
                        request,
                        sources: &sources,
                        registry: &self.registry,
                    })
                    .await
                    .map_err(DispatchError::from)
            },
            self.config.generation_timeout(),
            cancel,
        )
        .await?;

        tracing::info!(
            model = %request.model_id,
            top_k = request.top_k,
            sources = sources.len(),
            "Retrieval query completed"
        );

        Ok(RetrievalResult { answer, sources })
    }

    /// Runs one prompt against several models concurrently.
    ///
    /// # Errors
    ///
    /// See [`compare_with_cancel`](Self::compare_with_cancel).
    pub async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult, DispatchError> {
        self.compare_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Runs one prompt against several models concurrently; `cancel` aborts
    /// every run.
    ///
    /// Per-model failures, including elapsed deadlines, are recorded in that
    /// model's report. Reports follow the request's model order.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Validation`] if the prompt, parameters or any model id is invalid.
    /// - [`DispatchError::Canceled`] if `cancel` fires.
    pub async fn compare_with_cancel(
        &self,
        request: &ComparisonRequest,
        cancel: &CancellationToken,
    ) -> Result<ComparisonResult, DispatchError> {
        request.validate()?;
        let params = request.params();

        let runs = request.models.iter().map(|model| {
            let llm = self.registry.resolve(model);
            let params = &params;
            async move {
                let started = self.clock.now();
                let outcome = self.generate(&llm, params, cancel).await;
                (llm, outcome, self.clock.elapsed_since(started))
            }
        });

        let mut executions = Vec::with_capacity(request.models.len());
        for (llm, outcome, latency) in join_all(runs).await {
            let outcome = match outcome {
                Ok(result) => ExecutionOutcome::Completed { result },
                Err(DispatchError::Canceled(CancelReason::Caller)) => {
                    return Err(DispatchError::Canceled(CancelReason::Caller));
                }
                Err(err) => ExecutionOutcome::Failed {
                    error: err.to_string(),
                },
            };
            executions.push(ExecutionReport {
                model: llm.model_name().to_string(),
                provider: llm.provider_name().to_string(),
                outcome,
                latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            });
        }

        let result = ComparisonResult {
            prompt: request.prompt.clone(),
            executions,
        };

        tracing::info!(
            models = request.models.len(),
            completed = result.completed(),
            "Comparison completed"
        );

        Ok(result)
    }

    /// The model catalog, in its configured order.
    #[must_use]
    pub fn list_models(&self) -> &[ModelDescriptor] {
        self.catalog.models()
    }

    /// Reports liveness with the current time.
    #[must_use]
    pub fn health_check(&self) -> HealthStatus {
        HealthStatus::healthy_at(Utc::now())
    }

    /// The routing registry.
    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    async fn generate(
        &self,
        llm: &Llm,
        params: &GenerationParams,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, DispatchError> {
        bounded(
            async {
                pipeline::generate(llm, params)
                    .await
                    .map_err(DispatchError::from)
            },
            self.config.generation_timeout(),
            cancel,
        )
        .await
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder {
    registry: AdapterRegistry,
    catalog: ModelCatalog,
    retriever: Arc<dyn RetrievalCollaborator>,
    composer: Arc<dyn AnswerComposer>,
    context: Arc<dyn ContextPolicy>,
    clock: Clock,
    config: DispatchConfig,
}

impl DispatcherBuilder {
    /// Creates a builder with the built-in catalog, no retrievable documents,
    /// the template composer and the last-message chat policy.
    #[must_use]
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            registry,
            catalog: ModelCatalog::builtin(),
            retriever: Arc::new(StaticRetriever::default()),
            composer: Arc::new(TemplateComposer),
            context: Arc::new(LastMessage),
            clock: Clock::default(),
            config: DispatchConfig::default(),
        }
    }

    /// Replaces the model catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the retrieval collaborator.
    #[must_use]
    pub fn with_retriever<R: RetrievalCollaborator>(mut self, retriever: Arc<R>) -> Self {
        self.retriever = retriever;
        self
    }

    /// Sets the answer composer for retrieval queries.
    #[must_use]
    pub fn with_composer<C: AnswerComposer>(mut self, composer: Arc<C>) -> Self {
        self.composer = composer;
        self
    }

    /// Sets how chat conversations become prompts.
    #[must_use]
    pub fn with_context_policy<P: ContextPolicy>(mut self, policy: Arc<P>) -> Self {
        self.context = policy;
        self
    }

    /// Sets the clock used for comparison latencies.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets timeouts and chat defaults.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and freezes the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the [`DispatchConfig`] or the
    /// answer composer's settings are invalid.
    pub fn build(self) -> Result<Dispatcher, ConfigurationError> {
        self.config.validate()?;
        self.composer.validate()?;

        tracing::info!(
            models = self.catalog.len(),
            fallback = self.registry.fallback_provider(),
            generation_timeout = ?self.config.generation_timeout(),
            retrieval_timeout = ?self.config.retrieval_timeout(),
            "Dispatcher ready"
        );

        Ok(Dispatcher {
            registry: Arc::new(self.registry),
            catalog: Arc::new(self.catalog),
            retriever: self.retriever,
            composer: self.composer,
            context: self.context,
            clock: self.clock,
            config: self.config,
        })
    }
}
