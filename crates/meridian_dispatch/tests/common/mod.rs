//! Shared fakes for dispatcher tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use core::time::Duration;
use meridian_dispatch::{Dispatcher, DispatcherBuilder, RetrievalCollaborator};
use meridian_model_providers::{ProvidersConfig, SimulatedTransport};
use meridian_models::llm::{GenerationParams, ProviderAdapter, ProviderError, RawGeneration, RawUsage};
use meridian_models::types::RetrievedSource;
use meridian_models::{AdapterRegistry, ModelPattern};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic adapter that records every call.
#[derive(Default)]
pub struct RecordingAdapter {
    calls: AtomicUsize,
    last: Mutex<Option<(String, GenerationParams)>>,
}

impl RecordingAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> GenerationParams {
        self.last.lock().unwrap().clone().expect("adapter was called").1
    }

    pub fn last_model(&self) -> String {
        self.last.lock().unwrap().clone().expect("adapter was called").0
    }
}

#[async_trait]
impl ProviderAdapter for RecordingAdapter {
    async fn generate(
        &self,
        model: &str,
        params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((model.to_string(), params.clone()));

        let words = params.prompt.split_whitespace().count() as u64;
        Ok(RawGeneration::new(
            format!("echo[{model}]: {}", params.prompt),
            // The reported total is deliberately wrong; normalization ignores it.
            RawUsage::new(Some(words), Some(7)).with_reported_total(Some(999)),
        ))
    }
}

/// Adapter that answers only after `delay`.
pub struct SlowAdapter {
    pub delay: Duration,
}

#[async_trait]
impl ProviderAdapter for SlowAdapter {
    async fn generate(
        &self,
        model: &str,
        _params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(RawGeneration::new(format!("late reply from {model}"), RawUsage::default()))
    }
}

/// Adapter that always fails with the error produced by `make`.
pub struct FailingAdapter {
    pub make: fn() -> ProviderError,
}

#[async_trait]
impl ProviderAdapter for FailingAdapter {
    async fn generate(
        &self,
        _model: &str,
        _params: &GenerationParams,
    ) -> Result<RawGeneration, ProviderError> {
        Err((self.make)())
    }
}

/// Retrieval collaborator with fixed scores, returned in the given order.
/// Counts every call.
pub struct ScoredRetriever {
    scores: Vec<f64>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScoredRetriever {
    pub fn new(scores: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            scores: scores.to_vec(),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn delayed(scores: &[f64], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            scores: scores.to_vec(),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RetrievalCollaborator for ScoredRetriever {
    async fn retrieve(
        &self,
        query: &str,
        _top_k: usize,
    ) -> Result<Vec<RetrievedSource>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .scores
            .iter()
            .enumerate()
            .map(|(i, score)| RetrievedSource::new(format!("doc {i} about {query}"), *score))
            .collect())
    }
}

/// Collaborator whose backing store is down.
pub struct BrokenRetriever;

#[async_trait]
impl RetrievalCollaborator for BrokenRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<RetrievedSource>, ProviderError> {
        Err(ProviderError::Http("vector store unreachable".to_string()))
    }
}

/// Registry routing `gpt` and `claude` prefixes to the given adapters.
pub fn registry<O, A, F>(openai: Arc<O>, anthropic: Arc<A>, fallback: Arc<F>) -> AdapterRegistry
where
    O: ProviderAdapter,
    A: ProviderAdapter,
    F: ProviderAdapter,
{
    AdapterRegistry::builder()
        .route(ModelPattern::prefix("gpt"), "openai", openai)
        .route(ModelPattern::prefix("claude"), "anthropic", anthropic)
        .fallback("fallback", fallback)
        .build()
        .expect("test registry is valid")
}

/// Registry sending every route to `adapter`.
pub fn single<A: ProviderAdapter>(adapter: &Arc<A>) -> DispatcherBuilder {
    Dispatcher::builder(registry(adapter.clone(), adapter.clone(), adapter.clone()))
}

/// Dispatcher over the standard routes and the simulated transport.
pub fn simulated() -> DispatcherBuilder {
    Dispatcher::standard(Arc::new(SimulatedTransport::new()), &ProvidersConfig::default())
        .expect("default provider configuration is valid")
}
