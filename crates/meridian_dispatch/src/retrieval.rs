//! Retrieval collaborator seam and source ranking.

use async_trait::async_trait;
use meridian_models::llm::ProviderError;
use meridian_models::types::RetrievedSource;

/// Source of documents for retrieval-augmented queries.
///
/// Implementations may return more or fewer than `top_k` documents in any
/// order; the dispatcher ranks and truncates the result.
#[async_trait]
pub trait RetrievalCollaborator: Send + Sync + 'static {
    /// Fetches documents relevant to `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the backing store fails.
    async fn retrieve(&self, query: &str, top_k: usize)
    -> Result<Vec<RetrievedSource>, ProviderError>;
}

/// Collaborator answering every query with a fixed document set.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    documents: Vec<RetrievedSource>,
}

impl StaticRetriever {
    /// Creates a retriever returning `documents` for every query.
    #[must_use]
    pub fn new(documents: Vec<RetrievedSource>) -> Self {
        Self { documents }
    }

    /// Two sample documents, for local runs without a vector store.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(vec![
            RetrievedSource::new("Sample document content relevant to the query...", 0.92)
                .with_metadata("source", "document1.pdf")
                .with_metadata("page", 5_i64),
            RetrievedSource::new("Another relevant piece of information...", 0.87)
                .with_metadata("source", "document2.pdf")
                .with_metadata("page", 12_i64),
        ])
    }
}

#[async_trait]
impl RetrievalCollaborator for StaticRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<RetrievedSource>, ProviderError> {
        Ok(self.documents.clone())
    }
}

/// Orders sources by descending score and keeps at most `top_k`.
///
/// Sources with a NaN or infinite score are dropped; the rest are clamped
/// into `[0, 1]`. Equal scores keep their retrieval order.
#[must_use]
pub fn rank_sources(sources: Vec<RetrievedSource>, top_k: usize) -> Vec<RetrievedSource> {
    let retrieved = sources.len();

    let mut ranked: Vec<RetrievedSource> = sources
        .into_iter()
        .filter(|source| source.score.is_finite())
        .map(|mut source| {
            // Adding zero folds -0.0 into 0.0.
            source.score = source.score.clamp(0.0, 1.0) + 0.0;
            source
        })
        .collect();

    let dropped = retrieved - ranked.len();
    if dropped > 0 {
        tracing::warn!(dropped, "Dropping retrieved sources with non-finite scores");
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    ranked
}
