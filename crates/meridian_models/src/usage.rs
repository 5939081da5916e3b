//! Canonical usage accounting.
//!
//! Every adapter's [`RawUsage`] funnels through [`normalize`], which is the
//! only place a [`UsageStats`] total is computed. Provider-reported totals are
//! never trusted.

use crate::llm::RawUsage;
use serde::{Deserialize, Serialize};

/// Token accounting for one generation.
///
/// `total_tokens` always equals `prompt_tokens + completion_tokens`; the
/// fields are private so the sum cannot drift. Serialized with the
/// `prompt_tokens` / `completion_tokens` / `total_tokens` wire names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "UsageStatsRepr")]
pub struct UsageStats {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

impl UsageStats {
    /// Creates usage stats, computing the total.
    #[must_use]
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Tokens consumed by the prompt.
    #[must_use]
    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    /// Tokens produced by the completion.
    #[must_use]
    pub fn completion_tokens(&self) -> u64 {
        self.completion_tokens
    }

    /// Sum of prompt and completion tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}

// Deserialization recomputes the total instead of trusting the payload.
#[derive(Deserialize)]
struct UsageStatsRepr {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl From<UsageStatsRepr> for UsageStats {
    fn from(repr: UsageStatsRepr) -> Self {
        Self::new(repr.prompt_tokens, repr.completion_tokens)
    }
}

/// Converts provider accounting into canonical [`UsageStats`].
///
/// Missing counts default to zero. The total is recomputed as the sum of the
/// two counts; a disagreeing provider total is logged and discarded.
#[must_use]
pub fn normalize(raw: &RawUsage) -> UsageStats {
    let stats = UsageStats::new(
        raw.prompt_units.unwrap_or(0),
        raw.completion_units.unwrap_or(0),
    );

    if let Some(reported) = raw.reported_total
        && reported != stats.total_tokens()
    {
        tracing::debug!(
            reported,
            computed = stats.total_tokens(),
            "Discarding provider-reported token total"
        );
    }

    stats
}
