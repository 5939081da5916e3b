//! Model identifier routing.

use crate::error::ConfigurationError;
use crate::llm::{Llm, ProviderAdapter};
use std::sync::Arc;

/// A rule matching model identifiers to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelPattern {
    /// Matches every identifier that starts with the token.
    Prefix(String),
    /// Matches exactly one identifier.
    Exact(String),
}

impl ModelPattern {
    /// Creates a prefix pattern.
    #[must_use]
    pub fn prefix(token: impl Into<String>) -> Self {
        Self::Prefix(token.into())
    }

    /// Creates an exact-match pattern.
    #[must_use]
    pub fn exact(model_id: impl Into<String>) -> Self {
        Self::Exact(model_id.into())
    }

    /// Returns whether `model_id` is matched by this pattern.
    #[must_use]
    pub fn matches(&self, model_id: &str) -> bool {
        match self {
            Self::Prefix(token) => model_id.starts_with(token.as_str()),
            Self::Exact(id) => model_id == id,
        }
    }

    fn token(&self) -> &str {
        match self {
            Self::Prefix(token) | Self::Exact(token) => token,
        }
    }

    /// Whether every identifier `later` matches is already matched by `self`.
    fn covers(&self, later: &Self) -> bool {
        match (self, later) {
            (Self::Prefix(earlier), Self::Prefix(token) | Self::Exact(token)) => {
                token.starts_with(earlier.as_str())
            }
            (Self::Exact(earlier), Self::Exact(id)) => earlier == id,
            (Self::Exact(_), Self::Prefix(_)) => false,
        }
    }
}

impl core::fmt::Display for ModelPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Prefix(token) => write!(f, "'{token}*'"),
            Self::Exact(id) => write!(f, "'{id}'"),
        }
    }
}

struct Route {
    pattern: ModelPattern,
    provider: String,
    adapter: Arc<dyn ProviderAdapter>,
}

/// Registry resolving model identifiers to provider adapters.
///
/// Routes are evaluated in the order they were registered and the first
/// matching pattern wins. Identifiers no pattern matches resolve to the
/// fallback adapter, so [`resolve`](Self::resolve) is total.
///
/// The registry is assembled once at startup through
/// [`AdapterRegistry::builder`] and is immutable afterwards; share it behind
/// an [`Arc`] and read it from any number of concurrent requests.
///
/// ```
/// # use meridian_models::{AdapterRegistry, ModelPattern};
/// # use meridian_models::llm::{GenerationParams, ProviderAdapter, ProviderError, RawGeneration, RawUsage};
/// # use async_trait::async_trait;
/// # use std::sync::Arc;
/// # struct Echo;
/// # #[async_trait]
/// # impl ProviderAdapter for Echo {
/// #   async fn generate(&self, _model: &str, params: &GenerationParams) -> Result<RawGeneration, ProviderError> {
/// #     Ok(RawGeneration::new(params.prompt.clone(), RawUsage::default()))
/// #   }
/// # }
/// let registry = AdapterRegistry::builder()
///     .route(ModelPattern::prefix("gpt"), "openai", Arc::new(Echo))
///     .route(ModelPattern::prefix("claude"), "anthropic", Arc::new(Echo))
///     .fallback("fallback", Arc::new(Echo))
///     .build()
///     .expect("valid registry");
///
/// assert_eq!(registry.resolve("gpt-4").provider_name(), "openai");
/// assert_eq!(registry.resolve("mistral-7b").provider_name(), "fallback");
/// ```
pub struct AdapterRegistry {
    routes: Vec<Route>,
    fallback_provider: String,
    fallback: Arc<dyn ProviderAdapter>,
}

impl core::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let routes: Vec<String> = self
            .routes
            .iter()
            .map(|route| format!("{} -> {}", route.pattern, route.provider))
            .collect();
        f.debug_struct("AdapterRegistry")
            .field("routes", &routes)
            .field("fallback", &self.fallback_provider)
            .finish()
    }
}

impl AdapterRegistry {
    /// Starts assembling a registry.
    #[must_use]
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder::default()
    }

    /// Resolves a model identifier to the adapter responsible for it.
    ///
    /// Never fails: unmatched identifiers get the fallback adapter.
    #[must_use]
    pub fn resolve(&self, model_id: impl AsRef<str>) -> Llm {
        let model_id = model_id.as_ref();

        let Some(route) = self
            .routes
            .iter()
            .find(|route| route.pattern.matches(model_id))
        else {
            tracing::debug!(
                model = model_id,
                provider = %self.fallback_provider,
                "No routing pattern matched, using fallback adapter"
            );
            return Llm::new(
                Arc::clone(&self.fallback),
                self.fallback_provider.clone(),
                model_id.to_string(),
                true,
            );
        };

        tracing::debug!(
            model = model_id,
            provider = %route.provider,
            pattern = %route.pattern,
            "Resolved model to provider"
        );
        Llm::new(
            Arc::clone(&route.adapter),
            route.provider.clone(),
            model_id.to_string(),
            false,
        )
    }

    /// Returns the provider name of the fallback adapter.
    #[must_use]
    pub fn fallback_provider(&self) -> &str {
        &self.fallback_provider
    }

    /// Checks if a provider name is registered, including the fallback.
    #[must_use]
    pub fn has_provider(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        self.fallback_provider == name || self.routes.iter().any(|route| route.provider == name)
    }

    /// Lists routing patterns with their provider, in evaluation order.
    #[must_use]
    pub fn routes(&self) -> Vec<(&ModelPattern, &str)> {
        self.routes
            .iter()
            .map(|route| (&route.pattern, route.provider.as_str()))
            .collect()
    }
}

/// Collects routes and the fallback for an [`AdapterRegistry`].
#[derive(Default)]
pub struct AdapterRegistryBuilder {
    routes: Vec<Route>,
    fallback: Option<(String, Arc<dyn ProviderAdapter>)>,
}

impl AdapterRegistryBuilder {
    /// Appends a route. Earlier routes take precedence over later ones.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Which model identifiers this route serves
    /// * `provider` - Provider name reported for resolved identifiers (e.g., `"openai"`)
    /// * `adapter` - The adapter implementation
    #[must_use]
    pub fn route<A: ProviderAdapter>(
        mut self,
        pattern: ModelPattern,
        provider: impl Into<String>,
        adapter: Arc<A>,
    ) -> Self {
        self.routes.push(Route {
            pattern,
            provider: provider.into(),
            adapter: adapter as Arc<dyn ProviderAdapter>,
        });
        self
    }

    /// Sets the adapter answering identifiers no route matches.
    #[must_use]
    pub fn fallback<A: ProviderAdapter>(mut self, provider: impl Into<String>, adapter: Arc<A>) -> Self {
        self.fallback = Some((provider.into(), adapter as Arc<dyn ProviderAdapter>));
        self
    }

    /// Validates the routes and freezes them into a registry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if no fallback was set, a provider
    /// name or pattern token is empty, a pattern is registered twice, or a
    /// pattern is unreachable because an earlier pattern covers it.
    pub fn build(self) -> Result<AdapterRegistry, ConfigurationError> {
        let (fallback_provider, fallback) = self.fallback.ok_or(ConfigurationError::MissingFallback)?;
        if fallback_provider.trim().is_empty() {
            return Err(ConfigurationError::EmptyProviderName);
        }

        for (index, route) in self.routes.iter().enumerate() {
            if route.provider.trim().is_empty() {
                return Err(ConfigurationError::EmptyProviderName);
            }
            if route.pattern.token().is_empty() {
                return Err(ConfigurationError::EmptyPattern {
                    provider: route.provider.clone(),
                });
            }

            for earlier in &self.routes[..index] {
                if earlier.pattern == route.pattern {
                    return Err(ConfigurationError::DuplicatePattern(route.pattern.to_string()));
                }
                if earlier.pattern.covers(&route.pattern) {
                    return Err(ConfigurationError::ShadowedPattern {
                        pattern: route.pattern.to_string(),
                        shadowed_by: earlier.pattern.to_string(),
                    });
                }
            }
        }

        Ok(AdapterRegistry {
            routes: self.routes,
            fallback_provider,
            fallback,
        })
    }
}
