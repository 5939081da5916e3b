//! # Meridian Internal Library
//!
//! Re-exports the core Meridian crates for convenience.

/// Provider adapter interface, routing registry and request types.
pub use meridian_models;

/// Provider adapter implementations and transports.
pub use meridian_model_providers;

/// Request orchestration.
pub use meridian_dispatch;

/// Tracing setup and clocks.
pub use meridian_telemetry;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use meridian_dispatch::{
        CancellationToken, ComparisonRequest, ComparisonResult, DispatchConfig, DispatchError,
        Dispatcher, ErrorKind, HealthStatus,
    };
    pub use meridian_model_providers::{ProvidersConfig, SimulatedTransport, Transport};
    pub use meridian_models::types::{
        ChatMessage, ChatRequest, GenerationRequest, GenerationResult, RetrievalRequest,
        RetrievalResult, RetrievedSource, Role,
    };
    pub use meridian_models::{AdapterRegistry, ModelCatalog, ModelDescriptor, ModelPattern, UsageStats};
    pub use meridian_telemetry::{TracingFormat, TracingSetup};
}
