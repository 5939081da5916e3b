//! Provider routing and response normalization for generation requests.
//!
//! See [`meridian_dispatch::Dispatcher`] for the request operations.

pub use meridian_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use meridian_internal::prelude::*;
}
