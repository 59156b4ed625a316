//! Atelier SDK
//!
//! Shared library providing the error taxonomy and the result types that the
//! engine hands to presentation layers.

/// Error types and handling
pub mod errors;

/// Feature result types
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, ErrorExt};
pub use types::{FeatureResult, SeriesPoint};
