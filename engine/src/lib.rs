//! Atelier Engine Library
//!
//! Runs painterly generative tasks against user text through a hosted
//! model. Used by the `atelier` binary and by the integration tests.

/// Configuration management module
pub mod config;

/// Credential loading and log scrubbing
pub mod secrets;

/// LLM provider abstraction layer
pub mod llm;

/// Feature catalogue and task registry
pub mod features;

/// Request construction, generation and normalization
pub mod orchestrator;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers
pub mod handlers;

pub use features::{Feature, StyleLabel};
pub use orchestrator::{InvocationState, ResponseOrchestrator};
