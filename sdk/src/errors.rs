//! Error types and handling
//!
//! This module provides the error types used throughout the Atelier engine.
//! All errors implement the `ErrorExt` trait which provides a user-friendly
//! hint for the command line.
//!
//! Only misconfiguration and misuse surface as errors at the integration
//! boundary. Failures of the generation service itself are absorbed by the
//! orchestrator into a placeholder result and never reach the caller as an
//! `EngineError` unless explicitly requested.
//!
//! # Security
//!
//! Error messages never carry the credential value, only the name of the
//! environment variable it was expected in.

use thiserror::Error;

/// Trait for engine error extensions
///
/// This trait provides additional context for errors shown to a user.
/// All engine errors implement this trait.
pub trait ErrorExt {
    /// Returns a user-friendly hint for the error
    fn user_hint(&self) -> &str;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: Invalid config file, missing credential
/// - **Misuse**: Unknown feature identifier, empty input
/// - **Generation**: The external service call failed (only surfaced on request)
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, ErrorExt};
///
/// let error = EngineError::MissingCredential("API_KEY".to_string());
/// println!("Hint: {}", error.user_hint());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    // Misuse errors
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Generation errors
    #[error("Generation failed: {0}")]
    GenerationFailure(String),
}

impl ErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file for errors",
            Self::MissingCredential(_) => {
                "Export your Gemini API key before starting (see `atelier doctor`)"
            }
            Self::InvalidFeature(_) => "Run `atelier features` to list the available features",
            Self::InvalidInput(_) => "Provide some text and a style name",
            Self::GenerationFailure(_) => {
                "The AI service is unavailable. Check your API key and network"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::InvalidFeature("moon-reader".to_string());
        assert_eq!(error.to_string(), "Invalid feature: moon-reader");

        let error = EngineError::MissingCredential("API_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credential: environment variable API_KEY is not set"
        );
    }

    #[test]
    fn test_hints_point_at_commands() {
        assert!(EngineError::InvalidFeature("x".into())
            .user_hint()
            .contains("atelier features"));
        assert!(EngineError::MissingCredential("API_KEY".into())
            .user_hint()
            .contains("atelier doctor"));
    }
}
