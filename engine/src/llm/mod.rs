//! Generation Service Abstraction Layer
//!
//! This module provides the interface the orchestrator uses to reach the
//! generative text/JSON service. The LLMProvider trait is the seam: the Gemini
//! provider implements it for production, tests substitute their own.
//!
//! A provider receives one fully built `GenerationRequest` and returns the raw
//! response text. It does not interpret that text; shaping it into a result is
//! the orchestrator's job.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gemini;
pub mod schema;

pub use schema::{ResponseSchema, SchemaType};

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during generation calls
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// A fully specified request against the generation service.
///
/// Built fresh for every invocation and discarded once the call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Preamble plus the task instruction
    pub system_instruction: String,

    /// The (possibly transformed) user text
    pub content: String,

    /// Structured output contract; `None` requests free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResponseSchema>,
}

impl GenerationRequest {
    /// Create a free-text request
    pub fn new(system_instruction: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            content: content.into(),
            schema: None,
        }
    }

    /// Ask for structured output conforming to `schema`
    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn is_structured(&self) -> bool {
        self.schema.is_some()
    }
}

/// LLM Provider trait that all generation backends must implement
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "gemini")
    fn name(&self) -> &str;

    /// Generate a response for the request
    ///
    /// # Returns
    /// * `Ok(String)` - The raw response text, possibly empty
    /// * `Err(LLMError)` - If the call fails for any reason
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let request = GenerationRequest::new("be brief", "hello");
        assert_eq!(request.system_instruction, "be brief");
        assert_eq!(request.content, "hello");
        assert!(!request.is_structured());

        let request = request.with_schema(ResponseSchema::object());
        assert!(request.is_structured());
    }

    #[test]
    fn test_free_text_request_omits_schema_when_serialized() {
        let request = GenerationRequest::new("sys", "content");
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("schema").is_none());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LLMError::Timeout.to_string(), "Timeout");
        assert_eq!(
            LLMError::AuthenticationFailed("bad key".into()).to_string(),
            "Authentication failed: bad key"
        );
    }
}
