//! Gemini generation provider
//!
//! Talks to the `models/{model}:generateContent` REST endpoint. The system
//! instruction travels in `systemInstruction`, the user text as a single user
//! turn, and a structured schema (when present) switches the response to
//! `application/json` via `generationConfig`.

use super::{GenerationRequest, LLMError, LLMProvider};
use crate::config::GeminiConfig;
use crate::secrets::{scrub, Credential};
use async_trait::async_trait;
use sdk::errors::EngineError;
use serde_json::{json, Value};

pub struct GeminiProvider {
    config: GeminiConfig,
    credential: Credential,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Build a provider, reading the API key from the environment variable
    /// named by `config.api_key_env`.
    ///
    /// # Errors
    /// Returns `EngineError::MissingCredential` when the variable is unset.
    /// No request is ever attempted in that case.
    pub fn from_env(config: GeminiConfig) -> Result<Self, EngineError> {
        let credential = Credential::from_env(&config.api_key_env)?;
        Self::new(config, credential)
    }

    /// Build a provider with an explicitly supplied credential
    pub fn new(config: GeminiConfig, credential: Credential) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| EngineError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(
            model = %config.model,
            credential = credential.source(),
            "Gemini provider configured"
        );

        Ok(Self {
            config,
            credential,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the JSON body for a request
    pub(crate) fn build_payload(&self, request: &GenerationRequest) -> Value {
        let mut payload = serde_json::Map::new();
        payload.insert(
            "contents".to_string(),
            json!([{
                "role": "user",
                "parts": [{"text": request.content}]
            }]),
        );
        payload.insert(
            "systemInstruction".to_string(),
            json!({"parts": [{"text": request.system_instruction}]}),
        );

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = self.config.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(schema) = &request.schema {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), json!(schema));
        }
        if !generation_config.is_empty() {
            payload.insert(
                "generationConfig".to_string(),
                Value::Object(generation_config),
            );
        }

        Value::Object(payload)
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A response without candidates or parts (e.g. a blocked prompt) yields an
/// empty string rather than an error.
fn extract_text(data: &Value) -> String {
    let parts = data
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let Some(parts) = parts else {
        if let Some(reason) = data
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(|r| r.as_str())
        {
            tracing::warn!("Gemini blocked the prompt: {}", reason);
        } else {
            tracing::warn!("Gemini response has no candidate text");
        }
        return String::new();
    };

    parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect()
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> super::Result<String> {
        let url = self.endpoint();
        let payload = self.build_payload(request);

        tracing::debug!(
            model = %self.config.model,
            structured = request.is_structured(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.credential.secret().unsecure())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout
                } else if e.is_connect() {
                    LLMError::ProviderUnavailable(format!(
                        "Cannot connect to Gemini: {}",
                        scrub(&e.to_string())
                    ))
                } else {
                    LLMError::NetworkError(scrub(&e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = scrub(&response.text().await.unwrap_or_default());

            return Err(match status.as_u16() {
                400 | 404 => LLMError::InvalidRequest(text),
                401 | 403 => LLMError::AuthenticationFailed(text),
                429 => LLMError::RateLimitExceeded,
                _ => LLMError::ProviderUnavailable(format!(
                    "Gemini API error ({}): {}",
                    status, text
                )),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        Ok(extract_text(&data))
    }
}
