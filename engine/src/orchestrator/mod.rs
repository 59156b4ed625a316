//! Response Orchestrator
//!
//! Executes one feature invocation end to end:
//!
//! 1. resolve the task definition from the registry
//! 2. build the request (preamble + task suffix, transformed text, schema)
//! 3. call the generation provider exactly once, no retry
//! 4. normalize the raw text into a `FeatureResult`
//!
//! `run` never fails. A provider error becomes the configured placeholder
//! narrative with no series; a structured response that does not parse keeps
//! its raw text as the narrative. Only construction can fail, with
//! `EngineError::MissingCredential`, before any request is possible.
//!
//! The orchestrator holds no mutable state, so concurrent `run` calls are
//! independent. Which result is displayed last is the caller's concern.

pub mod normalize;
pub mod request;
pub mod state;

pub use state::InvocationState;

use crate::config::{Config, OrchestratorConfig};
use crate::features::{lookup, Feature, StyleLabel};
use crate::llm::gemini::GeminiProvider;
use crate::llm::{GenerationRequest, LLMError, LLMProvider};
use crate::secrets::scrub;
use sdk::errors::EngineError;
use sdk::types::FeatureResult;
use std::sync::Arc;
use std::time::Duration;

pub struct ResponseOrchestrator {
    provider: Arc<dyn LLMProvider>,
    config: OrchestratorConfig,
}

impl ResponseOrchestrator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: OrchestratorConfig) -> Self {
        Self { provider, config }
    }

    /// Build an orchestrator backed by Gemini.
    ///
    /// # Errors
    /// Returns `EngineError::MissingCredential` if the API key variable is
    /// unset. This is checked here, once, so no later `run` can reach the
    /// network without a credential.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let provider = GeminiProvider::from_env(config.llm.gemini.clone())?;
        tracing::info!(
            "Orchestrator ready (provider: {}, model: {})",
            provider.name(),
            provider.model()
        );
        Ok(Self::new(Arc::new(provider), config.orchestrator.clone()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The request `run` would send, without sending it
    pub fn build_request(
        &self,
        feature: Feature,
        user_text: &str,
        style: &StyleLabel,
    ) -> GenerationRequest {
        request::build_request(lookup(feature), user_text, style)
    }

    /// The result shown when the generation call fails
    pub fn placeholder(&self) -> FeatureResult {
        FeatureResult::narrative(self.config.unavailable_narrative.clone())
    }

    /// Run a feature. Always returns a result.
    ///
    /// Callers must not pass empty `user_text`; it is forwarded as is.
    pub async fn run(&self, feature: Feature, user_text: &str, style: &StyleLabel) -> FeatureResult {
        self.run_inner(feature, user_text, style, self.config.timeout())
            .await
    }

    /// Like [`run`](Self::run), but gives up on the service after `deadline`
    /// and returns the placeholder.
    pub async fn run_with_deadline(
        &self,
        feature: Feature,
        user_text: &str,
        style: &StyleLabel,
        deadline: Duration,
    ) -> FeatureResult {
        self.run_inner(feature, user_text, style, Some(deadline))
            .await
    }

    async fn run_inner(
        &self,
        feature: Feature,
        user_text: &str,
        style: &StyleLabel,
        deadline: Option<Duration>,
    ) -> FeatureResult {
        match self.generate(feature, user_text, style, deadline).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%feature, "Generation failed: {}", e);
                self.placeholder()
            }
        }
    }

    /// Run a feature, surfacing a failed service call as
    /// `EngineError::GenerationFailure` instead of the placeholder.
    ///
    /// Malformed structured responses still degrade to raw text.
    pub async fn try_generate(
        &self,
        feature: Feature,
        user_text: &str,
        style: &StyleLabel,
    ) -> Result<FeatureResult, EngineError> {
        self.generate(feature, user_text, style, self.config.timeout())
            .await
    }

    async fn generate(
        &self,
        feature: Feature,
        user_text: &str,
        style: &StyleLabel,
        deadline: Option<Duration>,
    ) -> Result<FeatureResult, EngineError> {
        let definition = lookup(feature);
        let request = request::build_request(definition, user_text, style);

        tracing::info!(%feature, %style, structured = request.is_structured(), "Running feature");

        let raw = self
            .call_provider(&request, deadline)
            .await
            .map_err(|e| EngineError::GenerationFailure(scrub(&e.to_string())))?;

        let result = normalize::normalize(definition, raw, &self.config);
        tracing::info!(%feature, charted = result.has_chart(), "Feature completed");

        Ok(result)
    }

    async fn call_provider(
        &self,
        request: &GenerationRequest,
        deadline: Option<Duration>,
    ) -> Result<String, LLMError> {
        match deadline {
            Some(limit) => tokio::time::timeout(limit, self.provider.generate(request))
                .await
                .map_err(|_| LLMError::Timeout)?,
            None => self.provider.generate(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct StubProvider {
        response: Mutex<Option<Result<String, LLMError>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl StubProvider {
        fn answering(text: &str) -> Self {
            Self {
                response: Mutex::new(Some(Ok(text.to_string()))),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: LLMError) -> Self {
            Self {
                response: Mutex::new(Some(Err(error))),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, request: &GenerationRequest) -> crate::llm::Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(LLMError::ProviderUnavailable("called twice".into())))
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl LLMProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _request: &GenerationRequest) -> crate::llm::Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    fn style(name: &str) -> StyleLabel {
        StyleLabel::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_strategic_oracle_scenario() {
        let stub = Arc::new(StubProvider::answering(
            r#"{"analysis":"A rainstorm of opportunity","data":[{"name":"Strengths","value":80,"fullMark":100}]}"#,
        ));
        let orchestrator = ResponseOrchestrator::new(Arc::<StubProvider>::clone(&stub), OrchestratorConfig::default());

        let result = orchestrator
            .run(
                Feature::StrategicOracle,
                "Our company sells umbrellas",
                &style("Monet"),
            )
            .await;

        assert_eq!(result.narrative, "A rainstorm of opportunity");
        assert_eq!(
            result.series,
            Some(vec![
                sdk::SeriesPoint::new("Strengths", 80.0).with_full_mark(100.0)
            ])
        );

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].content, "Our company sells umbrellas");
        assert!(seen[0].system_instruction.contains("artistic style of Monet"));
        assert!(seen[0].is_structured());
    }

    #[tokio::test]
    async fn test_dream_summarizer_scenario() {
        let stub = Arc::new(StubProvider::answering("A swirling letter about numbers."));
        let orchestrator = ResponseOrchestrator::new(stub, OrchestratorConfig::default());

        let result = orchestrator
            .run(Feature::DreamSummarizer, "Q3 report text", &style("Van Gogh"))
            .await;

        assert_eq!(result, FeatureResult::narrative("A swirling letter about numbers."));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_placeholder() {
        let stub = Arc::new(StubProvider::failing(LLMError::AuthenticationFailed(
            "bad key".into(),
        )));
        let orchestrator = ResponseOrchestrator::new(Arc::<StubProvider>::clone(&stub), OrchestratorConfig::default());

        let result = orchestrator
            .run(Feature::EthicalMirror, "Hiring policy", &style("Klimt"))
            .await;

        assert_eq!(
            result.narrative,
            "The AI Muse is currently taking a coffee break. Please check your API Key."
        );
        assert!(result.series.is_none());
        assert_eq!(stub.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_every_feature_degrades_to_placeholder() {
        for feature in Feature::ALL {
            let orchestrator = ResponseOrchestrator::new(
                Arc::new(StubProvider::failing(LLMError::RateLimitExceeded)),
                OrchestratorConfig::default(),
            );
            let result = orchestrator.run(feature, "anything", &style("Monet")).await;
            assert_eq!(result, orchestrator.placeholder(), "{}", feature);
        }
    }

    #[tokio::test]
    async fn test_try_generate_surfaces_generation_failure() {
        let stub = Arc::new(StubProvider::failing(LLMError::NetworkError(
            "reset by peer".into(),
        )));
        let orchestrator = ResponseOrchestrator::new(stub, OrchestratorConfig::default());

        let err = orchestrator
            .try_generate(Feature::MuseWhisper, "coffee shop", &style("Monet"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::GenerationFailure(msg) if msg.contains("reset by peer")));
    }

    #[tokio::test]
    async fn test_deadline_expiry_yields_placeholder() {
        let orchestrator =
            ResponseOrchestrator::new(Arc::new(SlowProvider), OrchestratorConfig::default());

        let result = orchestrator
            .run_with_deadline(
                Feature::TimeCapsule,
                "We emailed the server logs",
                &style("Vermeer"),
                Duration::from_millis(20),
            )
            .await;

        assert_eq!(result, orchestrator.placeholder());
    }

    #[tokio::test]
    async fn test_configured_timeout_applies_to_run() {
        let config = OrchestratorConfig {
            timeout_secs: Some(1),
            unavailable_narrative: "Too slow.".to_string(),
            ..OrchestratorConfig::default()
        };
        let orchestrator = ResponseOrchestrator::new(Arc::new(SlowProvider), config);

        let result = orchestrator
            .run(Feature::MuseWhisper, "tea", &style("Monet"))
            .await;

        assert_eq!(result.narrative, "Too slow.");
    }

    #[test]
    fn test_build_request_matches_registry() {
        let orchestrator = ResponseOrchestrator::new(
            Arc::new(StubProvider::answering("")),
            OrchestratorConfig::default(),
        );
        let request =
            orchestrator.build_request(Feature::SentimentSymphony, "sales up", &style("Monet"));
        assert_eq!(request.content, "Analyze sentiment for: sales up");
        assert_eq!(orchestrator.provider_name(), "stub");
    }
}
