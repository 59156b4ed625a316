//! Invocation state for front-ends
//!
//! The orchestrator keeps no state between calls. A front-end that wants a
//! busy indicator or needs to tell a real answer from a placeholder tracks one
//! invocation with this state machine:
//!
//! ```text
//! Idle -> Running -> Succeeded(result)
//!                 -> Failed(placeholder)
//! ```

use crate::features::Feature;
use sdk::errors::EngineError;
use sdk::types::FeatureResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InvocationState {
    #[default]
    Idle,
    Running {
        feature: Feature,
    },
    Succeeded(FeatureResult),
    Failed(FeatureResult),
}

impl InvocationState {
    /// Enter `Running`. Any previous result is discarded, not merged.
    pub fn begin(&mut self, feature: Feature) {
        *self = InvocationState::Running { feature };
    }

    /// Settle a running invocation with the outcome of the call.
    ///
    /// A failed outcome shows `placeholder` in place of a real answer.
    pub fn complete(
        &mut self,
        outcome: Result<FeatureResult, EngineError>,
        placeholder: FeatureResult,
    ) {
        *self = match outcome {
            Ok(result) => InvocationState::Succeeded(result),
            Err(e) => {
                tracing::debug!("Invocation settled as failed: {}", e);
                InvocationState::Failed(placeholder)
            }
        };
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, InvocationState::Running { .. })
    }

    /// The result to display, if any
    pub fn result(&self) -> Option<&FeatureResult> {
        match self {
            InvocationState::Succeeded(result) | InvocationState::Failed(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut state = InvocationState::default();
        assert_eq!(state, InvocationState::Idle);
        assert!(!state.is_busy());

        state.begin(Feature::MuseWhisper);
        assert!(state.is_busy());
        assert!(state.result().is_none());

        state.complete(
            Ok(FeatureResult::narrative("ideas")),
            FeatureResult::narrative("placeholder"),
        );
        assert!(!state.is_busy());
        assert_eq!(state.result().unwrap().narrative, "ideas");
        assert!(matches!(state, InvocationState::Succeeded(_)));
    }

    #[test]
    fn test_lifecycle_failure_shows_placeholder() {
        let mut state = InvocationState::default();
        state.begin(Feature::StrategicOracle);
        state.complete(
            Err(EngineError::GenerationFailure("network".into())),
            FeatureResult::narrative("coffee break"),
        );
        assert!(matches!(state, InvocationState::Failed(_)));
        assert_eq!(state.result().unwrap().narrative, "coffee break");
    }

    #[test]
    fn test_begin_discards_previous_result() {
        let mut state = InvocationState::Succeeded(FeatureResult::narrative("old"));
        state.begin(Feature::TimeCapsule);
        assert!(state.result().is_none());
    }
}
