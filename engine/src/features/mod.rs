//! Feature catalogue
//!
//! The ten preset generative tasks a user can run. The set is closed: adding a
//! feature means adding a variant here and a definition in [`registry`], and
//! the compiler points at every match that needs updating.

use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod registry;
pub mod style;

pub use registry::{lookup, lookup_id, PromptTransform, SeriesShape, TaskDefinition};
pub use style::StyleLabel;

/// Feature identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    DreamSummarizer,
    SentimentSymphony,
    PredictiveSculpture,
    PolyglotSynthesis,
    SmartRedaction,
    MuseWhisper,
    StrategicOracle,
    ToneAlchemist,
    EthicalMirror,
    TimeCapsule,
}

/// Display grouping used by front-ends when listing features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureGroup {
    Core,
    Advanced,
    Creative,
    Strategy,
}

impl fmt::Display for FeatureGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureGroup::Core => "Core",
            FeatureGroup::Advanced => "Advanced",
            FeatureGroup::Creative => "Creative",
            FeatureGroup::Strategy => "Strategy",
        };
        f.write_str(name)
    }
}

impl Feature {
    /// Every feature, in catalogue order
    pub const ALL: [Feature; 10] = [
        Feature::DreamSummarizer,
        Feature::SentimentSymphony,
        Feature::PredictiveSculpture,
        Feature::PolyglotSynthesis,
        Feature::SmartRedaction,
        Feature::MuseWhisper,
        Feature::StrategicOracle,
        Feature::ToneAlchemist,
        Feature::EthicalMirror,
        Feature::TimeCapsule,
    ];

    /// The wire identifier, e.g. `"strategic-oracle"`
    pub fn id(self) -> &'static str {
        match self {
            Feature::DreamSummarizer => "dream-summarizer",
            Feature::SentimentSymphony => "sentiment-symphony",
            Feature::PredictiveSculpture => "predictive-sculpture",
            Feature::PolyglotSynthesis => "polyglot-synthesis",
            Feature::SmartRedaction => "smart-redaction",
            Feature::MuseWhisper => "muse-whisper",
            Feature::StrategicOracle => "strategic-oracle",
            Feature::ToneAlchemist => "tone-alchemist",
            Feature::EthicalMirror => "ethical-mirror",
            Feature::TimeCapsule => "time-capsule",
        }
    }

    pub fn group(self) -> FeatureGroup {
        match self {
            Feature::DreamSummarizer | Feature::SentimentSymphony | Feature::SmartRedaction => {
                FeatureGroup::Core
            }
            Feature::PredictiveSculpture | Feature::PolyglotSynthesis => FeatureGroup::Advanced,
            Feature::MuseWhisper | Feature::ToneAlchemist | Feature::TimeCapsule => {
                FeatureGroup::Creative
            }
            Feature::StrategicOracle | Feature::EthicalMirror => FeatureGroup::Strategy,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Feature {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| EngineError::InvalidFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.id().parse::<Feature>().unwrap(), feature);
            assert_eq!(feature.to_string(), feature.id());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = Feature::ALL.iter().map(|f| f.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Feature::ALL.len());
    }

    #[test]
    fn test_unknown_id_is_invalid_feature() {
        let err = "moon-reader".parse::<Feature>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidFeature(id) if id == "moon-reader"));
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!("Strategic-Oracle".parse::<Feature>().is_err());
        assert!(" strategic-oracle".parse::<Feature>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case_ids() {
        let json = serde_json::to_string(&Feature::EthicalMirror).unwrap();
        assert_eq!(json, "\"ethical-mirror\"");

        let feature: Feature = serde_json::from_str("\"time-capsule\"").unwrap();
        assert_eq!(feature, Feature::TimeCapsule);
    }

    #[test]
    fn test_groups() {
        assert_eq!(Feature::DreamSummarizer.group(), FeatureGroup::Core);
        assert_eq!(Feature::PolyglotSynthesis.group(), FeatureGroup::Advanced);
        assert_eq!(Feature::ToneAlchemist.group(), FeatureGroup::Creative);
        assert_eq!(Feature::EthicalMirror.group(), FeatureGroup::Strategy);
    }
}
