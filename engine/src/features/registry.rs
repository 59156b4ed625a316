//! Feature Registry
//!
//! One immutable task definition per feature. Lookup by [`Feature`] cannot
//! fail; lookup by string identifier fails fast with
//! `EngineError::InvalidFeature`.
//!
//! Whether a feature produces a chart series is decided here, by the presence
//! of a [`SeriesShape`], and never inferred from what the service returns.

use super::Feature;
use crate::llm::ResponseSchema;
use sdk::errors::EngineError;

/// How raw user text is rewritten before it is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTransform {
    Identity,
    /// Prepend a fixed label
    Prefix(&'static str),
}

impl PromptTransform {
    pub fn apply(&self, input: &str) -> String {
        match self {
            PromptTransform::Identity => input.to_string(),
            PromptTransform::Prefix(label) => format!("{}{}", label, input),
        }
    }
}

/// Shape of the chart series a structured feature asks for.
///
/// Every shape shares `name` and `value`; the variant decides the extra field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesShape {
    /// name, value, sentiment
    Sentiment,
    /// name, value, prediction
    Prediction,
    /// category name, value 0-100, fullMark 100
    Radar,
    /// risk category name, value 0-100, fill color hint
    RiskGauge,
}

impl SeriesShape {
    /// The structured output contract: `{ analysis, data: [point] }`
    pub fn schema(self) -> ResponseSchema {
        let analysis = match self {
            SeriesShape::Sentiment => {
                ResponseSchema::string().describe("Artistic description of the sentiment")
            }
            _ => ResponseSchema::string(),
        };

        let point = match self {
            SeriesShape::Sentiment => ResponseSchema::object()
                .property("name", ResponseSchema::string())
                .property("value", ResponseSchema::number())
                .property("sentiment", ResponseSchema::number()),
            SeriesShape::Prediction => ResponseSchema::object()
                .property("name", ResponseSchema::string())
                .property("value", ResponseSchema::number())
                .property("prediction", ResponseSchema::number()),
            SeriesShape::Radar => ResponseSchema::object()
                .property(
                    "name",
                    ResponseSchema::string().describe("Category (Strengths, etc)"),
                )
                .property("value", ResponseSchema::number().describe("Magnitude 0-100"))
                .property("fullMark", ResponseSchema::number().describe("Always 100")),
            SeriesShape::RiskGauge => ResponseSchema::object()
                .property("name", ResponseSchema::string().describe("Risk Category"))
                .property("value", ResponseSchema::number().describe("Risk Score 0-100"))
                .property(
                    "fill",
                    ResponseSchema::string().describe("Color hex code suggestions"),
                ),
        }
        .require(&["name", "value"]);

        ResponseSchema::object()
            .property("analysis", analysis)
            .property("data", ResponseSchema::array(point))
            .require(&["analysis", "data"])
    }
}

/// Static description of one feature's task
#[derive(Debug, PartialEq)]
pub struct TaskDefinition {
    pub feature: Feature,

    /// Task description appended to the shared preamble
    pub instruction_suffix: &'static str,

    pub prompt_transform: PromptTransform,

    /// `Some` when the feature returns a chart series
    pub series_shape: Option<SeriesShape>,
}

impl TaskDefinition {
    pub fn is_structured(&self) -> bool {
        self.series_shape.is_some()
    }

    pub fn output_schema(&self) -> Option<ResponseSchema> {
        self.series_shape.map(SeriesShape::schema)
    }
}

static DREAM_SUMMARIZER: TaskDefinition = TaskDefinition {
    feature: Feature::DreamSummarizer,
    instruction_suffix: "Task: Summarize the following document text. Output the summary as if it were a manifesto or a letter written by the painter describing the content.",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

static SENTIMENT_SYMPHONY: TaskDefinition = TaskDefinition {
    feature: Feature::SentimentSymphony,
    instruction_suffix: "Task: Analyze the sentiment of the text. Return a JSON array of data points representing the emotional arc (0-100) suitable for a chart.",
    prompt_transform: PromptTransform::Prefix("Analyze sentiment for: "),
    series_shape: Some(SeriesShape::Sentiment),
};

static PREDICTIVE_SCULPTURE: TaskDefinition = TaskDefinition {
    feature: Feature::PredictiveSculpture,
    instruction_suffix: "Task: Predict future trends based on this context. Return JSON data for a 3D-like visualization (value vs prediction).",
    prompt_transform: PromptTransform::Identity,
    series_shape: Some(SeriesShape::Prediction),
};

static POLYGLOT_SYNTHESIS: TaskDefinition = TaskDefinition {
    feature: Feature::PolyglotSynthesis,
    instruction_suffix: "Task: Translate the text into Traditional Chinese (if English) or English (if Chinese), but adapt the style/idioms to match the painter's era or artistic movement.",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

static SMART_REDACTION: TaskDefinition = TaskDefinition {
    feature: Feature::SmartRedaction,
    instruction_suffix: "Task: Identify sensitive info (names, dates, money) in the text. Return a version where sensitive info is replaced NOT by black bars, but by artistic descriptions enclosed in brackets (e.g., [A Blue Flower], [A Melting Clock]).",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

static MUSE_WHISPER: TaskDefinition = TaskDefinition {
    feature: Feature::MuseWhisper,
    instruction_suffix: "Task: You are a creative muse. Based on the user's input, generate 3 innovative, unconventional, and artistic business ideas or creative concepts.",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

static STRATEGIC_ORACLE: TaskDefinition = TaskDefinition {
    feature: Feature::StrategicOracle,
    instruction_suffix: "Task: Perform a SWOT analysis but phrased as a prophetic revelation. Also return data for a Radar Chart (Strengths, Weaknesses, Opportunities, Threats) with values 0-100.",
    prompt_transform: PromptTransform::Identity,
    series_shape: Some(SeriesShape::Radar),
};

static TONE_ALCHEMIST: TaskDefinition = TaskDefinition {
    feature: Feature::ToneAlchemist,
    instruction_suffix: "Task: Rewrite the input text in 3 distinct tones: 1) Diplomatic/Courtly, 2) Aggressive/Passionate, 3) Abstract/Poetic. Label them clearly.",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

static ETHICAL_MIRROR: TaskDefinition = TaskDefinition {
    feature: Feature::EthicalMirror,
    instruction_suffix: "Task: Analyze the text for bias, inclusivity, and ethical risks. Return a critique and a 'Risk Level' score (0-100) for a gauge chart.",
    prompt_transform: PromptTransform::Identity,
    series_shape: Some(SeriesShape::RiskGauge),
};

static TIME_CAPSULE: TaskDefinition = TaskDefinition {
    feature: Feature::TimeCapsule,
    instruction_suffix: "Task: Re-contextualize the modern text as if it were written during the painter's active years. Use appropriate technology terms (e.g., replace 'email' with 'telegram' or 'letter', 'server' with 'archive').",
    prompt_transform: PromptTransform::Identity,
    series_shape: None,
};

/// Look up the task definition for a feature
pub fn lookup(feature: Feature) -> &'static TaskDefinition {
    match feature {
        Feature::DreamSummarizer => &DREAM_SUMMARIZER,
        Feature::SentimentSymphony => &SENTIMENT_SYMPHONY,
        Feature::PredictiveSculpture => &PREDICTIVE_SCULPTURE,
        Feature::PolyglotSynthesis => &POLYGLOT_SYNTHESIS,
        Feature::SmartRedaction => &SMART_REDACTION,
        Feature::MuseWhisper => &MUSE_WHISPER,
        Feature::StrategicOracle => &STRATEGIC_ORACLE,
        Feature::ToneAlchemist => &TONE_ALCHEMIST,
        Feature::EthicalMirror => &ETHICAL_MIRROR,
        Feature::TimeCapsule => &TIME_CAPSULE,
    }
}

/// Look up a task definition by its string identifier
///
/// # Errors
/// Returns `EngineError::InvalidFeature` for any identifier outside the
/// closed feature set.
pub fn lookup_id(id: &str) -> Result<&'static TaskDefinition, EngineError> {
    let feature: Feature = id.parse()?;
    Ok(lookup(feature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_definition_belongs_to_its_feature() {
        for feature in Feature::ALL {
            assert_eq!(lookup(feature).feature, feature);
        }
    }

    #[test]
    fn test_schema_presence_matches_catalogue() {
        let structured = [
            Feature::SentimentSymphony,
            Feature::PredictiveSculpture,
            Feature::StrategicOracle,
            Feature::EthicalMirror,
        ];

        for feature in Feature::ALL {
            let definition = lookup(feature);
            assert_eq!(
                definition.is_structured(),
                structured.contains(&feature),
                "unexpected schema presence for {}",
                feature
            );
            assert_eq!(
                definition.output_schema().is_some(),
                definition.is_structured()
            );
        }
    }

    #[test]
    fn test_series_shapes() {
        assert_eq!(
            lookup(Feature::SentimentSymphony).series_shape,
            Some(SeriesShape::Sentiment)
        );
        assert_eq!(
            lookup(Feature::PredictiveSculpture).series_shape,
            Some(SeriesShape::Prediction)
        );
        assert_eq!(
            lookup(Feature::StrategicOracle).series_shape,
            Some(SeriesShape::Radar)
        );
        assert_eq!(
            lookup(Feature::EthicalMirror).series_shape,
            Some(SeriesShape::RiskGauge)
        );
    }

    #[test]
    fn test_only_sentiment_rewrites_input() {
        for feature in Feature::ALL {
            let transform = lookup(feature).prompt_transform;
            if feature == Feature::SentimentSymphony {
                assert_eq!(
                    transform.apply("great quarter"),
                    "Analyze sentiment for: great quarter"
                );
            } else {
                assert_eq!(transform, PromptTransform::Identity);
                assert_eq!(transform.apply("great quarter"), "great quarter");
            }
        }
    }

    #[test]
    fn test_suffixes_start_with_task_marker() {
        for feature in Feature::ALL {
            assert!(lookup(feature).instruction_suffix.starts_with("Task: "));
        }
    }

    #[test]
    fn test_radar_schema_fields() {
        let schema = SeriesShape::Radar.schema();
        let point = schema.properties["data"].items.as_ref().unwrap();
        let mut keys: Vec<&str> = point.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["fullMark", "name", "value"]);
        assert!(schema.properties.contains_key("analysis"));
    }

    #[test]
    fn test_every_shape_requires_name_and_value() {
        for shape in [
            SeriesShape::Sentiment,
            SeriesShape::Prediction,
            SeriesShape::Radar,
            SeriesShape::RiskGauge,
        ] {
            let schema = shape.schema();
            assert_eq!(schema.required, vec!["analysis", "data"]);
            let point = schema.properties["data"].items.as_ref().unwrap();
            assert_eq!(point.required, vec!["name", "value"], "{:?}", shape);
        }
    }

    #[test]
    fn test_risk_gauge_schema_has_fill_hint() {
        let schema = SeriesShape::RiskGauge.schema();
        let point = schema.properties["data"].items.as_ref().unwrap();
        assert_eq!(
            point.properties["fill"].description.as_deref(),
            Some("Color hex code suggestions")
        );
    }

    #[test]
    fn test_lookup_id() {
        let definition = lookup_id("ethical-mirror").unwrap();
        assert_eq!(definition.feature, Feature::EthicalMirror);

        let err = lookup_id("crystal-ball").unwrap_err();
        assert!(matches!(err, EngineError::InvalidFeature(_)));
    }
}
