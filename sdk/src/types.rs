//! Result types shared with the presentation layer

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes whole numbers without a fractional part, so `80` from the service
/// goes back out as `80` rather than `80.0`.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_opt_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// One chart-ready data point.
///
/// `name` and `value` are always present. The optional fields depend on the
/// feature that produced the series; any other keys returned by the service
/// are kept in `extra` so the series reaches the caller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Category label
    pub name: String,

    /// Numeric magnitude
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,

    #[serde(
        default,
        serialize_with = "serialize_opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub prediction: Option<f64>,

    #[serde(
        default,
        serialize_with = "serialize_opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<f64>,

    /// Radar chart ceiling, always 100 when present
    #[serde(
        default,
        rename = "fullMark",
        serialize_with = "serialize_opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_mark: Option<f64>,

    /// Color hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesPoint {
    /// Create a point with only the required fields
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            prediction: None,
            sentiment: None,
            full_mark: None,
            fill: None,
            extra: Map::new(),
        }
    }

    pub fn with_prediction(mut self, prediction: f64) -> Self {
        self.prediction = Some(prediction);
        self
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_full_mark(mut self, full_mark: f64) -> Self {
        self.full_mark = Some(full_mark);
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

/// Normalized outcome of one feature invocation.
///
/// The narrative is always present. `series` is `None` for features without a
/// structured schema, and whenever the structured response could not be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureResult {
    pub narrative: String,
    pub series: Option<Vec<SeriesPoint>>,
}

impl FeatureResult {
    /// A narrative-only result
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            narrative: text.into(),
            series: None,
        }
    }

    /// A narrative with an optional chart series
    pub fn with_series(text: impl Into<String>, series: Option<Vec<SeriesPoint>>) -> Self {
        Self {
            narrative: text.into(),
            series,
        }
    }

    /// Returns true if the result carries a non-empty series
    pub fn has_chart(&self) -> bool {
        self.series.as_ref().is_some_and(|s| !s.is_empty())
    }
}
