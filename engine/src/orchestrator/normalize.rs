//! Response normalization
//!
//! Turns raw service text into a `FeatureResult`. A structured response that
//! is not a JSON object is not an error: the raw text becomes the narrative
//! and the chart is dropped. Inside the object, points are decoded one by one
//! so a single unreadable point never costs the analysis or its siblings.

use crate::config::OrchestratorConfig;
use crate::features::TaskDefinition;
use sdk::types::{FeatureResult, SeriesPoint};
use serde_json::{Map, Value};

pub fn normalize(
    definition: &TaskDefinition,
    raw: String,
    narratives: &OrchestratorConfig,
) -> FeatureResult {
    let text = if raw.is_empty() {
        narratives.empty_response_narrative.clone()
    } else {
        raw
    };

    if !definition.is_structured() {
        return FeatureResult::narrative(text);
    }

    let envelope = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(envelope)) => envelope,
        Ok(other) => {
            tracing::warn!(
                feature = %definition.feature,
                "Structured response is not an object ({}), using raw text",
                json_kind(&other)
            );
            return FeatureResult::narrative(text);
        }
        Err(e) => {
            tracing::warn!(
                feature = %definition.feature,
                "Structured response did not parse, using raw text: {}",
                e
            );
            return FeatureResult::narrative(text);
        }
    };

    let narrative = envelope
        .get("analysis")
        .and_then(Value::as_str)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| narratives.fallback_narrative.clone());

    FeatureResult::with_series(narrative, decode_series(definition, &envelope))
}

/// Decode `data` point by point, skipping points without a name or value
fn decode_series(
    definition: &TaskDefinition,
    envelope: &Map<String, Value>,
) -> Option<Vec<SeriesPoint>> {
    let items = match envelope.get("data") {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!(
                feature = %definition.feature,
                "Structured data is {}, not an array; dropping the chart",
                json_kind(other)
            );
            return None;
        }
    };

    let points = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match serde_json::from_value::<SeriesPoint>(item.clone()) {
                Ok(point) => Some(point),
                Err(e) => {
                    tracing::warn!(
                        feature = %definition.feature,
                        index,
                        "Skipping unreadable data point: {}",
                        e
                    );
                    None
                }
            }
        })
        .collect();

    Some(points)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
