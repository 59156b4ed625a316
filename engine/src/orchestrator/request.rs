//! Request construction
//!
//! Pure functions: the same `(feature, text, style)` always produce the same
//! request, byte for byte.

use crate::features::{StyleLabel, TaskDefinition};
use crate::llm::GenerationRequest;

/// The shared instruction preamble naming the style and the dual mandate
pub fn preamble(style: &StyleLabel) -> String {
    format!(
        "You are an advanced AI integrated into an Enterprise Dashboard. \
         The user has selected the artistic style of {}. \
         Your output should reflect the philosophy, vocabulary, and tone of this painter, \
         while still performing the requested enterprise task.",
        style
    )
}

/// Combine preamble and task suffix
pub fn system_instruction(definition: &TaskDefinition, style: &StyleLabel) -> String {
    format!("{} {}", preamble(style), definition.instruction_suffix)
}

/// Build the full request for one invocation
pub fn build_request(
    definition: &TaskDefinition,
    user_text: &str,
    style: &StyleLabel,
) -> GenerationRequest {
    let request = GenerationRequest::new(
        system_instruction(definition, style),
        definition.prompt_transform.apply(user_text),
    );

    match definition.output_schema() {
        Some(schema) => request.with_schema(schema),
        None => request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{lookup, Feature};

    fn style(name: &str) -> StyleLabel {
        StyleLabel::new(name).unwrap()
    }

    #[test]
    fn test_preamble_names_the_style() {
        let text = preamble(&style("Frida Kahlo"));
        assert!(text.contains("the artistic style of Frida Kahlo."));
        assert!(text.contains("while still performing the requested enterprise task."));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_system_instruction_appends_suffix() {
        let definition = lookup(Feature::ToneAlchemist);
        let instruction = system_instruction(definition, &style("Dali"));
        assert!(instruction.ends_with(definition.instruction_suffix));
        assert!(instruction.contains("enterprise task. Task: Rewrite"));
    }

    #[test]
    fn test_sentiment_request_prefixes_content() {
        let request = build_request(
            lookup(Feature::SentimentSymphony),
            "Customers love the new app",
            &style("Monet"),
        );
        assert_eq!(
            request.content,
            "Analyze sentiment for: Customers love the new app"
        );
        assert!(request.is_structured());
    }

    #[test]
    fn test_free_text_request_passes_content_through() {
        let request = build_request(
            lookup(Feature::DreamSummarizer),
            "Q3 report text",
            &style("Van Gogh"),
        );
        assert_eq!(request.content, "Q3 report text");
        assert!(request.schema.is_none());
    }

    #[test]
    fn test_schema_matches_registry() {
        for feature in Feature::ALL {
            let definition = lookup(feature);
            let request = build_request(definition, "text", &style("Monet"));
            assert_eq!(request.schema, definition.output_schema());
        }
    }
}
