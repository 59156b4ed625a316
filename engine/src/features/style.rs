use sdk::errors::EngineError;
use serde::Serialize;
use std::fmt;

/// The persona whose voice colors the output, e.g. "Monet".
///
/// Purely textual; the only rule is that it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleLabel(String);

impl StyleLabel {
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the label is empty or whitespace.
    pub fn new(label: impl Into<String>) -> Result<Self, EngineError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput(
                "style label must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for StyleLabel {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
