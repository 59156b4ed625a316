//! Structured output schemas
//!
//! A small subset of the OpenAPI schema dialect understood by the Gemini
//! `responseSchema` field. Properties are kept in a `BTreeMap` so a schema
//! always serializes to the same bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primitive schema types, serialized in upper case (`"OBJECT"`, `"STRING"`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResponseSchema>,

    /// Properties the model must always emit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
}

impl ResponseSchema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// Attach a description hint for the model
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an object property
    pub fn property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark properties as required, keeping declaration order
    pub fn require(mut self, names: &[&str]) -> Self {
        for name in names {
            if !self.required.iter().any(|r| r == name) {
                self.required.push((*name).to_string());
            }
        }
        self
    }
}
