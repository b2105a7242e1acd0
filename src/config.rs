//! # Generator Configuration
//!
//! Named switches for the places where the generated document can follow
//! either the framework's historical output or a corrected shape.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// OpenAPI version written into the `openapi` field.
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";

/// How ancestor resources appear as path segments of nested resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AncestorSegments {
    /// `/users/{userId}/posts`, matching the framework's routes.
    #[default]
    Plural,
    /// `/user/{userId}/posts`, the framework's historical document output.
    /// Those paths do not match the routes it actually serves.
    Singular,
}

/// Body shape of single-item success responses (Create, Read, Replace, Update).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ItemResponses {
    /// An array of the item schema, as list responses are.
    #[default]
    Array,
    /// A direct reference to the item schema.
    Object,
}

/// What to do with a field whose validator has no OpenAPI mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedFields {
    /// Abort generation with `UnsupportedValidator`.
    #[default]
    Fail,
    /// Drop the property and record a diagnostic.
    Omit,
}

/// Settings for a single generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Value of the document's `openapi` field.
    pub openapi_version: String,
    /// Path segment form used for ancestors.
    pub ancestor_segments: AncestorSegments,
    /// Shape of single-item success bodies.
    pub item_responses: ItemResponses,
    /// Policy for unmapped validators.
    pub unsupported_fields: UnsupportedFields,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            ancestor_segments: AncestorSegments::default(),
            item_responses: ItemResponses::default(),
            unsupported_fields: UnsupportedFields::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.openapi_version, "3.0.0");
        assert_eq!(config.ancestor_segments, AncestorSegments::Plural);
        assert_eq!(config.item_responses, ItemResponses::Array);
        assert_eq!(config.unsupported_fields, UnsupportedFields::Fail);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config: GeneratorConfig =
            serde_yaml::from_str("item_responses: object\nunsupported_fields: omit\n").unwrap();
        assert_eq!(config.item_responses, ItemResponses::Object);
        assert_eq!(config.unsupported_fields, UnsupportedFields::Omit);
        assert_eq!(config.ancestor_segments, AncestorSegments::Plural);
        assert_eq!(config.openapi_version, DEFAULT_OPENAPI_VERSION);
    }
}
