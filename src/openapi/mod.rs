//! # OpenAPI Generation
//!
//! Builds an OpenAPI 3 document from a [`ResourceIndex`].
//!
//! A document is assembled in a single depth-first pass: it starts from a
//! fresh copy of the static vocabulary, and every resource adds one schema,
//! one identifier parameter and its allowed operations.

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::resource::ResourceIndex;
use derive_more::Display;
use openapiv3::{Info, OpenAPI};

pub mod components;
pub mod fields;
pub mod operations;
pub mod schema;
pub mod walker;

use walker::Walker;

/// A property left out of the document under the `omit` policy.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{resource}.{field}: unsupported validator '{kind}'")]
pub struct Diagnostic {
    /// Dotted path of the resource.
    pub resource: String,
    /// Omitted field.
    pub field: String,
    /// Validator kind that had no mapping.
    pub kind: String,
}

/// Result of a successful generation pass.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The assembled document.
    pub document: OpenAPI,
    /// Properties omitted along the way (always empty under the `fail` policy).
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates the document for every resource bound on `index`.
///
/// Generation is all-or-nothing: the first structural error aborts it.
pub fn generate(
    index: &ResourceIndex,
    info: Info,
    config: &GeneratorConfig,
) -> AppResult<Generation> {
    let mut document = OpenAPI {
        openapi: config.openapi_version.clone(),
        info,
        components: Some(components::static_components()),
        ..Default::default()
    };

    let diagnostics = Walker::new(index, config, &mut document).run()?;

    tracing::info!(
        resources = index.len(),
        paths = document.paths.paths.len(),
        omitted = diagnostics.len(),
        "generated OpenAPI document"
    );

    Ok(Generation {
        document,
        diagnostics,
    })
}

/// Generates the document and drops the diagnostics.
pub fn new_openapi_from_index(
    index: &ResourceIndex,
    info: Info,
    config: &GeneratorConfig,
) -> AppResult<OpenAPI> {
    generate(index, info, config).map(|generation| generation.document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Conf, ResourceSchema, READ_ONLY};

    #[test]
    fn test_empty_index() {
        let doc = new_openapi_from_index(
            &ResourceIndex::new(),
            Info::default(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(doc.openapi, "3.0.0");
        assert!(doc.paths.paths.is_empty());
        assert_eq!(doc.components.unwrap().schemas.len(), 2);
    }

    #[test]
    fn test_info_and_version() {
        let mut index = ResourceIndex::new();
        index.bind("tags", ResourceSchema::new(), Conf::new(READ_ONLY));
        let config = GeneratorConfig {
            openapi_version: "3.0.3".into(),
            ..Default::default()
        };
        let info = Info {
            title: "Tags".into(),
            version: "0.1".into(),
            ..Default::default()
        };

        let generation = generate(&index, info, &config).unwrap();
        assert_eq!(generation.document.openapi, "3.0.3");
        assert_eq!(generation.document.info.title, "Tags");
        assert!(generation.diagnostics.is_empty());
        assert_eq!(generation.document.paths.paths.len(), 2);
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            resource: "users".into(),
            field: "created".into(),
            kind: "time".into(),
        };
        assert_eq!(d.to_string(), "users.created: unsupported validator 'time'");
    }
}
