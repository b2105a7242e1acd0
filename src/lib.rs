#![deny(missing_docs)]

//! # REST OpenAPI
//!
//! Derives an OpenAPI 3 document from a REST resource tree: the same field
//! schemas the framework validates against become component schemas, and
//! every allowed mode of every (nested) resource becomes an operation.
//!
//! ```
//! use rest_openapi::{
//!     new_openapi_from_index, Conf, Field, GeneratorConfig, ResourceIndex, ResourceSchema,
//!     Validator, READ_WRITE,
//! };
//!
//! let mut index = ResourceIndex::new();
//! let schema = ResourceSchema::new().field(
//!     "id",
//!     Field::new(Validator::String { min_len: 0, max_len: None, pattern: None }).required(),
//! );
//! let users = index.bind("users", schema.clone(), Conf::new(READ_WRITE));
//! index.bind_child(users, "posts", "user", schema, Conf::new(READ_WRITE)).unwrap();
//!
//! let doc = new_openapi_from_index(&index, Default::default(), &GeneratorConfig::default())
//!     .unwrap();
//! assert!(doc.paths.paths.contains_key("/users/{userId}/posts/{postId}"));
//! ```

/// Shared error types.
pub mod error;

/// Generator settings.
pub mod config;

/// Plural → singular conversion.
pub mod inflection;

/// Resource tree model and definition files.
pub mod resource;

/// Document generation.
pub mod openapi;

/// Document serialization.
pub mod output;

pub use config::{AncestorSegments, GeneratorConfig, ItemResponses, UnsupportedFields};
pub use error::{AppError, AppResult};
pub use openapi::{generate, new_openapi_from_index, Diagnostic, Generation};
pub use output::{render, write_document, OutputFormat};
pub use resource::definition::ApiDefinition;
pub use resource::{
    Conf, Field, Mode, Resource, ResourceId, ResourceIndex, ResourceSchema, Validator, READ_ONLY,
    READ_WRITE, WRITE_ONLY,
};
