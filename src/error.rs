#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.
//!
//! Every generation failure is structural: it is discovered from the resource
//! tree alone, so re-running on the same input reproduces the same error.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A field's validator kind has no OpenAPI mapping.
    #[from(ignore)]
    #[display("Unsupported validator '{kind}' on field '{field}' of resource '{resource}'")]
    UnsupportedValidator {
        /// Dotted path of the resource owning the field.
        resource: String,
        /// Name of the offending field.
        field: String,
        /// Validator kind that could not be mapped.
        kind: String,
    },

    /// Two resources produce the same component key.
    #[from(ignore)]
    #[display("Component name collision on '{key}': '{existing}' and '{incoming}'")]
    ComponentNameCollision {
        /// The contested component key.
        key: String,
        /// Owner of the key registered first.
        existing: String,
        /// Resource that attempted to register the key again.
        incoming: String,
    },

    /// Traversal reached a resource that is already one of its own ancestors.
    #[from(ignore)]
    #[display("Cyclic resource tree: {path}")]
    CyclicResourceTree {
        /// The cycle, rendered as `a -> b -> a`.
        path: String,
    },

    /// A `ResourceId` that does not belong to the index it was used with.
    #[from(ignore)]
    #[display("Unknown resource id: {_0}")]
    UnknownResource(usize),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML (de)serialization failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
