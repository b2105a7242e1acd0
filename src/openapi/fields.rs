//! # Field Mapper
//!
//! Converts one field definition into one OpenAPI schema node.

use super::components::{schema, string_schema};
use crate::resource::{Field, Validator};
use derive_more::Display;
use openapiv3::{ArrayType, ReferenceOr, Schema, StringType, Type};

/// The validator kind has no OpenAPI mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("unsupported validator kind '{kind}'")]
pub struct Unsupported {
    /// Kind of the rejected validator (see [`Validator::kind`]).
    pub kind: &'static str,
}

/// Maps a validator to its schema node.
///
/// * strings keep `minLength` (zero when unset), `maxLength` only when positive,
///   and their pattern;
/// * arrays keep `minItems`, `maxItems` only when positive, and map their
///   element field recursively;
/// * references become plain strings (the target resource is not encoded).
pub fn map_validator(validator: &Validator) -> Result<Schema, Unsupported> {
    match validator {
        Validator::String {
            min_len,
            max_len,
            pattern,
        } => Ok(schema(Type::String(StringType {
            pattern: pattern.clone(),
            min_length: Some(*min_len),
            max_length: positive(*max_len),
            ..Default::default()
        }))),
        Validator::Array {
            min_len,
            max_len,
            values,
        } => {
            let items = map_field(values)?;
            Ok(schema(Type::Array(ArrayType {
                items: Some(ReferenceOr::Item(Box::new(items))),
                min_items: Some(*min_len),
                max_items: positive(*max_len),
                unique_items: false,
            })))
        }
        Validator::Reference { .. } => Ok(string_schema()),
        other => Err(Unsupported { kind: other.kind() }),
    }
}

/// Maps a field, carrying its description and read-only flag as metadata.
pub fn map_field(field: &Field) -> Result<Schema, Unsupported> {
    let mut node = map_validator(&field.validator)?;
    node.schema_data.description = field.description.clone();
    node.schema_data.read_only = field.read_only;
    Ok(node)
}

// A zero maximum would forbid every non-empty value.
fn positive(bound: Option<usize>) -> Option<usize> {
    bound.filter(|max| *max > 0)
}
