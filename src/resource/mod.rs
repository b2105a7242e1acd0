//! # Resource Model
//!
//! The in-memory description of a REST resource tree: field schemas, their
//! validators, and the operation modes each resource allows.
//!
//! The generator only reads this model. It is built either through the
//! [`ResourceIndex`] binding API or from a definition file
//! (see [`definition`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod definition;
mod index;

pub use index::{Binding, Resource, ResourceId, ResourceIndex};

/// The rule describing a field's allowed values and shape.
///
/// Only `String`, `Array` and `Reference` have an OpenAPI mapping; the other
/// kinds are part of the model but are rejected (or omitted) by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validator {
    /// A string with optional length bounds and pattern.
    String {
        /// Minimum length; zero when unconstrained.
        #[serde(default)]
        min_len: usize,
        /// Maximum length; `None` or zero when unconstrained.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
        /// Regular expression the value must match.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// A list of values, each described by `values`.
    Array {
        /// Minimum item count; zero when unconstrained.
        #[serde(default)]
        min_len: usize,
        /// Maximum item count; `None` or zero when unconstrained.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
        /// Element descriptor.
        values: Box<Field>,
    },
    /// The identifier of an item of another resource.
    Reference {
        /// Path of the referenced resource (e.g. `users`).
        path: String,
    },
    /// A boolean.
    Bool,
    /// An integer.
    Integer,
    /// A floating point number.
    Float,
    /// A timestamp.
    Time,
    /// A nested object with its own schema.
    Object,
    /// A free-form key/value map.
    Dict,
}

impl Validator {
    /// Short name of the validator kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Validator::String { .. } => "string",
            Validator::Array { .. } => "array",
            Validator::Reference { .. } => "reference",
            Validator::Bool => "bool",
            Validator::Integer => "integer",
            Validator::Float => "float",
            Validator::Time => "time",
            Validator::Object => "object",
            Validator::Dict => "dict",
        }
    }
}

/// A named attribute of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field must be present.
    #[serde(default)]
    pub required: bool,
    /// Whether clients may set the field.
    #[serde(default)]
    pub read_only: bool,
    /// Shape of the field's values.
    pub validator: Validator,
}

impl Field {
    /// Creates an optional, writable field with the given validator.
    pub fn new(validator: Validator) -> Self {
        Self {
            description: None,
            required: false,
            read_only: false,
            validator,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Sets the field description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The full field set of a resource.
///
/// Fields are kept in a `BTreeMap` so every consumer iterates them in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Human readable description of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field name → field definition.
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

impl ResourceSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Sets the schema description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An interaction a resource may allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// `GET` on the collection.
    List,
    /// `POST` on the collection.
    Create,
    /// `GET` on an item.
    Read,
    /// `PUT` on an item.
    Replace,
    /// `PATCH` on an item.
    Update,
    /// `DELETE` on an item.
    Delete,
    /// `DELETE` on the collection.
    Clear,
}

/// Every mode.
pub const READ_WRITE: &[Mode] = &[
    Mode::Create,
    Mode::Read,
    Mode::Update,
    Mode::Replace,
    Mode::Delete,
    Mode::List,
    Mode::Clear,
];

/// Read and List.
pub const READ_ONLY: &[Mode] = &[Mode::Read, Mode::List];

/// Every mode that changes data.
pub const WRITE_ONLY: &[Mode] = &[
    Mode::Create,
    Mode::Update,
    Mode::Replace,
    Mode::Delete,
    Mode::Clear,
];

/// Per-resource settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conf {
    /// Modes exposed for the resource.
    pub allowed_modes: Vec<Mode>,
}

impl Conf {
    /// Creates a configuration allowing exactly `modes`.
    pub fn new(modes: &[Mode]) -> Self {
        Self {
            allowed_modes: modes.to_vec(),
        }
    }

    /// Returns true if `mode` is allowed.
    pub fn is_mode_allowed(&self, mode: Mode) -> bool {
        self.allowed_modes.contains(&mode)
    }
}
