//! # Schema Compiler
//!
//! Turns a resource's field set into one object schema, field by field.

use super::components::schema;
use super::fields::map_field;
use super::Diagnostic;
use crate::config::UnsupportedFields;
use crate::error::{AppError, AppResult};
use crate::resource::ResourceSchema;
use indexmap::IndexMap;
use openapiv3::{ObjectType, ReferenceOr, Schema, Type};

/// Compiles `fields` of the resource at `resource` (dotted path) into an
/// object schema.
///
/// Properties follow the lexicographic field order. Required fields are
/// listed under `required`. Unmapped validators either abort or, under
/// [`UnsupportedFields::Omit`], drop the property and push a diagnostic.
pub fn compile_schema(
    resource: &str,
    fields: &ResourceSchema,
    policy: UnsupportedFields,
    diagnostics: &mut Vec<Diagnostic>,
) -> AppResult<Schema> {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for (name, field) in &fields.fields {
        match map_field(field) {
            Ok(node) => {
                properties.insert(name.clone(), ReferenceOr::Item(Box::new(node)));
                if field.required {
                    required.push(name.clone());
                }
            }
            Err(unsupported) => match policy {
                UnsupportedFields::Fail => {
                    return Err(AppError::UnsupportedValidator {
                        resource: resource.to_string(),
                        field: name.clone(),
                        kind: unsupported.kind.to_string(),
                    });
                }
                UnsupportedFields::Omit => {
                    let diagnostic = Diagnostic {
                        resource: resource.to_string(),
                        field: name.clone(),
                        kind: unsupported.kind.to_string(),
                    };
                    tracing::warn!(%diagnostic, "omitting property");
                    diagnostics.push(diagnostic);
                }
            },
        }
    }

    let mut object = schema(Type::Object(ObjectType {
        properties,
        required,
        ..Default::default()
    }));
    object.schema_data.description = fields.description.clone();
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Field, Validator};
    use openapiv3::SchemaKind;

    fn blog_post() -> ResourceSchema {
        ResourceSchema::new()
            .describe("A blog post")
            .field(
                "title",
                Field::new(Validator::String {
                    min_len: 1,
                    max_len: Some(150),
                    pattern: None,
                })
                .required(),
            )
            .field(
                "id",
                Field::new(Validator::String {
                    min_len: 0,
                    max_len: None,
                    pattern: None,
                })
                .required()
                .read_only(),
            )
            .field(
                "user",
                Field::new(Validator::Reference {
                    path: "users".into(),
                }),
            )
            .field(
                "tags",
                Field::new(Validator::Array {
                    min_len: 0,
                    max_len: Some(10),
                    values: Box::new(Field::new(Validator::String {
                        min_len: 0,
                        max_len: None,
                        pattern: None,
                    })),
                }),
            )
    }

    fn as_object(schema: &Schema) -> &ObjectType {
        match &schema.schema_kind {
            SchemaKind::Type(Type::Object(o)) => o,
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_one_property_per_field() {
        let mut diagnostics = Vec::new();
        let compiled = compile_schema(
            "posts",
            &blog_post(),
            UnsupportedFields::Fail,
            &mut diagnostics,
        )
        .unwrap();

        let object = as_object(&compiled);
        let names: Vec<_> = object.properties.keys().cloned().collect();
        assert_eq!(names, vec!["id", "tags", "title", "user"]);
        assert_eq!(object.required, vec!["id", "title"]);
        assert_eq!(compiled.schema_data.description.as_deref(), Some("A blog post"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_field_fails() {
        let fields = blog_post().field("published", Field::new(Validator::Bool));
        let err = compile_schema("users.posts", &fields, UnsupportedFields::Fail, &mut Vec::new())
            .unwrap_err();
        match err {
            AppError::UnsupportedValidator {
                resource,
                field,
                kind,
            } => {
                assert_eq!(resource, "users.posts");
                assert_eq!(field, "published");
                assert_eq!(kind, "bool");
            }
            other => panic!("Expected UnsupportedValidator, got {}", other),
        }
    }

    #[test]
    fn test_unsupported_field_omitted() {
        let fields = blog_post()
            .field("published", Field::new(Validator::Bool).required())
            .field("created", Field::new(Validator::Time));
        let mut diagnostics = Vec::new();
        let compiled =
            compile_schema("posts", &fields, UnsupportedFields::Omit, &mut diagnostics).unwrap();

        let object = as_object(&compiled);
        assert_eq!(object.properties.len(), 4);
        assert!(!object.properties.contains_key("published"));
        assert!(!object.required.contains(&"published".to_string()));

        let omitted: Vec<_> = diagnostics.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(omitted, vec!["created", "published"]);
    }

    #[test]
    fn test_empty_schema() {
        let compiled = compile_schema(
            "things",
            &ResourceSchema::new(),
            UnsupportedFields::Fail,
            &mut Vec::new(),
        )
        .unwrap();
        assert!(as_object(&compiled).properties.is_empty());
    }
}
