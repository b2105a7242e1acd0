//! # Static Vocabulary
//!
//! The fixed part of every document's component table: query parameters,
//! response headers, error schemas and error responses. A fresh table is
//! built for every generation call.

use indexmap::IndexMap;
use openapiv3::{
    Components, Header, HeaderStyle, IntegerType, MediaType, ObjectType, Parameter, ParameterData,
    ParameterSchemaOrContent, QueryStyle, ReferenceOr, Response, Schema, SchemaData, SchemaKind,
    StringFormat, StringType, Type, VariantOrUnknownOrEmpty,
};
use serde_json::json;

/// Content type of every request and response body.
pub const JSON_CONTENT: &str = "application/json";

/// Owner recorded for component keys that come from the static vocabulary.
pub const STATIC_OWNER: &str = "static vocabulary";

/// Schema and response name for generic errors.
pub const ERROR: &str = "Error";

/// Schema and response name for validation errors.
pub const VALIDATION_ERROR: &str = "ValidationError";

/// Builds a `$ref` to a component schema.
pub fn schema_ref(name: &str) -> String {
    format!("#/components/schemas/{}", name)
}

/// Builds a `$ref` to a component parameter.
pub fn parameter_ref(name: &str) -> String {
    format!("#/components/parameters/{}", name)
}

/// Builds a `$ref` to a component header.
pub fn header_ref(name: &str) -> String {
    format!("#/components/headers/{}", name)
}

/// Builds a `$ref` to a component response.
pub fn response_ref(name: &str) -> String {
    format!("#/components/responses/{}", name)
}

/// Wraps a pointer as a reference.
pub fn reference<T>(pointer: String) -> ReferenceOr<T> {
    ReferenceOr::Reference { reference: pointer }
}

/// Returns a new component table holding only the static vocabulary.
pub fn static_components() -> Components {
    Components {
        parameters: static_parameters(),
        headers: static_headers(),
        schemas: static_schemas(),
        responses: static_responses(),
        ..Default::default()
    }
}

fn static_parameters() -> IndexMap<String, ReferenceOr<Parameter>> {
    let mut page = integer_schema(Some(1));
    page.schema_data.default = Some(json!(1));

    let mut total = schema(Type::Boolean(Default::default()));
    total.schema_data.default = Some(json!(false));

    let params = vec![
        query_parameter(
            "filter",
            "[Filter](http://rest-layer.io/#filtering) which entries to show. \
             Allows a MongoDB-like query syntax.",
            string_schema(),
        ),
        query_parameter(
            "fields",
            "[Select](http://rest-layer.io/#field-selection) which fields to show, \
             including [embedding](http://rest-layer.io/#embedding) of related resources.",
            string_schema(),
        ),
        query_parameter(
            "limit",
            "Limit maximum entries per [page](http://rest-layer.io/#pagination).",
            integer_schema(Some(0)),
        ),
        query_parameter(
            "skip",
            "[Skip](http://rest-layer.io/#skipping) the first N entries.",
            integer_schema(Some(0)),
        ),
        query_parameter(
            "page",
            "The [page](http://rest-layer.io/#pagination) number to display, starting at 1.",
            page,
        ),
        query_parameter(
            "total",
            "Force total number of entries to be included in the response header. \
             This could have performance implications.",
            total,
        ),
    ];

    params
        .into_iter()
        .map(|(name, param)| (name.to_string(), ReferenceOr::Item(param)))
        .collect()
}

fn static_headers() -> IndexMap<String, ReferenceOr<Header>> {
    let date_time = schema(Type::String(StringType {
        format: VariantOrUnknownOrEmpty::Item(StringFormat::DateTime),
        ..Default::default()
    }));

    let headers = vec![
        ("Date", "The time this request was served.", date_time),
        (
            "Etag",
            "Provides [concurrency-control](http://rest-layer.io/#data-integrity-and-concurrency-control) \
             down to the storage layer.",
            string_schema(),
        ),
        (
            "Last-Modified",
            "When this resource was last modified.",
            string_schema(),
        ),
        (
            "X-Total",
            "Total number of entries matching the supplied filter.",
            integer_schema(None),
        ),
    ];

    headers
        .into_iter()
        .map(|(name, description, schema)| {
            let header = Header {
                description: Some(description.to_string()),
                style: HeaderStyle::Simple,
                required: false,
                deprecated: None,
                format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(schema)),
                example: None,
                examples: IndexMap::new(),
                extensions: IndexMap::new(),
            };
            (name.to_string(), ReferenceOr::Item(header))
        })
        .collect()
}

fn static_schemas() -> IndexMap<String, ReferenceOr<Schema>> {
    let mut schemas = IndexMap::new();
    schemas.insert(ERROR.to_string(), ReferenceOr::Item(error_schema()));
    schemas.insert(VALIDATION_ERROR.to_string(), ReferenceOr::Item(error_schema()));
    schemas
}

fn static_responses() -> IndexMap<String, ReferenceOr<Response>> {
    let mut responses = IndexMap::new();
    responses.insert(
        ERROR.to_string(),
        ReferenceOr::Item(error_response("Error", ERROR)),
    );
    responses.insert(
        VALIDATION_ERROR.to_string(),
        ReferenceOr::Item(error_response("Validation Error", VALIDATION_ERROR)),
    );
    responses
}

fn error_schema() -> Schema {
    let mut code = integer_schema(None);
    code.schema_data.description = Some("HTTP Status code".to_string());
    let mut message = string_schema();
    message.schema_data.description = Some("Error message".to_string());

    let mut properties = IndexMap::new();
    properties.insert("code".to_string(), ReferenceOr::Item(Box::new(code)));
    properties.insert("message".to_string(), ReferenceOr::Item(Box::new(message)));

    schema(Type::Object(ObjectType {
        properties,
        required: vec!["code".to_string(), "message".to_string()],
        ..Default::default()
    }))
}

fn error_response(description: &str, schema_name: &str) -> Response {
    let mut content = IndexMap::new();
    content.insert(
        JSON_CONTENT.to_string(),
        MediaType {
            schema: Some(reference(schema_ref(schema_name))),
            ..Default::default()
        },
    );
    Response {
        description: description.to_string(),
        content,
        ..Default::default()
    }
}

fn query_parameter<'a>(
    name: &'a str,
    description: &str,
    schema: Schema,
) -> (&'a str, Parameter) {
    let parameter = Parameter::Query {
        parameter_data: ParameterData {
            name: name.to_string(),
            description: Some(description.to_string()),
            required: false,
            deprecated: None,
            format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(schema)),
            example: None,
            examples: IndexMap::new(),
            explode: None,
            extensions: IndexMap::new(),
        },
        allow_reserved: false,
        style: QueryStyle::Form,
        allow_empty_value: None,
    };
    (name, parameter)
}

/// Wraps a type into a schema without metadata.
pub fn schema(ty: Type) -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(ty),
    }
}

/// A plain string schema.
pub fn string_schema() -> Schema {
    schema(Type::String(StringType::default()))
}

fn integer_schema(minimum: Option<i64>) -> Schema {
    schema(Type::Integer(IntegerType {
        minimum,
        ..Default::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_keys() {
        let components = static_components();

        let params: Vec<_> = components.parameters.keys().cloned().collect();
        assert_eq!(params, vec!["filter", "fields", "limit", "skip", "page", "total"]);

        let headers: Vec<_> = components.headers.keys().cloned().collect();
        assert_eq!(headers, vec!["Date", "Etag", "Last-Modified", "X-Total"]);

        let schemas: Vec<_> = components.schemas.keys().cloned().collect();
        assert_eq!(schemas, vec!["Error", "ValidationError"]);

        let responses: Vec<_> = components.responses.keys().cloned().collect();
        assert_eq!(responses, vec!["Error", "ValidationError"]);
    }

    #[test]
    fn test_error_schema_shape() {
        let json = serde_json::to_value(static_components()).unwrap();
        let error = &json["schemas"]["Error"];
        assert_eq!(error["type"], "object");
        assert_eq!(error["required"], json!(["code", "message"]));
        assert_eq!(error["properties"]["code"]["type"], "integer");
        assert_eq!(error["properties"]["message"]["type"], "string");
        assert_eq!(json["schemas"]["ValidationError"], *error);
    }

    #[test]
    fn test_responses_reference_schemas() {
        let json = serde_json::to_value(static_components()).unwrap();
        assert_eq!(
            json["responses"]["ValidationError"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ValidationError"
        );
    }

    #[test]
    fn test_paging_parameters() {
        let json = serde_json::to_value(static_components()).unwrap();
        let page = &json["parameters"]["page"];
        assert_eq!(page["in"], "query");
        assert_eq!(page["schema"]["minimum"], 1);
        assert_eq!(page["schema"]["default"], 1);
        assert_eq!(json["parameters"]["total"]["schema"]["type"], "boolean");
        assert_eq!(json["parameters"]["total"]["schema"]["default"], false);
    }

    #[test]
    fn test_each_call_is_independent() {
        let mut first = static_components();
        first.schemas.insert("user".into(), ReferenceOr::Item(string_schema()));
        assert!(!static_components().schemas.contains_key("user"));
    }
}
