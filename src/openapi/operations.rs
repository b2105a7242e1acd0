//! # Operation Descriptors
//!
//! One builder per resource mode. Each operation carries the inherited
//! ancestor parameters first, then its own parameters.

use super::components::{
    header_ref, parameter_ref, reference, response_ref, schema, schema_ref, ERROR, JSON_CONTENT,
    VALIDATION_ERROR,
};
use crate::config::ItemResponses;
use crate::inflection::title_case;
use crate::resource::Mode;
use indexmap::IndexMap;
use openapiv3::{
    ArrayType, Header, MediaType, Operation, Parameter, PathItem, ReferenceOr, RequestBody,
    Response, Responses, Schema, StatusCode, Type,
};

/// Emission order of the modes; collection modes first, then item modes.
pub const MODE_ORDER: [Mode; 7] = [
    Mode::List,
    Mode::Create,
    Mode::Clear,
    Mode::Read,
    Mode::Replace,
    Mode::Update,
    Mode::Delete,
];

/// HTTP verbs used by the resource modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The slot of this verb in a path item.
    pub fn slot(self, item: &mut PathItem) -> &mut Option<Operation> {
        match self {
            Method::Get => &mut item.get,
            Method::Post => &mut item.post,
            Method::Put => &mut item.put,
            Method::Patch => &mut item.patch,
            Method::Delete => &mut item.delete,
        }
    }
}

/// Where an operation lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `/.../<plural>`
    Collection,
    /// `/.../<plural>/{<singular>Id}`
    Item,
}

/// Verb and target of a mode.
pub fn route(mode: Mode) -> (Method, Target) {
    match mode {
        Mode::List => (Method::Get, Target::Collection),
        Mode::Create => (Method::Post, Target::Collection),
        Mode::Clear => (Method::Delete, Target::Collection),
        Mode::Read => (Method::Get, Target::Item),
        Mode::Replace => (Method::Put, Target::Item),
        Mode::Update => (Method::Patch, Target::Item),
        Mode::Delete => (Method::Delete, Target::Item),
    }
}

/// Everything the builders need to know about the resource being emitted.
pub struct OperationScope<'a> {
    /// Plural resource name.
    pub plural: &'a str,
    /// Singular resource name, also the schema component key.
    pub singular: &'a str,
    /// Identifier parameter component key.
    pub id_param: &'a str,
    /// `On<Ancestor>...` operation id suffix.
    pub suffix: &'a str,
    /// References to ancestor identifier parameters, root first.
    pub inherited: &'a [ReferenceOr<Parameter>],
    /// Body shape of single-item responses.
    pub item_responses: ItemResponses,
}

impl OperationScope<'_> {
    /// Builds the descriptor for `mode`.
    pub fn operation(&self, mode: Mode) -> Operation {
        match mode {
            Mode::List => self.list(),
            Mode::Create => self.create(),
            Mode::Clear => self.clear(),
            Mode::Read => self.read(),
            Mode::Replace => self.replace(),
            Mode::Update => self.update(),
            Mode::Delete => self.delete(),
        }
    }

    /// `<Verb><Name><suffix>`, with `Name` title-cased.
    pub fn operation_id(&self, verb: &str, name: &str) -> String {
        format!("{}{}{}", verb, title_case(name), self.suffix)
    }

    fn list(&self) -> Operation {
        let response = Response {
            description: format!("List of {}", self.plural),
            headers: headers(&["Date", "X-Total"]),
            content: json_content(self.items_schema()),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id("List", self.plural)),
            parameters: self.parameters(&["filter", "fields", "limit", "page", "skip", "total"]),
            responses: responses(200, response, false),
            ..Default::default()
        }
    }

    fn create(&self) -> Operation {
        let response = Response {
            description: format!("Create {}", self.singular),
            headers: headers(&["Etag", "Last-Modified"]),
            content: json_content(self.item_schema()),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id("Create", self.singular)),
            parameters: self.parameters(&[]),
            request_body: Some(self.request_body()),
            responses: responses(201, response, true),
            ..Default::default()
        }
    }

    fn clear(&self) -> Operation {
        let response = Response {
            description: format!("Clear {}", self.plural),
            headers: headers(&["Date", "X-Total"]),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id("Clear", self.plural)),
            parameters: self.parameters(&["filter"]),
            responses: responses(204, response, false),
            ..Default::default()
        }
    }

    fn read(&self) -> Operation {
        let response = Response {
            description: format!("Get {}", self.plural),
            headers: headers(&["Date", "X-Total"]),
            content: json_content(self.item_schema()),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id("Read", self.singular)),
            parameters: self.parameters(&["fields", self.id_param]),
            responses: responses(200, response, false),
            ..Default::default()
        }
    }

    fn replace(&self) -> Operation {
        self.write_item("Replace")
    }

    fn update(&self) -> Operation {
        self.write_item("Update")
    }

    fn write_item(&self, verb: &str) -> Operation {
        let response = Response {
            description: format!("{} {}", verb, self.plural),
            headers: headers(&["Etag", "Last-Modified"]),
            content: json_content(self.item_schema()),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id(verb, self.singular)),
            parameters: self.parameters(&[self.id_param]),
            request_body: Some(self.request_body()),
            responses: responses(200, response, true),
            ..Default::default()
        }
    }

    fn delete(&self) -> Operation {
        let response = Response {
            description: format!("Delete {}", self.plural),
            ..Default::default()
        };
        Operation {
            operation_id: Some(self.operation_id("Delete", self.singular)),
            parameters: self.parameters(&[self.id_param]),
            responses: responses(204, response, true),
            ..Default::default()
        }
    }

    fn parameters(&self, own: &[&str]) -> Vec<ReferenceOr<Parameter>> {
        self.inherited
            .iter()
            .cloned()
            .chain(own.iter().map(|name| reference(parameter_ref(name))))
            .collect()
    }

    fn request_body(&self) -> ReferenceOr<RequestBody> {
        ReferenceOr::Item(RequestBody {
            content: json_content(reference(schema_ref(self.singular))),
            ..Default::default()
        })
    }

    fn items_schema(&self) -> ReferenceOr<Schema> {
        ReferenceOr::Item(schema(Type::Array(ArrayType {
            items: Some(reference(schema_ref(self.singular))),
            min_items: None,
            max_items: None,
            unique_items: false,
        })))
    }

    fn item_schema(&self) -> ReferenceOr<Schema> {
        match self.item_responses {
            ItemResponses::Array => self.items_schema(),
            ItemResponses::Object => reference(schema_ref(self.singular)),
        }
    }
}

fn headers(names: &[&str]) -> IndexMap<String, ReferenceOr<Header>> {
    names
        .iter()
        .map(|name| (name.to_string(), reference(header_ref(name))))
        .collect()
}

fn json_content(schema: ReferenceOr<Schema>) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(
        JSON_CONTENT.to_string(),
        MediaType {
            schema: Some(schema),
            ..Default::default()
        },
    );
    content
}

fn responses(code: u16, success: Response, validates: bool) -> Responses {
    let mut by_code = IndexMap::new();
    by_code.insert(StatusCode::Code(code), ReferenceOr::Item(success));
    if validates {
        by_code.insert(
            StatusCode::Code(422),
            reference(response_ref(VALIDATION_ERROR)),
        );
    }
    Responses {
        default: Some(reference(response_ref(ERROR))),
        responses: by_code,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn scope<'a>(
        inherited: &'a [ReferenceOr<Parameter>],
        shape: ItemResponses,
    ) -> OperationScope<'a> {
        OperationScope {
            plural: "comments",
            singular: "comment",
            id_param: "commentId",
            suffix: "OnUserOnPost",
            inherited,
            item_responses: shape,
        }
    }

    fn refs(op: &Operation) -> Vec<String> {
        op.parameters
            .iter()
            .map(|p| match p {
                ReferenceOr::Reference { reference } => reference.clone(),
                ReferenceOr::Item(_) => panic!("Expected reference"),
            })
            .collect()
    }

    fn as_json(op: &Operation) -> Value {
        serde_json::to_value(op).unwrap()
    }

    #[test]
    fn test_routes() {
        assert_eq!(route(Mode::List), (Method::Get, Target::Collection));
        assert_eq!(route(Mode::Read), (Method::Get, Target::Item));
        assert_eq!(route(Mode::Clear), (Method::Delete, Target::Collection));
        assert_eq!(route(Mode::Delete), (Method::Delete, Target::Item));
        assert_eq!(route(Mode::Replace), (Method::Put, Target::Item));
        assert_eq!(route(Mode::Update), (Method::Patch, Target::Item));
        assert_eq!(route(Mode::Create), (Method::Post, Target::Collection));
    }

    #[test]
    fn test_operation_ids() {
        let s = scope(&[], ItemResponses::Array);
        let ids: Vec<_> = MODE_ORDER
            .iter()
            .map(|m| s.operation(*m).operation_id.unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![
                "ListCommentsOnUserOnPost",
                "CreateCommentOnUserOnPost",
                "ClearCommentsOnUserOnPost",
                "ReadCommentOnUserOnPost",
                "ReplaceCommentOnUserOnPost",
                "UpdateCommentOnUserOnPost",
                "DeleteCommentOnUserOnPost",
            ]
        );
    }

    #[test]
    fn test_inherited_parameters_come_first() {
        let inherited = vec![
            reference(parameter_ref("userId")),
            reference(parameter_ref("postId")),
        ];
        let s = scope(&inherited, ItemResponses::Array);

        assert_eq!(
            refs(&s.operation(Mode::List)),
            vec![
                "#/components/parameters/userId",
                "#/components/parameters/postId",
                "#/components/parameters/filter",
                "#/components/parameters/fields",
                "#/components/parameters/limit",
                "#/components/parameters/page",
                "#/components/parameters/skip",
                "#/components/parameters/total",
            ]
        );
        assert_eq!(
            refs(&s.operation(Mode::Read)),
            vec![
                "#/components/parameters/userId",
                "#/components/parameters/postId",
                "#/components/parameters/fields",
                "#/components/parameters/commentId",
            ]
        );
        assert_eq!(
            refs(&s.operation(Mode::Clear))[2..],
            ["#/components/parameters/filter".to_string()]
        );
        assert_eq!(refs(&s.operation(Mode::Create)).len(), 2);
    }

    #[test]
    fn test_create_shape() {
        let op = as_json(&scope(&[], ItemResponses::Array).operation(Mode::Create));
        assert_eq!(
            op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/comment"
        );
        let created = &op["responses"]["201"];
        assert_eq!(created["headers"]["Etag"]["$ref"], "#/components/headers/Etag");
        assert_eq!(
            created["headers"]["Last-Modified"]["$ref"],
            "#/components/headers/Last-Modified"
        );
        assert_eq!(
            created["content"]["application/json"]["schema"],
            json!({"type": "array", "items": {"$ref": "#/components/schemas/comment"}})
        );
        assert_eq!(
            op["responses"]["422"]["$ref"],
            "#/components/responses/ValidationError"
        );
        assert_eq!(op["responses"]["default"]["$ref"], "#/components/responses/Error");
    }

    #[test]
    fn test_list_and_read_shapes() {
        let s = scope(&[], ItemResponses::Array);
        let items = json!({"type": "array", "items": {"$ref": "#/components/schemas/comment"}});

        for (mode, description) in [
            (Mode::List, "List of comments"),
            (Mode::Read, "Get comments"),
        ] {
            let op = as_json(&s.operation(mode));
            let ok = &op["responses"]["200"];
            assert_eq!(ok["description"], description);
            assert_eq!(
                ok["headers"]["Date"]["$ref"],
                "#/components/headers/Date",
                "{:?}",
                mode
            );
            assert_eq!(
                ok["headers"]["X-Total"]["$ref"],
                "#/components/headers/X-Total",
                "{:?}",
                mode
            );
            assert!(ok["headers"]["Etag"].is_null());
            assert_eq!(ok["content"]["application/json"]["schema"], items);
            assert!(op.get("requestBody").is_none());
            assert!(op["responses"]["422"].is_null());
            assert_eq!(op["responses"]["default"]["$ref"], "#/components/responses/Error");
        }
    }

    #[test]
    fn test_replace_and_update_shapes() {
        let s = scope(&[], ItemResponses::Array);

        for (mode, description) in [
            (Mode::Replace, "Replace comments"),
            (Mode::Update, "Update comments"),
        ] {
            let op = as_json(&s.operation(mode));
            assert_eq!(
                op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
                "#/components/schemas/comment",
                "{:?}",
                mode
            );
            let ok = &op["responses"]["200"];
            assert_eq!(ok["description"], description);
            assert_eq!(ok["headers"]["Etag"]["$ref"], "#/components/headers/Etag");
            assert_eq!(
                ok["headers"]["Last-Modified"]["$ref"],
                "#/components/headers/Last-Modified"
            );
            assert!(ok["headers"]["Date"].is_null());
            assert_eq!(
                ok["content"]["application/json"]["schema"],
                json!({"type": "array", "items": {"$ref": "#/components/schemas/comment"}})
            );
            assert_eq!(
                op["responses"]["422"]["$ref"],
                "#/components/responses/ValidationError"
            );
            assert_eq!(op["responses"]["default"]["$ref"], "#/components/responses/Error");
            assert_eq!(refs(&s.operation(mode)), vec!["#/components/parameters/commentId"]);
        }
    }

    #[test]
    fn test_object_item_responses() {
        let s = scope(&[], ItemResponses::Object);
        for mode in [Mode::Create, Mode::Read, Mode::Replace, Mode::Update] {
            let op = as_json(&s.operation(mode));
            let code = if mode == Mode::Create { "201" } else { "200" };
            assert_eq!(
                op["responses"][code]["content"]["application/json"]["schema"],
                json!({"$ref": "#/components/schemas/comment"}),
                "{:?}",
                mode
            );
        }

        let list = as_json(&s.operation(Mode::List));
        assert_eq!(
            list["responses"]["200"]["content"]["application/json"]["schema"]["type"],
            "array"
        );
    }

    #[test]
    fn test_delete_and_clear_have_no_body() {
        let s = scope(&[], ItemResponses::Array);

        let delete = as_json(&s.operation(Mode::Delete));
        assert_eq!(delete["responses"]["204"], json!({"description": "Delete comments"}));
        assert!(delete["responses"]["422"].is_object());

        let clear = as_json(&s.operation(Mode::Clear));
        assert!(clear["responses"]["204"]["content"].is_null());
        assert_eq!(
            clear["responses"]["204"]["headers"]["X-Total"]["$ref"],
            "#/components/headers/X-Total"
        );
        assert!(clear["responses"]["422"].is_null());
    }

    #[test]
    fn test_read_has_no_validation_error() {
        let op = as_json(&scope(&[], ItemResponses::Array).operation(Mode::Read));
        assert!(op["responses"]["422"].is_null());
        assert!(op.get("requestBody").is_none());
    }
}
