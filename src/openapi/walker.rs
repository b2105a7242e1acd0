//! # Resource Tree Walker
//!
//! Depth-first traversal of the resource index. For every resource it
//! registers the compiled schema and the identifier parameter, derives paths
//! and operation ids from the ancestor chain, emits the allowed operations and
//! recurses into the sub-resources.

use super::components::{parameter_ref, reference, schema_ref, STATIC_OWNER};
use super::operations::{route, Method, OperationScope, Target, MODE_ORDER};
use super::schema::compile_schema;
use super::Diagnostic;
use crate::config::{AncestorSegments, GeneratorConfig};
use crate::error::{AppError, AppResult};
use crate::inflection::{singularize, title_case};
use crate::resource::{Resource, ResourceId, ResourceIndex};
use indexmap::IndexMap;
use openapiv3::{
    Components, OpenAPI, Operation, Parameter, ParameterData, ParameterSchemaOrContent, PathItem,
    PathStyle, ReferenceOr,
};
use std::collections::HashMap;

/// Mutable state of one generation pass.
pub struct Walker<'a> {
    index: &'a ResourceIndex,
    config: &'a GeneratorConfig,
    doc: &'a mut OpenAPI,
    schema_owners: HashMap<String, String>,
    parameter_owners: HashMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Walker<'a> {
    /// Prepares a walk writing into `doc`.
    ///
    /// Keys already present in the document's components (the static
    /// vocabulary) are treated as taken.
    pub fn new(
        index: &'a ResourceIndex,
        config: &'a GeneratorConfig,
        doc: &'a mut OpenAPI,
    ) -> Self {
        let components = doc.components.get_or_insert_with(Components::default);
        let owned = |keys: Vec<&String>| -> HashMap<String, String> {
            keys.into_iter()
                .map(|k| (k.clone(), STATIC_OWNER.to_string()))
                .collect()
        };
        let schema_owners = owned(components.schemas.keys().collect());
        let parameter_owners = owned(components.parameters.keys().collect());

        Self {
            index,
            config,
            doc,
            schema_owners,
            parameter_owners,
            diagnostics: Vec::new(),
        }
    }

    /// Walks every top-level resource and returns the collected diagnostics.
    pub fn run(mut self) -> AppResult<Vec<Diagnostic>> {
        for root in self.index.roots() {
            self.add_resource(&[], *root)?;
        }
        Ok(self.diagnostics)
    }

    /// Emits `id` and its descendants. `ancestors` runs from the root to the
    /// immediate parent.
    pub fn add_resource(&mut self, ancestors: &[ResourceId], id: ResourceId) -> AppResult<()> {
        let rsc = self.index.get(id)?;
        let owner = self.resource_path(ancestors, rsc)?;
        let plural = rsc.name();
        let singular = singularize(plural);
        let id_param = format!("{}Id", singular);

        tracing::debug!(resource = %owner, %singular, "adding resource");

        claim(&mut self.schema_owners, &singular, &owner)?;
        claim(&mut self.parameter_owners, &id_param, &owner)?;

        let compiled = compile_schema(
            &owner,
            rsc.schema(),
            self.config.unsupported_fields,
            &mut self.diagnostics,
        )?;
        if !rsc.schema().fields.contains_key("id") {
            tracing::warn!(
                resource = %owner,
                "no 'id' field; {} points at a missing property",
                id_param
            );
        }

        let components = self.doc.components.get_or_insert_with(Components::default);
        components
            .schemas
            .insert(singular.clone(), ReferenceOr::Item(compiled));
        components.parameters.insert(
            id_param.clone(),
            ReferenceOr::Item(id_parameter(&singular, &id_param)),
        );

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut inherited = Vec::new();
        for ancestor_id in ancestors {
            let ancestor = self.index.get(*ancestor_id)?;
            let ancestor_singular = singularize(ancestor.name());
            let ancestor_param = format!("{}Id", ancestor_singular);
            let segment = match self.config.ancestor_segments {
                AncestorSegments::Plural => ancestor.name(),
                AncestorSegments::Singular => ancestor_singular.as_str(),
            };

            prefix.push_str(&format!("/{}/{{{}}}", segment, ancestor_param));
            suffix.push_str(&format!("On{}", title_case(&ancestor_singular)));
            inherited.push(reference(parameter_ref(&ancestor_param)));
        }

        let collection_path = format!("{}/{}", prefix, plural);
        let item_path = format!("{}/{{{}}}", collection_path, id_param);

        let scope = OperationScope {
            plural,
            singular: &singular,
            id_param: &id_param,
            suffix: &suffix,
            inherited: &inherited,
            item_responses: self.config.item_responses,
        };

        for mode in MODE_ORDER {
            if !rsc.conf().is_mode_allowed(mode) {
                continue;
            }
            let (method, target) = route(mode);
            let path = match target {
                Target::Collection => &collection_path,
                Target::Item => &item_path,
            };
            let operation = scope.operation(mode);
            tracing::debug!(
                operation_id = operation.operation_id.as_deref().unwrap_or_default(),
                %path,
                "adding operation"
            );
            self.add_operation(path, method, operation);
        }

        let mut chain = ancestors.to_vec();
        chain.push(id);
        for binding in rsc.children() {
            if chain.contains(&binding.resource) {
                return Err(AppError::CyclicResourceTree {
                    path: self.cycle_path(&chain, binding.resource)?,
                });
            }
            tracing::trace!(
                parent = %owner,
                parent_field = %binding.parent_field,
                "descending into sub-resource"
            );
            self.add_resource(&chain, binding.resource)?;
        }

        Ok(())
    }

    fn add_operation(&mut self, path: &str, method: Method, operation: Operation) {
        let entry = self
            .doc
            .paths
            .paths
            .entry(path.to_string())
            .or_insert_with(|| ReferenceOr::Item(PathItem::default()));
        if let ReferenceOr::Item(item) = entry {
            *method.slot(item) = Some(operation);
        }
    }

    fn resource_path(&self, ancestors: &[ResourceId], rsc: &Resource) -> AppResult<String> {
        let mut names = Vec::with_capacity(ancestors.len() + 1);
        for ancestor in ancestors {
            names.push(self.index.get(*ancestor)?.name());
        }
        names.push(rsc.name());
        Ok(names.join("."))
    }

    fn cycle_path(&self, chain: &[ResourceId], repeated: ResourceId) -> AppResult<String> {
        let start = chain.iter().position(|id| *id == repeated).unwrap_or(0);
        let mut names = Vec::new();
        for id in &chain[start..] {
            names.push(self.index.get(*id)?.name());
        }
        names.push(self.index.get(repeated)?.name());
        Ok(names.join(" -> "))
    }
}

/// Records `owner` as the owner of `key`, failing if someone else holds it.
fn claim(owners: &mut HashMap<String, String>, key: &str, owner: &str) -> AppResult<()> {
    if let Some(existing) = owners.get(key) {
        return Err(AppError::ComponentNameCollision {
            key: key.to_string(),
            existing: existing.clone(),
            incoming: owner.to_string(),
        });
    }
    owners.insert(key.to_string(), owner.to_string());
    Ok(())
}

/// Path parameter typed by the `id` property of the resource schema.
fn id_parameter(singular: &str, id_param: &str) -> Parameter {
    Parameter::Path {
        parameter_data: ParameterData {
            name: id_param.to_string(),
            description: Some(format!("The {}'s ID", singular)),
            required: true,
            deprecated: None,
            format: ParameterSchemaOrContent::Schema(reference(format!(
                "{}/properties/id",
                schema_ref(singular)
            ))),
            example: None,
            examples: IndexMap::new(),
            explode: None,
            extensions: IndexMap::new(),
        },
        style: PathStyle::Simple,
    }
}
