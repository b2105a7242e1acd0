//! # Resource Index
//!
//! Arena of bound resources. Top-level resources are bound on the index,
//! sub-resources on a parent; [`ResourceIndex::link`] re-attaches an existing
//! resource under another parent.

use super::{Conf, ResourceSchema};
use crate::error::{AppError, AppResult};

/// Handle to a resource inside a [`ResourceIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(usize);

impl ResourceId {
    /// Position of the resource in its index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A sub-resource attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Field on the child that references the parent item.
    pub parent_field: String,
    /// The attached resource.
    pub resource: ResourceId,
}

/// A bound resource.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    schema: ResourceSchema,
    conf: Conf,
    children: Vec<Binding>,
}

impl Resource {
    /// Plural name, also the collection path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field schema.
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// Resource settings.
    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// Sub-resources in binding order.
    pub fn children(&self) -> &[Binding] {
        &self.children
    }
}

/// The resource tree handed to the generator.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    resources: Vec<Resource>,
    roots: Vec<ResourceId>,
}

impl ResourceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a top-level resource on `/<name>`.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        schema: ResourceSchema,
        conf: Conf,
    ) -> ResourceId {
        let id = self.push(name.into(), schema, conf);
        self.roots.push(id);
        id
    }

    /// Binds a sub-resource under `parent`.
    ///
    /// `parent_field` names the field of the new resource that references
    /// the parent item.
    pub fn bind_child(
        &mut self,
        parent: ResourceId,
        name: impl Into<String>,
        parent_field: impl Into<String>,
        schema: ResourceSchema,
        conf: Conf,
    ) -> AppResult<ResourceId> {
        self.get(parent)?;
        let id = self.push(name.into(), schema, conf);
        self.resources[parent.0].children.push(Binding {
            parent_field: parent_field.into(),
            resource: id,
        });
        Ok(id)
    }

    /// Attaches an already bound resource as a child of `parent`.
    pub fn link(
        &mut self,
        parent: ResourceId,
        parent_field: impl Into<String>,
        child: ResourceId,
    ) -> AppResult<()> {
        self.get(child)?;
        let binding = Binding {
            parent_field: parent_field.into(),
            resource: child,
        };
        self.get_mut(parent)?.children.push(binding);
        Ok(())
    }

    /// Looks up a resource.
    pub fn get(&self, id: ResourceId) -> AppResult<&Resource> {
        self.resources
            .get(id.0)
            .ok_or(AppError::UnknownResource(id.0))
    }

    fn get_mut(&mut self, id: ResourceId) -> AppResult<&mut Resource> {
        self.resources
            .get_mut(id.0)
            .ok_or(AppError::UnknownResource(id.0))
    }

    /// Top-level resources in binding order.
    pub fn roots(&self) -> &[ResourceId] {
        &self.roots
    }

    /// Number of bound resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn push(&mut self, name: String, schema: ResourceSchema, conf: Conf) -> ResourceId {
        let id = ResourceId(self.resources.len());
        self.resources.push(Resource {
            name,
            schema,
            conf,
            children: Vec::new(),
        });
        id
    }
}
