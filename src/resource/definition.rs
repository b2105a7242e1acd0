//! # Resource Definition Files
//!
//! A serde-readable (YAML or JSON) description of an API: its info block,
//! optional generator settings and the nested resource tree.
//!
//! ```yaml
//! info:
//!   title: Blog
//!   version: "1.0"
//! resources:
//!   - name: users
//!     modes: read_write
//!     schema:
//!       fields:
//!         id: { required: true, validator: { type: string } }
//!     resources:
//!       - name: posts
//!         parent_field: user
//!         modes: [read, list]
//! ```

use super::{
    Conf, Mode, ResourceId, ResourceIndex, ResourceSchema, READ_ONLY, READ_WRITE, WRITE_ONLY,
};
use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::inflection::singularize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A whole definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// Document metadata.
    #[serde(default)]
    pub info: InfoDefinition,
    /// Generator settings stored alongside the tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GeneratorConfig>,
    /// Top-level resources.
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

/// The `info` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoDefinition {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for InfoDefinition {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

impl From<&InfoDefinition> for openapiv3::Info {
    fn from(def: &InfoDefinition) -> Self {
        openapiv3::Info {
            title: def.title.clone(),
            version: def.version.clone(),
            description: def.description.clone(),
            ..Default::default()
        }
    }
}

/// Allowed modes, either a named preset or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModesDefinition {
    /// `read_write`, `read_only` or `write_only`.
    Preset(ModePreset),
    /// Explicit list such as `[read, list]`.
    List(Vec<Mode>),
}

/// Named mode sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePreset {
    /// Every mode.
    ReadWrite,
    /// Read and List.
    ReadOnly,
    /// Every mode that changes data.
    WriteOnly,
}

impl Default for ModesDefinition {
    fn default() -> Self {
        ModesDefinition::Preset(ModePreset::ReadWrite)
    }
}

impl ModesDefinition {
    /// Resolves the definition into a resource configuration.
    pub fn to_conf(&self) -> Conf {
        match self {
            ModesDefinition::Preset(ModePreset::ReadWrite) => Conf::new(READ_WRITE),
            ModesDefinition::Preset(ModePreset::ReadOnly) => Conf::new(READ_ONLY),
            ModesDefinition::Preset(ModePreset::WriteOnly) => Conf::new(WRITE_ONLY),
            ModesDefinition::List(modes) => Conf::new(modes),
        }
    }
}

/// One resource and its sub-resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Plural resource name.
    pub name: String,
    /// Field on this resource referencing its parent. Defaults to the
    /// parent's singular name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_field: Option<String>,
    /// Allowed modes; all of them when omitted.
    #[serde(default)]
    pub modes: ModesDefinition,
    /// Field schema.
    #[serde(default)]
    pub schema: ResourceSchema,
    /// Sub-resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceDefinition>,
}

impl ApiDefinition {
    /// Parses a YAML document (JSON is accepted as well).
    pub fn from_yaml(source: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a JSON document.
    pub fn from_json(source: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads a definition file, choosing the parser from the extension.
    pub fn load(path: &Path) -> AppResult<Self> {
        let source = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        }
    }

    /// Document metadata as an OpenAPI `Info` object.
    pub fn info(&self) -> openapiv3::Info {
        openapiv3::Info::from(&self.info)
    }

    /// Binds every defined resource into a fresh index.
    pub fn to_index(&self) -> AppResult<ResourceIndex> {
        let mut index = ResourceIndex::new();
        for def in &self.resources {
            let id = index.bind(def.name.clone(), def.schema.clone(), def.modes.to_conf());
            bind_children(&mut index, id, def)?;
        }
        Ok(index)
    }
}

fn bind_children(
    index: &mut ResourceIndex,
    parent: ResourceId,
    parent_def: &ResourceDefinition,
) -> AppResult<()> {
    for def in &parent_def.resources {
        let parent_field = def
            .parent_field
            .clone()
            .unwrap_or_else(|| singularize(&parent_def.name));
        let id = index.bind_child(
            parent,
            def.name.clone(),
            parent_field,
            def.schema.clone(),
            def.modes.to_conf(),
        )?;
        bind_children(index, id, def)?;
    }
    Ok(())
}
