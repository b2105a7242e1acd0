//! # Output
//!
//! Serializes a generated document as JSON or YAML.

use crate::error::AppResult;
use clap::ValueEnum;
use openapiv3::OpenAPI;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialization format of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(OutputFormat::Json),
            Some("yaml") | Some("yml") => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Renders the document.
pub fn render(document: &OpenAPI, format: OutputFormat) -> AppResult<String> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Yaml => serde_yaml::to_string(document)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Renders the document and writes it to `path`.
pub fn write_document(path: &Path, document: &OpenAPI, format: OutputFormat) -> AppResult<()> {
    let rendered = render(document, format)?;
    fs::write(path, rendered)?;
    tracing::info!(path = %path.display(), ?format, "wrote document");
    Ok(())
}
