//! Manifest serialization.
//!
//! The manifest is rendered exactly in the order the builder stored it. YAML
//! is what cluster-compare reads; JSON carries the same field names for tools
//! that prefer it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::Manifest;
use crate::core::MetadataError;

/// Output format of the rendered manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML document (default).
    #[default]
    Yaml,
    /// Pretty-printed JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Renders a manifest in the requested format.
///
/// The result always ends with a newline.
///
/// # Errors
///
/// Returns [`MetadataError::Serialization`] if the serializer rejects the
/// manifest. The model only holds strings and lists, so this does not happen
/// for manifests built by [`HierarchyBuilder`](super::HierarchyBuilder).
pub fn render(manifest: &Manifest, format: OutputFormat) -> Result<String, MetadataError> {
    let mut rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(manifest).map_err(|e| {
            MetadataError::Serialization {
                format: "yaml",
                reason: e.to_string(),
            }
        })?,
        OutputFormat::Json => serde_json::to_string_pretty(manifest).map_err(|e| {
            MetadataError::Serialization {
                format: "json",
                reason: e.to_string(),
            }
        })?,
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
