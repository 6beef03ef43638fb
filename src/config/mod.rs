//! Generator configuration file.
//!
//! A reference tree can ship a small TOML file with the settings its CI always
//! passes, so running `ccmeta generate --config ccmeta.toml` is enough:
//!
//! ```toml
//! # Files that are not templates
//! exclude = ["*.md", "hack/**"]
//! exit-on-error = true
//! output = "metadata.yml"
//! format = "yaml"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file;
//! exclude patterns from both are combined. A relative `output` is resolved
//! against the directory containing the configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::MetadataError;
use crate::metadata::OutputFormat;

/// Settings loaded from a `ccmeta.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Glob patterns of files that are not templates.
    pub exclude: Vec<String>,
    /// Stop at the first conflict.
    pub exit_on_error: Option<bool>,
    /// Manifest output path.
    pub output: Option<PathBuf>,
    /// Manifest format.
    pub format: Option<OutputFormat>,
}

impl GeneratorConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ConfigParse`] on invalid TOML or unknown keys;
    /// `file` is only used in the error.
    pub fn from_toml_str(content: &str, file: &Path) -> Result<Self, MetadataError> {
        toml::from_str(content).map_err(|e| MetadataError::ConfigParse {
            file: file.display().to_string(),
            reason: e.message().to_string(),
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ConfigParse`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|e| MetadataError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config = Self::from_toml_str(&content, path)?;
        if let Some(output) = config.output.take() {
            config.output = Some(match path.parent() {
                Some(dir) if output.is_relative() => dir.join(output),
                _ => output,
            });
        }

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
