//! Verify that a committed manifest matches its reference directory.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use tracing::{info, warn};

use super::common::ReferenceArgs;
use crate::config::GeneratorConfig;
use crate::core::MetadataError;
use crate::metadata::{TracingSink, generate};

/// Command to regenerate the manifest in memory and compare it with the one on
/// disk. Nothing is written.
///
/// # Examples
///
/// ```bash
/// ccmeta check -r reference/ --exit-on-error
/// ```
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    pub reference: ReferenceArgs,
}

impl CheckCommand {
    /// Execute the check command.
    ///
    /// Fails with [`MetadataError::OutputOutOfDate`] when the manifest is
    /// missing or differs from the regenerated one.
    pub fn execute(self, config: Option<&GeneratorConfig>, config_path: Option<&Path>) -> Result<()> {
        let run = self.reference.resolve(config, config_path)?;
        let generated = generate(&run.options, &TracingSink)?;

        if generated.has_errors() {
            warn!("Metadata generated with {} error(s)", generated.error_count);
        }

        let existing = match std::fs::read_to_string(&run.output) {
            Ok(existing) => Some(existing),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(anyhow::Error::from(e))
                    .with_context(|| format!("Failed to read {}", run.output.display()));
            }
        };

        if existing.as_deref() == Some(generated.rendered.as_str()) {
            info!("{} is up to date", run.output.display());
            return Ok(());
        }

        Err(MetadataError::OutputOutOfDate {
            path: run.output.display().to_string(),
        }
        .into())
    }
}
