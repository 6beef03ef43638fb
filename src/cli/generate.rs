//! Generate the metadata manifest for a reference directory.

use anyhow::Result;
use clap::Args;
use std::path::Path;
use tracing::{info, warn};

use super::common::ReferenceArgs;
use crate::config::GeneratorConfig;
use crate::core::MetadataError;
use crate::metadata::{TracingSink, generate};
use crate::utils::safe_write;

/// Command to generate `metadata.yml` from the directives in a reference tree.
///
/// # Examples
///
/// ```bash
/// # Write ./metadata.yml from the templates under the current directory
/// ccmeta generate
///
/// # Strict mode for CI
/// ccmeta generate -r reference/ --exit-on-error
///
/// # Print instead of writing
/// ccmeta generate -r reference/ --stdout --format json
/// ```
#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Print the manifest to stdout instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self, config: Option<&GeneratorConfig>, config_path: Option<&Path>) -> Result<()> {
        let run = self.reference.resolve(config, config_path)?;
        let generated = generate(&run.options, &TracingSink)?;

        if generated.has_errors() {
            warn!(
                "Metadata generated with {} error(s); the manifest is best-effort",
                generated.error_count
            );
        }

        if self.stdout {
            print!("{}", generated.rendered);
            return Ok(());
        }

        safe_write(&run.output, &generated.rendered).map_err(|e| MetadataError::OutputWrite {
            path: run.output.display().to_string(),
            reason: format!("{e:#}"),
        })?;
        info!("Wrote {}", run.output.display());
        Ok(())
    }
}
