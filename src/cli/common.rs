//! Arguments shared by `generate` and `check`.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::constants::DEFAULT_OUTPUT_FILE;
use crate::metadata::{GenerateOptions, OutputFormat};
use crate::pattern::ExcludeSet;

/// Where to read templates from and where the manifest lives.
#[derive(Args, Debug, Clone, Default)]
pub struct ReferenceArgs {
    /// Directory holding the reference templates.
    #[arg(short, long, env = "CCMETA_REFERENCE_DIR", default_value = ".")]
    pub reference_dir: PathBuf,

    /// Manifest path [default: <reference-dir>/metadata.yml, or metadata.json with --format json].
    #[arg(short, long, env = "CCMETA_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Fail on the first conflicting component status instead of
    /// reporting it and using the last declaration. Accepts an optional
    /// `true`/`false` value to override the configuration file.
    #[arg(
        long,
        env = "CCMETA_EXIT_ON_ERROR",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub exit_on_error: Option<bool>,

    /// Manifest format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Glob (relative to the reference directory) of files that are not
    /// templates. Repeatable.
    #[arg(short, long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,
}

/// Fully resolved inputs of one run.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    /// Options handed to the generator.
    pub options: GenerateOptions,
    /// Manifest path.
    pub output: PathBuf,
}

impl ReferenceArgs {
    /// Combines the flags with an optional configuration file.
    ///
    /// Flags win over the file; exclude patterns from both apply. The output
    /// file, both default manifest names and the configuration file are never
    /// treated as templates.
    pub fn resolve(
        &self,
        config: Option<&GeneratorConfig>,
        config_path: Option<&Path>,
    ) -> Result<ResolvedRun> {
        let file = config.cloned().unwrap_or_default();

        let format = self.format.or(file.format).unwrap_or_default();
        let output = self
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| self.reference_dir.join(default_output_name(format)));

        let mut patterns = file.exclude;
        patterns.extend(self.excludes.iter().cloned());
        let excludes = ExcludeSet::new(&patterns)?;

        let mut options = GenerateOptions::new(&self.reference_dir)
            .with_exit_on_error(self.exit_on_error.or(file.exit_on_error).unwrap_or(false))
            .with_format(format)
            .with_excludes(excludes)
            .skip_path(&output);
        for default_format in [OutputFormat::Yaml, OutputFormat::Json] {
            options = options.skip_path(self.reference_dir.join(default_output_name(default_format)));
        }
        if let Some(config_path) = config_path {
            options = options.skip_path(config_path);
        }

        Ok(ResolvedRun {
            options,
            output,
        })
    }
}

fn default_output_name(format: OutputFormat) -> String {
    match format {
        OutputFormat::Yaml => DEFAULT_OUTPUT_FILE.to_string(),
        OutputFormat::Json => Path::new(DEFAULT_OUTPUT_FILE)
            .with_extension("json")
            .to_string_lossy()
            .into_owned(),
    }
}
