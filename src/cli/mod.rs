//! Command-line interface for ccmeta.
//!
//! # Available Commands
//!
//! - `generate` - Write the metadata manifest for a reference directory
//! - `check` - Fail if the manifest on disk is not what `generate` would write
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only report errors
//! - `--config` - Path to a `ccmeta.toml` configuration file
//!
//! # Example
//!
//! ```bash
//! # Generate reference/metadata.yml
//! ccmeta generate -r reference/
//!
//! # Same, failing on conflicting component directives
//! ccmeta generate -r reference/ --exit-on-error
//!
//! # In CI: make sure the committed manifest is current
//! ccmeta check -r reference/
//! ```

mod check;
pub mod common;
mod generate;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GeneratorConfig;

pub use check::CheckCommand;
pub use generate::GenerateCommand;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags so logging can be set up before any command
/// runs, and so tests can construct it without parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set (`"debug"`, `"info"`, `"error"`).
    pub log_level: Option<String>,

    /// Path to the configuration file, if one was given.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the level derived from the flags. Logs
    /// go to stderr so `generate --stdout` output stays clean. Calling this
    /// more than once is harmless.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_deref().unwrap_or("info")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the configuration file, if one was given.
    pub fn load_generator_config(&self) -> Result<Option<GeneratorConfig>> {
        match &self.config_path {
            Some(path) => Ok(Some(GeneratorConfig::load(path)?)),
            None => Ok(None),
        }
    }
}

/// Main CLI structure for ccmeta.
#[derive(Parser, Debug)]
#[command(
    name = "ccmeta",
    about = "Generate cluster-compare metadata from annotated reference templates",
    version,
    long_about = "ccmeta reads cluster-compare directive comments from every template in a \
                  reference directory and writes the parts/components manifest (metadata.yml)."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a ccmeta.toml configuration file.
    #[arg(short, long, global = true, env = "CCMETA_CONFIG")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the metadata manifest.
    ///
    /// See [`GenerateCommand`] for options.
    Generate(GenerateCommand),

    /// Check that the manifest on disk is up to date.
    ///
    /// See [`CheckCommand`] for options.
    Check(CheckCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with a specific configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let generator_config = config.load_generator_config()?;
        let config_path = config.config_path.as_deref();

        match self.command {
            Commands::Generate(cmd) => cmd.execute(generator_config.as_ref(), config_path),
            Commands::Check(cmd) => cmd.execute(generator_config.as_ref(), config_path),
        }
    }
}
