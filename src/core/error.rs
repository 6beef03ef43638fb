//! Error handling for ccmeta
//!
//! This module provides the error type for every failure the metadata generator
//! can hit, plus a small user-facing wrapper that adds suggestions when errors
//! are printed by the CLI.
//!
//! # Architecture
//!
//! - [`MetadataError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Input discovery**: [`MetadataError::ReferenceDirNotFound`],
//!   [`MetadataError::DirectoryWalk`], [`MetadataError::TemplateRead`]
//! - **Hierarchy validation**: [`MetadataError::UnresolvableName`],
//!   [`MetadataError::ConflictingComponentStatus`]
//! - **Configuration**: [`MetadataError::ConfigParse`],
//!   [`MetadataError::InvalidExcludePattern`]
//! - **Output**: [`MetadataError::Serialization`], [`MetadataError::OutputWrite`],
//!   [`MetadataError::OutputOutOfDate`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use ccmeta::core::{MetadataError, user_friendly_error};
//!
//! let error = MetadataError::ConflictingComponentStatus {
//!     part: "networking".to_string(),
//!     component: "sriov".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for metadata generation.
///
/// Variants carry rendered strings rather than source errors so the type stays
/// `Clone`; [`user_friendly_error`] relies on that when it wraps a downcast
/// reference into an [`ErrorContext`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The reference directory does not exist or is not a directory.
    #[error("Reference directory not found: {path}")]
    ReferenceDirNotFound {
        /// The path given on the command line or in configuration
        path: String,
    },

    /// Walking the reference directory failed part-way.
    #[error("Failed to walk reference directory at {path}: {reason}")]
    DirectoryWalk {
        /// The directory entry that could not be visited
        path: String,
        /// The underlying error message
        reason: String,
    },

    /// A template file could not be read.
    #[error("Failed to read template {path}: {reason}")]
    TemplateRead {
        /// Path of the template
        path: String,
        /// The underlying I/O error message
        reason: String,
    },

    /// Neither a directive nor the directory layout supplies a name.
    #[error("Cannot derive {axis} name for template {path}: no directive and no {ancestor} directory")]
    UnresolvableName {
        /// Path of the template
        path: String,
        /// Which name was missing (`part` or `component`)
        axis: &'static str,
        /// Which ancestor directory was missing (`parent` or `grandparent`)
        ancestor: &'static str,
    },

    /// A component carries both an explicit required and an explicit optional
    /// component-level directive.
    #[error("conflicting component required status for component '{component}' in part '{part}'")]
    ConflictingComponentStatus {
        /// Part owning the component
        part: String,
        /// Name of the component
        component: String,
    },

    /// An `--exclude` glob could not be compiled.
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern {
        /// The pattern as written
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// The built-in directive comment pattern failed to compile.
    #[error("Invalid directive pattern: {reason}")]
    DirectivePattern {
        /// Regex compiler message
        reason: String,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("Invalid configuration file {file}: {reason}")]
    ConfigParse {
        /// Path to the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// The manifest could not be rendered.
    #[error("Failed to serialize manifest as {format}: {reason}")]
    Serialization {
        /// Output format name
        format: &'static str,
        /// Serializer message
        reason: String,
    },

    /// The manifest could not be written to disk.
    #[error("Failed to write manifest to {path}: {reason}")]
    OutputWrite {
        /// Output path
        path: String,
        /// The underlying error message
        reason: String,
    },

    /// `check` found a manifest that differs from what generation produces.
    #[error("Manifest {path} is out of date")]
    OutputOutOfDate {
        /// The manifest path that was compared
        path: String,
    },

    /// Any other error, carrying its rendered cause chain.
    #[error("{message}")]
    Other {
        /// Rendered error message
        message: String,
    },
}

impl MetadataError {
    /// Returns `true` for a conflicting component status.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingComponentStatus { .. })
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Used at the CLI boundary only; library code returns [`MetadataError`]
/// or `anyhow::Error` and never prints.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MetadataError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestions or details.
    #[must_use]
    pub const fn new(error: MetadataError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] suitable for printing.
///
/// [`MetadataError`]s anywhere in the `anyhow` chain get tailored suggestions;
/// context added on top of them is kept in the details. Anything else is
/// reported with its full cause chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(metadata_error) =
        error.chain().find_map(|cause| cause.downcast_ref::<MetadataError>())
    {
        let mut ctx = create_error_context(metadata_error.clone());
        let outer = error.to_string();
        if outer != metadata_error.to_string() {
            ctx.details = Some(match ctx.details.take() {
                Some(details) => format!("{outer}\n{details}"),
                None => outer,
            });
        }
        return ctx;
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(MetadataError::Other {
        message,
    })
}

fn create_error_context(error: MetadataError) -> ErrorContext {
    match &error {
        MetadataError::ReferenceDirNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the directory holding the reference templates with --reference-dir"),

        MetadataError::DirectoryWalk { .. } | MetadataError::TemplateRead { .. } => {
            ErrorContext::new(error)
                .with_suggestion("Check file permissions inside the reference directory")
                .with_details("Every regular file under the reference directory is read as a template")
        }

        MetadataError::UnresolvableName { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Add 'cluster-compare-part: <name>' and 'cluster-compare-component: <name>' comments to the template, or --exclude it",
            )
            .with_details(
                "Names fall back to the directories between the reference directory and the template, never to directories above it",
            ),

        MetadataError::ConflictingComponentStatus { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Keep either cluster-compare-component-required or cluster-compare-component-optional, not both",
            )
            .with_details(
                "The component-level directive applies to the whole component; its templates must agree on it",
            ),

        MetadataError::InvalidExcludePattern { .. } => ErrorContext::new(error)
            .with_suggestion("Exclude patterns are globs relative to the reference directory, e.g. '**/*.md'"),

        MetadataError::ConfigParse { .. } => ErrorContext::new(error)
            .with_suggestion("Supported keys are: exclude, exit-on-error, output, format"),

        MetadataError::OutputOutOfDate { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'ccmeta generate' and commit the regenerated manifest"),

        MetadataError::DirectivePattern { .. }
        | MetadataError::Serialization { .. }
        | MetadataError::OutputWrite { .. }
        | MetadataError::Other { .. } => ErrorContext::new(error),
    }
}
