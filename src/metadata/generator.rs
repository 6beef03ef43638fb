//! End-to-end manifest generation over a reference directory.
//!
//! [`generate`] walks the reference directory in file-name order, extracts the
//! directives of every template, resolves names, folds the records into a
//! [`HierarchyBuilder`] and renders the result. The walk order is what makes
//! the output deterministic: the builder keeps first-discovery order, and the
//! discovery order only depends on the names in the tree.

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::emitter::{OutputFormat, render};
use super::extractor::DirectiveExtractor;
use super::hierarchy::{HierarchyBuilder, TemplateRecord};
use super::model::Manifest;
use super::naming::resolve_names;
use super::sink::DiagnosticSink;
use crate::constants::LOG_TARGET;
use crate::core::MetadataError;
use crate::pattern::{ExcludeSet, to_slash};
use crate::utils::read_text_lossy;

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding the reference templates.
    pub reference_dir: PathBuf,
    /// Stop at the first conflict, reporting it as fatal.
    pub exit_on_error: bool,
    /// Rendering format.
    pub format: OutputFormat,
    /// Glob patterns of files that are not templates.
    pub excludes: ExcludeSet,
    /// Exact files that are never templates (the manifest itself, the config file).
    pub skip_paths: Vec<PathBuf>,
}

impl GenerateOptions {
    /// Options for `reference_dir` with defaults everywhere else.
    pub fn new(reference_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: reference_dir.into(),
            exit_on_error: false,
            format: OutputFormat::default(),
            excludes: ExcludeSet::default(),
            skip_paths: Vec::new(),
        }
    }

    /// Sets exit-on-error mode.
    #[must_use]
    pub fn with_exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.exit_on_error = exit_on_error;
        self
    }

    /// Sets the rendering format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_excludes(mut self, excludes: ExcludeSet) -> Self {
        self.excludes = excludes;
        self
    }

    /// Adds a file that must never be read as a template.
    #[must_use]
    pub fn skip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_paths.push(path.into());
        self
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The manifest.
    pub manifest: Manifest,
    /// The manifest rendered in the requested format.
    pub rendered: String,
    /// Number of recoverable errors reported to the sink.
    pub error_count: usize,
}

impl Generated {
    /// Returns `true` if any recoverable error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Generates the metadata manifest for a reference directory.
///
/// Conflicts are reported to `sink`; see [`HierarchyBuilder`] for how
/// `exit_on_error` changes that. Read failures are reported as fatal and end
/// the run.
///
/// # Errors
///
/// - [`MetadataError::ReferenceDirNotFound`] if the directory does not exist
/// - [`MetadataError::DirectoryWalk`] / [`MetadataError::TemplateRead`] on I/O failures
/// - [`MetadataError::UnresolvableName`] if a template has no usable name
/// - [`MetadataError::ConflictingComponentStatus`] in exit-on-error mode
///
/// # Examples
///
/// ```rust,no_run
/// use ccmeta::metadata::{GenerateOptions, TracingSink, generate};
///
/// let options = GenerateOptions::new("reference").with_exit_on_error(true);
/// let generated = generate(&options, &TracingSink)?;
/// print!("{}", generated.rendered);
/// # Ok::<(), ccmeta::core::MetadataError>(())
/// ```
pub fn generate(
    options: &GenerateOptions,
    sink: &dyn DiagnosticSink,
) -> Result<Generated, MetadataError> {
    let reference_dir = canonical_reference_dir(&options.reference_dir)?;
    let skip_paths: Vec<PathBuf> =
        options.skip_paths.iter().filter_map(|path| path.canonicalize().ok()).collect();

    let templates = discover_templates(&reference_dir, &options.excludes, &skip_paths)
        .map_err(|e| report_fatal(sink, e))?;
    debug!(
        target: LOG_TARGET,
        "Discovered {} templates under {}",
        templates.len(),
        reference_dir.display()
    );

    let extractor = DirectiveExtractor::new()?;
    let mut builder = HierarchyBuilder::new(sink, options.exit_on_error);

    for relative in &templates {
        let record = read_template(&extractor, &reference_dir, relative)
            .map_err(|e| report_fatal(sink, e))?;
        builder.add(record)?;
    }

    let error_count = builder.error_count();
    let manifest = builder.finish();
    info!(
        target: LOG_TARGET,
        "Generated metadata with {} parts, {} components, {} templates",
        manifest.parts.len(),
        manifest.component_count(),
        manifest.template_count()
    );

    let rendered = render(&manifest, options.format)?;
    Ok(Generated {
        manifest,
        rendered,
        error_count,
    })
}

/// Lists every template under `reference_dir`, relative to it, in walk order.
///
/// Only regular files count; symlinks and directories are skipped. Entries in
/// `skip_paths` must be given in the same (canonical) form as `reference_dir`.
///
/// # Errors
///
/// Returns [`MetadataError::DirectoryWalk`] if a directory cannot be read.
pub fn discover_templates(
    reference_dir: &Path,
    excludes: &ExcludeSet,
    skip_paths: &[PathBuf],
) -> Result<Vec<PathBuf>, MetadataError> {
    let mut templates = Vec::new();

    for entry in WalkDir::new(reference_dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| MetadataError::DirectoryWalk {
            path: e.path().unwrap_or(reference_dir).display().to_string(),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if skip_paths.iter().any(|skip| skip == path) {
            debug!(target: LOG_TARGET, "Skipping {}", path.display());
            continue;
        }

        let Ok(relative) = path.strip_prefix(reference_dir) else {
            continue;
        };
        if excludes.is_excluded(relative) {
            continue;
        }

        templates.push(relative.to_path_buf());
    }

    Ok(templates)
}

fn canonical_reference_dir(reference_dir: &Path) -> Result<PathBuf, MetadataError> {
    let not_found = || MetadataError::ReferenceDirNotFound {
        path: reference_dir.display().to_string(),
    };

    let canonical = reference_dir.canonicalize().map_err(|_| not_found())?;
    if canonical.is_dir() {
        Ok(canonical)
    } else {
        Err(not_found())
    }
}

fn read_template(
    extractor: &DirectiveExtractor,
    reference_dir: &Path,
    relative: &Path,
) -> Result<TemplateRecord, MetadataError> {
    let path = reference_dir.join(relative);
    let content = read_text_lossy(&path).map_err(|e| MetadataError::TemplateRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let directives = extractor.extract(relative, &content);
    let names = resolve_names(
        &naming_path(reference_dir, relative),
        directives.part.as_deref(),
        directives.component.as_deref(),
    )?;

    Ok(TemplateRecord {
        id: to_slash(relative),
        part: names.part,
        component: names.component,
        directives,
    })
}

/// Path handed to name resolution: `<reference-dir-name>/<relative>`.
///
/// Directories above the reference directory never supply a name.
fn naming_path(reference_dir: &Path, relative: &Path) -> PathBuf {
    match reference_dir.file_name() {
        Some(name) => Path::new(name).join(relative),
        None => relative.to_path_buf(),
    }
}

fn report_fatal(sink: &dyn DiagnosticSink, error: MetadataError) -> MetadataError {
    sink.fatal(&error.to_string());
    error
}
