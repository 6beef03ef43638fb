//! Glob-based template exclusion.
//!
//! Reference trees often carry files that are not templates: READMEs, the
//! generated manifest, editor leftovers. Exclude patterns filter them out of
//! discovery before any directive is read.
//!
//! # Pattern Syntax
//!
//! Patterns are matched against the path relative to the reference directory,
//! always using `/` as separator:
//!
//! - `*` matches any sequence of characters, including `/`
//! - `**` matches any sequence of path components
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from the set or range
//!
//! So `*.md` excludes Markdown files at any depth and `docs/**` excludes a
//! whole directory.

use glob::Pattern;
use std::path::Path;
use tracing::trace;

use crate::core::MetadataError;

/// A set of compiled exclude patterns.
///
/// # Examples
///
/// ```rust
/// use ccmeta::pattern::ExcludeSet;
/// use std::path::Path;
///
/// let excludes = ExcludeSet::new(&["*.md".to_string(), "hack/**".to_string()])?;
/// assert!(excludes.is_excluded(Path::new("README.md")));
/// assert!(excludes.is_excluded(Path::new("hack/render.sh")));
/// assert!(!excludes.is_excluded(Path::new("core/dns/service.yaml")));
/// # Ok::<(), ccmeta::core::MetadataError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidExcludePattern`] for the first pattern
    /// that is not valid glob syntax or that is unsafe (absolute or containing
    /// `..`).
    pub fn new(patterns: &[String]) -> Result<Self, MetadataError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                validate_pattern_safety(pattern)?;
                Pattern::new(pattern).map_err(|e| MetadataError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
        })
    }

    /// Checks a path relative to the reference directory against every pattern.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let candidate = to_slash(relative);
        let excluded = self.patterns.iter().any(|pattern| pattern.matches(&candidate));
        if excluded {
            trace!("Excluding {}", candidate);
        }
        excluded
    }

    /// Returns `true` if no pattern was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Renders a relative path with `/` separators on every platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `C:/...` or `C:\...`; a bare `a:` is an ordinary file name character.
fn has_drive_prefix(pattern: &str) -> bool {
    matches!(
        pattern.as_bytes(),
        [letter, b':', b'/' | b'\\', ..] if letter.is_ascii_alphabetic()
    )
}

fn validate_pattern_safety(pattern: &str) -> Result<(), MetadataError> {
    let reason = if pattern.contains("..") {
        Some("patterns must not contain '..'")
    } else if pattern.starts_with('/') || has_drive_prefix(pattern) {
        Some("patterns must be relative to the reference directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(MetadataError::InvalidExcludePattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
