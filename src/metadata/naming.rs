//! Part and component name resolution.
//!
//! Reference trees are usually laid out as `<part>/<component>/<template>`, so a
//! template without directives takes its component name from its parent
//! directory and its part name from its grandparent. Directive names always win.
//!
//! Resolution only looks at the path it is given. It never touches the file
//! system or the working directory, so callers decide whether the path is
//! absolute, relative, or canonical.

use std::path::Path;

use crate::core::MetadataError;

/// Effective names for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// Part the template belongs to.
    pub part: String,
    /// Component the template belongs to.
    pub component: String,
}

/// Resolves the part and component names of a template.
///
/// # Arguments
///
/// * `path` - Path of the template, ending in `<grandparent>/<parent>/<file>`
/// * `part` - Part name declared by directive, if any
/// * `component` - Component name declared by directive, if any
///
/// # Errors
///
/// Returns [`MetadataError::UnresolvableName`] when a name has no directive and
/// the path lacks the ancestor directory it would fall back to.
///
/// # Examples
///
/// ```rust
/// use ccmeta::metadata::resolve_names;
/// use std::path::Path;
///
/// let names = resolve_names(Path::new("ref/core/dns/service.yaml"), None, None)?;
/// assert_eq!(names.part, "core");
/// assert_eq!(names.component, "dns");
///
/// let names = resolve_names(Path::new("ref/core/dns/service.yaml"), None, Some("coredns"))?;
/// assert_eq!(names.component, "coredns");
/// # Ok::<(), ccmeta::core::MetadataError>(())
/// ```
pub fn resolve_names(
    path: &Path,
    part: Option<&str>,
    component: Option<&str>,
) -> Result<ResolvedNames, MetadataError> {
    let parent = path.parent();

    let component = match component {
        Some(name) => name.to_string(),
        None => dir_name(parent).ok_or_else(|| unresolvable(path, "component", "parent"))?,
    };

    let part = match part {
        Some(name) => name.to_string(),
        None => dir_name(parent.and_then(Path::parent))
            .ok_or_else(|| unresolvable(path, "part", "grandparent"))?,
    };

    Ok(ResolvedNames {
        part,
        component,
    })
}

fn dir_name(dir: Option<&Path>) -> Option<String> {
    dir?.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn unresolvable(path: &Path, axis: &'static str, ancestor: &'static str) -> MetadataError {
    MetadataError::UnresolvableName {
        path: path.display().to_string(),
        axis,
        ancestor,
    }
}
