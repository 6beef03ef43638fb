//! Global constants used throughout the ccmeta codebase.
//!
//! The directive tokens here are the exact strings template authors write in
//! comments. Changing any of them breaks every existing reference tree, so they
//! live in one place.

/// Directive declaring the part a template belongs to (`cluster-compare-part: <name>`).
pub const PART_DIRECTIVE: &str = "cluster-compare-part:";

/// Directive declaring the component a template belongs to
/// (`cluster-compare-component: <name>`).
pub const COMPONENT_DIRECTIVE: &str = "cluster-compare-component:";

/// Marks the owning component as required.
pub const COMPONENT_REQUIRED_DIRECTIVE: &str = "cluster-compare-component-required";

/// Marks the owning component as optional.
pub const COMPONENT_OPTIONAL_DIRECTIVE: &str = "cluster-compare-component-optional";

/// Marks a single template as required within its component.
pub const TEMPLATE_REQUIRED_DIRECTIVE: &str = "cluster-compare-required";

/// Marks a single template as optional within its component.
pub const TEMPLATE_OPTIONAL_DIRECTIVE: &str = "cluster-compare-optional";

/// Default file name of the generated manifest, placed in the reference directory.
pub const DEFAULT_OUTPUT_FILE: &str = "metadata.yml";

/// `apiVersion` written at the top of every manifest.
pub const MANIFEST_API_VERSION: &str = "v1";

/// Tracing target used for generator events.
pub const LOG_TARGET: &str = "ccmeta::metadata";
