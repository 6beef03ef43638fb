//! ccmeta - cluster-compare metadata generator
//!
//! Builds the `metadata.yml` manifest that cluster-compare uses to match live
//! cluster resources against a reference configuration. Reference templates
//! carry directive comments naming the part and component they belong to and
//! whether they are required; ccmeta collects those directives from a whole
//! reference directory and writes the manifest.
//!
//! # Architecture Overview
//!
//! The reference directory is the single input:
//! - Each regular file below it is a template
//! - Directive comments override names derived from the layout
//!   (`<part>/<component>/<template>`)
//! - Templates group into components, components into parts, both in
//!   first-discovery order over a name-sorted walk
//!
//! Running twice over an unchanged tree produces byte-identical output.
//!
//! # Core Modules
//!
//! - [`metadata`] - Directive extraction, naming, hierarchy building, rendering
//! - [`cli`] - `generate` and `check` subcommands
//! - [`config`] - Optional `ccmeta.toml` with excludes and defaults
//! - [`core`] - Error types and user-facing error reporting
//! - [`pattern`] - Exclude globs over reference-relative paths
//! - [`utils`] - File reading and atomic writes
//!
//! # Template Example
//!
//! ```yaml
//! # cluster-compare-part: networking
//! # cluster-compare-component: sriov
//! # cluster-compare-component-optional
//! apiVersion: sriovnetwork.openshift.io/v1
//! kind: SriovOperatorConfig
//! ```
//!
//! Go template files use whole-line template comments:
//!
//! ```text
//! {{- /* cluster-compare-optional */ -}}
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Write reference/metadata.yml
//! ccmeta generate -r reference/
//!
//! # Fail on conflicting component directives
//! ccmeta generate -r reference/ --exit-on-error
//!
//! # Verify the committed manifest in CI
//! ccmeta check -r reference/
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod metadata;
pub mod pattern;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
