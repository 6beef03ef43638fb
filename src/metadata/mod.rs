//! Metadata manifest generation from annotated reference templates.
//!
//! The pipeline runs leaf-first over every template in a reference directory:
//!
//! 1. [`DirectiveExtractor`] reads the directive comments of one template
//! 2. [`resolve_names`] picks its part and component names, falling back to
//!    the directory layout
//! 3. [`HierarchyBuilder`] folds it into parts → components → templates and
//!    resolves required/optional status
//! 4. [`render`] serializes the finished [`Manifest`]
//!
//! [`generate`] drives the whole pipeline. Problems are reported through a
//! caller-supplied [`DiagnosticSink`].
//!
//! # Directives
//!
//! ```yaml
//! # cluster-compare-part: networking
//! # cluster-compare-component: sriov
//! # cluster-compare-component-optional
//! # cluster-compare-optional
//! apiVersion: sriovnetwork.openshift.io/v1
//! kind: SriovNetworkNodePolicy
//! ```

pub mod emitter;
pub mod extractor;
pub mod generator;
pub mod hierarchy;
pub mod model;
pub mod naming;
pub mod sink;

pub use emitter::{OutputFormat, render};
pub use extractor::{Directive, DirectiveExtractor, Directives};
pub use generator::{GenerateOptions, Generated, discover_templates, generate};
pub use hierarchy::{HierarchyBuilder, TemplateRecord};
pub use model::{Component, Manifest, Part, Requirement, TemplateRef};
pub use naming::{ResolvedNames, resolve_names};
pub use sink::{DiagnosticSink, TracingSink};
