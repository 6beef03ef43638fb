//! Manifest data model.
//!
//! These types are the output contract read by cluster-compare: field names and
//! nesting are fixed. Everything serializes in the order it is stored; the
//! [`HierarchyBuilder`](super::HierarchyBuilder) is responsible for storing it in
//! first-discovery order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MANIFEST_API_VERSION;

/// Required/optional status of a component or template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// Must be present in the compared cluster.
    Required,
    /// May be absent without being reported.
    Optional,
}

impl Requirement {
    /// Required-wins merge of two declarations.
    ///
    /// `None` means nothing was declared, so the other side is taken as is.
    #[must_use]
    pub fn merge(current: Option<Self>, incoming: Option<Self>) -> Option<Self> {
        match (current, incoming) {
            (Some(Self::Required), _) | (_, Some(Self::Required)) => Some(Self::Required),
            (Some(Self::Optional), _) | (_, Some(Self::Optional)) => Some(Self::Optional),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Optional => write!(f, "Optional"),
        }
    }
}

/// The root of a metadata manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Manifest schema version, always [`MANIFEST_API_VERSION`].
    pub api_version: String,
    /// Parts in first-discovery order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Manifest {
    /// Creates a manifest over the given parts.
    #[must_use]
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            api_version: MANIFEST_API_VERSION.to_string(),
            parts,
        }
    }

    /// Looks up a part by name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Number of components across all parts.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.parts.iter().map(|part| part.components.len()).sum()
    }

    /// Number of templates across all components.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|part| &part.components)
            .map(|component| component.required_templates.len() + component.optional_templates.len())
            .sum()
    }
}

/// A top-level grouping of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part name.
    pub name: String,
    /// Components in first-discovery order.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Part {
    /// Looks up a component by name.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|component| component.name == name)
    }
}

/// A group of templates compared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Component name, unique within its part.
    pub name: String,
    /// Aggregated status of the component.
    #[serde(rename = "type")]
    pub requirement: Requirement,
    /// Templates that must match when the component is present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_templates: Vec<TemplateRef>,
    /// Templates that may be missing when the component is present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_templates: Vec<TemplateRef>,
}

impl Component {
    /// Iterates over every template path, required ones first.
    pub fn template_paths(&self) -> impl Iterator<Item = &str> {
        self.required_templates
            .iter()
            .chain(&self.optional_templates)
            .map(|template| template.path.as_str())
    }
}

/// Reference to one template, relative to the reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    /// `/`-separated path relative to the reference directory.
    pub path: String,
}
