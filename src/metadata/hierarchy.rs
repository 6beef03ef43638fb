//! Parts → components → templates accumulation.
//!
//! [`HierarchyBuilder`] folds one [`TemplateRecord`] at a time into its running
//! state and turns it into a [`Manifest`] on [`finish`](HierarchyBuilder::finish).
//!
//! # Status resolution
//!
//! Every component gathers the declarations of all its templates:
//!
//! - template-level `cluster-compare-required` / `cluster-compare-optional`
//! - component-level `cluster-compare-component-required` /
//!   `cluster-compare-component-optional`
//!
//! They are merged required-wins. A component nobody declared anything for is
//! required. A template's own list (`requiredTemplates` / `optionalTemplates`)
//! only depends on its template-level directive, defaulting to required.
//!
//! # Conflicts
//!
//! The component-level directive describes the whole component, so an explicit
//! required next to an explicit optional is an authoring error rather than
//! something to merge. It is reported once per component:
//!
//! - exit-on-error: reported as fatal and returned from
//!   [`add`](HierarchyBuilder::add) as [`MetadataError::ConflictingComponentStatus`]
//! - otherwise: reported as an error; the component-level directive fed last
//!   decides the component status and building continues

use std::collections::HashMap;
use tracing::debug;

use super::extractor::Directives;
use super::model::{Component, Manifest, Part, Requirement, TemplateRef};
use super::sink::DiagnosticSink;
use crate::constants::LOG_TARGET;
use crate::core::MetadataError;

/// One discovered template, ready to be folded into the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Identifier written to the manifest (path relative to the reference directory).
    pub id: String,
    /// Resolved part name.
    pub part: String,
    /// Resolved component name.
    pub component: String,
    /// Directives found in the template.
    pub directives: Directives,
}

#[derive(Debug)]
struct ComponentState {
    name: String,
    merged: Option<Requirement>,
    declared_required: bool,
    declared_optional: bool,
    last_declared: Option<Requirement>,
    conflicted: bool,
    required_templates: Vec<TemplateRef>,
    optional_templates: Vec<TemplateRef>,
}

impl ComponentState {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            merged: None,
            declared_required: false,
            declared_optional: false,
            last_declared: None,
            conflicted: false,
            required_templates: Vec::new(),
            optional_templates: Vec::new(),
        }
    }

    /// Folds a template in; returns `true` the first time the component
    /// becomes conflicted.
    fn record(&mut self, record: &TemplateRecord) -> bool {
        let directives = &record.directives;

        self.merged = Requirement::merge(self.merged, directives.template_requirement);
        self.merged = Requirement::merge(self.merged, directives.component_requirement());
        self.declared_required |= directives.component_required;
        self.declared_optional |= directives.component_optional;
        if directives.last_component_requirement.is_some() {
            self.last_declared = directives.last_component_requirement;
        }

        let template = TemplateRef {
            path: record.id.clone(),
        };
        match directives.template_requirement.unwrap_or(Requirement::Required) {
            Requirement::Required => self.required_templates.push(template),
            Requirement::Optional => self.optional_templates.push(template),
        }

        let newly_conflicted = self.declared_required && self.declared_optional && !self.conflicted;
        self.conflicted |= newly_conflicted;
        newly_conflicted
    }

    fn requirement(&self) -> Requirement {
        let resolved = if self.conflicted {
            self.last_declared
        } else {
            self.merged
        };
        resolved.unwrap_or(Requirement::Required)
    }

    fn into_component(self) -> Component {
        Component {
            requirement: self.requirement(),
            name: self.name,
            required_templates: self.required_templates,
            optional_templates: self.optional_templates,
        }
    }
}

#[derive(Debug)]
struct PartState {
    name: String,
    components: Vec<ComponentState>,
    index: HashMap<String, usize>,
}

impl PartState {
    fn component_mut(&mut self, name: &str) -> &mut ComponentState {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.components.push(ComponentState::new(name));
                self.index.insert(name.to_string(), self.components.len() - 1);
                self.components.len() - 1
            }
        };
        &mut self.components[idx]
    }
}

/// Stateful accumulator of template records.
///
/// Parts and components keep the order in which they were first seen, so
/// feeding records in a stable order gives a stable manifest.
pub struct HierarchyBuilder<'a> {
    sink: &'a dyn DiagnosticSink,
    exit_on_error: bool,
    parts: Vec<PartState>,
    index: HashMap<String, usize>,
    errors: usize,
}

impl<'a> HierarchyBuilder<'a> {
    /// Creates an empty builder reporting to `sink`.
    ///
    /// With `exit_on_error` set, the first conflict is reported as fatal and
    /// stops the build.
    pub fn new(sink: &'a dyn DiagnosticSink, exit_on_error: bool) -> Self {
        Self {
            sink,
            exit_on_error,
            parts: Vec::new(),
            index: HashMap::new(),
            errors: 0,
        }
    }

    /// Folds one template into the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ConflictingComponentStatus`] in exit-on-error
    /// mode when this record makes its component's explicit component-level
    /// declarations contradict each other.
    pub fn add(&mut self, record: TemplateRecord) -> Result<(), MetadataError> {
        let newly_conflicted = self.part_mut(&record.part).component_mut(&record.component).record(&record);

        debug!(
            target: LOG_TARGET,
            "Added {} to component '{}' of part '{}'",
            record.id,
            record.component,
            record.part
        );

        if !newly_conflicted {
            return Ok(());
        }

        let error = MetadataError::ConflictingComponentStatus {
            part: record.part,
            component: record.component,
        };
        let message = format!("{error} (contradicting directive in {})", record.id);

        if self.exit_on_error {
            self.sink.fatal(&message);
            return Err(error);
        }

        self.sink.error(&message);
        self.errors += 1;
        Ok(())
    }

    /// Number of recoverable errors reported so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Materializes the manifest.
    #[must_use]
    pub fn finish(self) -> Manifest {
        let parts = self
            .parts
            .into_iter()
            .map(|part| Part {
                name: part.name,
                components: part.components.into_iter().map(ComponentState::into_component).collect(),
            })
            .collect();
        Manifest::new(parts)
    }

    fn part_mut(&mut self, name: &str) -> &mut PartState {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.parts.push(PartState {
                    name: name.to_string(),
                    components: Vec::new(),
                    index: HashMap::new(),
                });
                self.index.insert(name.to_string(), self.parts.len() - 1);
                self.parts.len() - 1
            }
        };
        &mut self.parts[idx]
    }
}
