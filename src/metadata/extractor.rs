//! Extract cluster-compare directives from template comments.
//!
//! A directive is a comment line whose body starts with one of the tokens in
//! [`crate::constants`]. Two comment styles are recognized:
//!
//! - YAML comments: `# cluster-compare-part: networking`
//! - Go template comments: `{{/* cluster-compare-optional */}}`, with or without
//!   `-` trim markers
//!
//! Anything else in the file is ignored, including comments that do not start
//! with a directive token.

use regex::Regex;
use std::path::Path;
use tracing::warn;

use super::model::Requirement;
use crate::constants::{
    COMPONENT_DIRECTIVE, COMPONENT_OPTIONAL_DIRECTIVE, COMPONENT_REQUIRED_DIRECTIVE, LOG_TARGET,
    PART_DIRECTIVE, TEMPLATE_OPTIONAL_DIRECTIVE, TEMPLATE_REQUIRED_DIRECTIVE,
};
use crate::core::MetadataError;

const COMMENT_PATTERN: &str =
    r"^\s*(?:#+(?P<yaml>.*)|\{\{-?\s*/\*(?P<template>.*?)\*/\s*-?\}\})\s*$";

/// A single recognized directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `cluster-compare-part: <name>`
    Part(String),
    /// `cluster-compare-component: <name>`
    Component(String),
    /// `cluster-compare-component-required` / `cluster-compare-component-optional`
    ComponentRequirement(Requirement),
    /// `cluster-compare-required` / `cluster-compare-optional`
    TemplateRequirement(Requirement),
}

/// All directives found in one template.
///
/// Names are `None` when no usable directive was present. The component-level
/// flags record every declaration separately so a required/optional
/// contradiction survives until the hierarchy builder can report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Declared part name.
    pub part: Option<String>,
    /// Declared component name.
    pub component: Option<String>,
    /// `cluster-compare-component-required` was present.
    pub component_required: bool,
    /// `cluster-compare-component-optional` was present.
    pub component_optional: bool,
    /// The component-level declaration that appeared last in the file.
    pub last_component_requirement: Option<Requirement>,
    /// Status declared for this template alone.
    pub template_requirement: Option<Requirement>,
}

impl Directives {
    /// Returns `true` if the template carried no directive at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Component-level declaration folded with required-wins.
    #[must_use]
    pub fn component_requirement(&self) -> Option<Requirement> {
        let required = self.component_required.then_some(Requirement::Required);
        let optional = self.component_optional.then_some(Requirement::Optional);
        Requirement::merge(required, optional)
    }

    fn apply(&mut self, directive: Directive, path: &Path) {
        match directive {
            Directive::Part(name) => keep_first_name(&mut self.part, name, "part", path),
            Directive::Component(name) => {
                keep_first_name(&mut self.component, name, "component", path);
            }
            Directive::ComponentRequirement(requirement) => {
                match requirement {
                    Requirement::Required => self.component_required = true,
                    Requirement::Optional => self.component_optional = true,
                }
                self.last_component_requirement = Some(requirement);
            }
            Directive::TemplateRequirement(requirement) => {
                if self.template_requirement.is_some_and(|current| current != requirement) {
                    warn!(
                        target: LOG_TARGET,
                        "Template {} is marked both required and optional; treating it as required",
                        path.display()
                    );
                }
                self.template_requirement =
                    Requirement::merge(self.template_requirement, Some(requirement));
            }
        }
    }
}

fn keep_first_name(slot: &mut Option<String>, name: String, axis: &str, path: &Path) {
    match slot {
        Some(existing) if *existing != name => warn!(
            target: LOG_TARGET,
            "Template {} declares {} '{}' and later '{}'; keeping '{}'",
            path.display(),
            axis,
            existing,
            name,
            existing
        ),
        Some(_) => {}
        None => *slot = Some(name),
    }
}

/// Directive extractor for template files.
///
/// Holds the compiled comment pattern; build one per run and reuse it for
/// every template.
#[derive(Debug, Clone)]
pub struct DirectiveExtractor {
    comment: Regex,
}

impl DirectiveExtractor {
    /// Compiles the comment pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::DirectivePattern`] if the pattern does not compile.
    pub fn new() -> Result<Self, MetadataError> {
        let comment = Regex::new(COMMENT_PATTERN).map_err(|e| MetadataError::DirectivePattern {
            reason: e.to_string(),
        })?;
        Ok(Self {
            comment,
        })
    }

    /// Extract every directive from a template's content.
    ///
    /// # Arguments
    /// * `path` - Path to the template (only used in log messages)
    /// * `content` - Content of the template
    ///
    /// # Returns
    /// * `Directives` - Found directives (may be empty)
    pub fn extract(&self, path: &Path, content: &str) -> Directives {
        let mut directives = Directives::default();
        for directive in content.lines().filter_map(|line| self.parse_line(line)) {
            directives.apply(directive, path);
        }
        directives
    }

    /// Parses one line, returning the directive it carries if any.
    ///
    /// Name directives with an empty argument yield `None` so the name falls
    /// back to the directory layout.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<Directive> {
        let captures = self.comment.captures(line)?;
        let body = captures.name("yaml").or_else(|| captures.name("template"))?.as_str().trim();

        if let Some(name) = body.strip_prefix(PART_DIRECTIVE) {
            return non_empty(name).map(Directive::Part);
        }
        if let Some(name) = body.strip_prefix(COMPONENT_DIRECTIVE) {
            return non_empty(name).map(Directive::Component);
        }

        match body.split_whitespace().next()? {
            COMPONENT_REQUIRED_DIRECTIVE => {
                Some(Directive::ComponentRequirement(Requirement::Required))
            }
            COMPONENT_OPTIONAL_DIRECTIVE => {
                Some(Directive::ComponentRequirement(Requirement::Optional))
            }
            TEMPLATE_REQUIRED_DIRECTIVE => Some(Directive::TemplateRequirement(Requirement::Required)),
            TEMPLATE_OPTIONAL_DIRECTIVE => Some(Directive::TemplateRequirement(Requirement::Optional)),
            _ => None,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
