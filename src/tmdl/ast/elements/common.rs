//! Annotations and changed-property markers
//!
//! Both attach to most declaration kinds. An annotation value is usually a single line,
//! but may be a multi-line JSON-like blob captured from an `annotation Name =` block.

use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub value: String,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Annotation {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Annotation, "Annotation", |node| node.name.clone());

/// `changedProperty = IsHidden`: records a property changed from its inherited value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangedProperty {
    pub name: String,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl ChangedProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(ChangedProperty, "ChangedProperty", |node| node.name.clone());

/// Look up an annotation value by name.
pub fn annotation_value<'a>(annotations: &'a [Annotation], name: &str) -> Option<&'a str> {
    annotations
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}
