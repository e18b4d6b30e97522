//! Measure element

use super::common::{Annotation, ChangedProperty};
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    /// Normalized DAX text; multi-line bodies are joined with `\n`
    pub expression: String,
    pub format_string: Option<String>,
    /// Dynamic format string (DAX)
    pub format_string_expression: Option<String>,
    pub display_folder: Option<String>,
    pub lineage_tag: Option<String>,
    pub is_hidden: bool,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub changed_properties: Vec<ChangedProperty>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Measure {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Measure, "Measure", |node| node.name.clone());
