//! Column element

use super::common::{Annotation, ChangedProperty};
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

/// A data column, or a calculated column when `expression` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: Option<String>,
    /// DAX expression of a calculated column
    pub expression: Option<String>,
    pub format_string: Option<String>,
    pub display_folder: Option<String>,
    pub lineage_tag: Option<String>,
    pub summarize_by: Option<String>,
    pub source_column: Option<String>,
    pub sort_by_column: Option<String>,
    pub data_category: Option<String>,
    pub description: Option<String>,
    pub is_key: bool,
    pub is_hidden: bool,
    pub is_unique: bool,
    pub is_name_inferred: bool,
    pub is_data_type_inferred: bool,
    pub is_available_in_mdx: Option<bool>,
    pub annotations: Vec<Annotation>,
    pub changed_properties: Vec<ChangedProperty>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_calculated(&self) -> bool {
        self.expression.is_some()
    }
}

impl_ast_node!(Column, "Column", |node| node.name.clone());
