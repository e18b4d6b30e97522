//! Calculation group and calculation item elements

use super::column::Column;
use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

/// The nameless `calculationGroup` block of a table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationGroup {
    pub precedence: Option<i64>,
    pub description: Option<String>,
    pub items: Vec<CalculationItem>,
    /// Column declarations nested inside the group block
    pub columns: Vec<Column>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl CalculationGroup {
    pub fn item(&self, name: &str) -> Option<&CalculationItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

impl_ast_node!(CalculationGroup, "CalculationGroup", |node| format!(
    "{} items",
    node.items.len()
));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationItem {
    pub name: String,
    pub expression: String,
    pub ordinal: Option<i64>,
    pub format_string_expression: Option<String>,
    pub description: Option<String>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl CalculationItem {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(CalculationItem, "CalculationItem", |node| node.name.clone());
