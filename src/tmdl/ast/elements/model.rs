//! Model element and its model-level companions
//!
//! `model.tmdl` holds the `model` declaration followed by top-level `queryGroup`,
//! `annotation` and `ref` declarations. All of them belong to the model node.

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub culture: Option<String>,
    pub default_power_bi_data_source_version: Option<String>,
    pub source_query_culture: Option<String>,
    pub discourage_implicit_measures: bool,
    /// The `dataAccessOptions` block. Flags map to `"true"`, properties to their value.
    pub data_access_options: IndexMap<String, String>,
    pub references: Vec<ModelReference>,
    pub query_groups: Vec<QueryGroup>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of the referenced tables, in declaration order.
    pub fn table_refs(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .filter(|r| r.kind == "table")
            .map(|r| r.name.as_str())
    }
}

impl_ast_node!(Model, "Model", |node| node.name.clone());

/// `ref <kind> <name>`, e.g. `ref table Products` or `ref cultureInfo en-US`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelReference {
    pub kind: String,
    pub name: String,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl ModelReference {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(ModelReference, "Ref", |node| format!(
    "{} {}",
    node.kind, node.name
));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryGroup {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(QueryGroup, "QueryGroup", |node| node.name.clone());
