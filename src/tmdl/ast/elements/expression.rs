//! Shared expression element (`expressions.tmdl`)
//!
//! Named M expressions, typically parameters. A trailing `meta [...]` clause is parsed
//! into `meta` but also stays in `expression`, so the text serializes back unchanged.

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expression {
    pub name: String,
    pub expression: String,
    pub meta: IndexMap<String, serde_json::Value>,
    pub lineage_tag: Option<String>,
    pub query_group: Option<String>,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Expression {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            ..Default::default()
        }
    }

    /// True when the `meta` clause marks this expression as a query parameter.
    pub fn is_parameter(&self) -> bool {
        self.meta.get("IsParameterQuery") == Some(&serde_json::Value::Bool(true))
    }
}

impl_ast_node!(Expression, "Expression", |node| node.name.clone());
