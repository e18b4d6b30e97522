//! Database element

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

/// The `database` declaration of `database.tmdl`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub compatibility_level: Option<i64>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Database, "Database", |node| node.name.clone());
