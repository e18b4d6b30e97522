//! Security role elements (`roles/<name>.tmdl`)

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub model_permission: Option<String>,
    pub description: Option<String>,
    pub members: Vec<RoleMember>,
    pub table_permissions: Vec<TablePermission>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Role, "Role", |node| node.name.clone());

/// Row-level security filter: a DAX boolean expression over one table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TablePermission {
    pub table: String,
    pub filter_expression: String,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(TablePermission, "TablePermission", |node| node.table.clone());

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleMember {
    pub name: String,
    pub identity_provider: Option<String>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(RoleMember, "Member", |node| node.name.clone());
