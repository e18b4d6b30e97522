//! Relationship element
//!
//! Endpoints are written as qualified column references, `Table.Column`, with each part
//! quoted independently when it is not a bare identifier:
//!
//!     fromColumn: 'Sales Order'.ProductKey
//!     toColumn: Products.'Product Key'

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use crate::tmdl::lexing::names::{quote_name, unquote_name};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub from_cardinality: Option<String>,
    pub to_cardinality: Option<String>,
    pub cross_filtering_behavior: Option<String>,
    pub security_filtering_behavior: Option<String>,
    pub join_on_date_behavior: Option<String>,
    /// Defaults to true; only `isActive: false` is ever written
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub rely_on_referential_integrity: bool,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

fn default_active() -> bool {
    true
}

impl Default for Relationship {
    fn default() -> Self {
        Self {
            name: String::new(),
            from_table: String::new(),
            from_column: String::new(),
            to_table: String::new(),
            to_column: String::new(),
            from_cardinality: None,
            to_cardinality: None,
            cross_filtering_behavior: None,
            security_filtering_behavior: None,
            join_on_date_behavior: None,
            is_active: true,
            rely_on_referential_integrity: false,
            annotations: Vec::new(),
            doc: None,
            range: SourceRange::default(),
        }
    }
}

impl Relationship {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Relationship, "Relationship", |node| node.name.clone());

/// Split `Table.Column` into its unquoted parts.
///
/// The table part may be quoted and contain dots. A reference without a separator, or a
/// single quoted name such as `'a.b'`, is taken as a column with an empty table.
pub fn split_column_ref(text: &str) -> (String, String) {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('\'') {
        // Find the closing quote, skipping doubled quotes
        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    i += 2;
                    continue;
                }
                let after = &rest[i + 1..];
                if after.is_empty() {
                    // A lone quoted name is a column, dots included
                    return (String::new(), unquote_name(text));
                }
                let column = after.strip_prefix('.').unwrap_or(after);
                return (unquote_name(&text[..i + 2]), unquote_name(column));
            }
            i += 1;
        }
        return (String::new(), unquote_name(text));
    }
    match text.split_once('.') {
        Some((table, column)) => (unquote_name(table), unquote_name(column)),
        None => (String::new(), unquote_name(text)),
    }
}

/// Inverse of [`split_column_ref`].
pub fn join_column_ref(table: &str, column: &str) -> String {
    if table.is_empty() {
        quote_name(column)
    } else {
        format!("{}.{}", quote_name(table), quote_name(column))
    }
}
