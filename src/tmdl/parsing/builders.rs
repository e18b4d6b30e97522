//! Node builders, one module per declaration kind
//!
//! Every builder has the same shape: it is handed the declaration token the cursor is
//! resting on, consumes it, claims the pending doc comment and then loops over the
//! declaration's body with [`TokenCursor::next_child`], consuming properties and flags
//! itself and delegating nested declarations to their own builders. Anything it does
//! not recognize is stepped over.
//!
//! Builders never fail: missing properties stay unset and malformed values are logged at
//! `trace` level and ignored.

pub mod column;
pub mod culture;
pub mod database;
pub mod expression;
pub mod hierarchy;
pub mod measure;
pub mod model;
pub mod partition;
pub mod relationship;
pub mod role;
pub mod table;

use super::cursor::TokenCursor;
use super::expression::capture_expression;
use crate::tmdl::ast::{Annotation, ChangedProperty};
use crate::tmdl::token::Token;

/// `annotation Name = value`, where the value may also be a multi-line blob.
pub fn build_annotation(cursor: &mut TokenCursor<'_>, decl: &Token) -> Annotation {
    cursor.advance();
    let doc = cursor.take_doc();
    let value = capture_expression(cursor, decl);
    Annotation {
        name: decl.name_str().to_string(),
        value,
        doc,
        range: cursor.range_from(decl),
    }
}

pub fn build_changed_property(cursor: &mut TokenCursor<'_>, decl: &Token) -> ChangedProperty {
    cursor.advance();
    ChangedProperty {
        name: decl.name_str().to_string(),
        doc: cursor.take_doc(),
        range: cursor.range_from(decl),
    }
}

/// A property value as an owned string.
pub(crate) fn text(token: &Token) -> Option<String> {
    Some(token.value_str().to_string())
}

/// Parse a boolean property value. Anything but `true`/`false` is ignored.
pub(crate) fn boolean(token: &Token) -> Option<bool> {
    match token.value_str() {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            tracing::trace!(line = token.line, value = other, "not a boolean value");
            None
        }
    }
}

pub(crate) fn integer(token: &Token) -> Option<i64> {
    match token.value_str().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::trace!(line = token.line, value = token.value_str(), "not an integer value");
            None
        }
    }
}

/// A flag line, `isHidden`, or its explicit form, `isHidden: true`.
pub(crate) fn flag(token: &Token) -> bool {
    match token.token_type {
        crate::tmdl::token::TokenType::BooleanFlag => true,
        _ => boolean(token).unwrap_or(false),
    }
}
