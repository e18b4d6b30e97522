//! Partition builder
//!
//! The source kind is decided after the body is read: `= calculated` makes a
//! calculated partition, a non-empty `source` body makes an M partition and anything
//! else is an entity partition described by `entityName`, `expressionSource` and
//! `schemaName`.

use crate::tmdl::ast::{Partition, PartitionSource};
use crate::tmdl::parsing::builders::{build_annotation, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Partition {
    cursor.advance();
    let mut partition = Partition {
        name: decl.name_str().to_string(),
        doc: cursor.take_doc(),
        ..Default::default()
    };

    let mut body = String::new();
    let mut entity_name = None;
    let mut expression_source = None;
    let mut schema_name = None;

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "mode" => partition.mode = text(token),
                    "queryGroup" => partition.query_group = text(token),
                    "source" => body = capture_expression(cursor, token),
                    "entityName" => entity_name = text(token),
                    "expressionSource" => expression_source = text(token),
                    "schemaName" => schema_name = text(token),
                    other => tracing::trace!(line = token.line, key = other, "unused partition property"),
                }
            }
            TokenType::Annotation => partition.annotations.push(build_annotation(cursor, token)),
            // A bare `source` line introduces the nested entity properties
            _ => cursor.skip(token),
        }
    }

    partition.source = if decl.value_str() == "calculated" {
        PartitionSource::Calculated { expression: body }
    } else if !body.is_empty() {
        PartitionSource::MCode { expression: body }
    } else {
        PartitionSource::Entity {
            entity_name,
            expression_source,
            schema_name,
        }
    };

    partition.range = cursor.range_from(decl);
    partition
}
