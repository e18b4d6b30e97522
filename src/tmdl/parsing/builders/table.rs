//! Table and calculation group builders

use super::{column, hierarchy, measure, partition};
use crate::tmdl::ast::{CalculationGroup, CalculationItem, Table};
use crate::tmdl::parsing::builders::{
    build_annotation, build_changed_property, flag, integer, text,
};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Table {
    cursor.advance();
    let mut table = Table::new(decl.name_str());
    table.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property | TokenType::BooleanFlag => {
                cursor.advance();
                match token.keyword_str() {
                    "lineageTag" => table.lineage_tag = text(token),
                    "dataCategory" => table.data_category = text(token),
                    "description" => table.description = text(token),
                    "isHidden" => table.is_hidden = flag(token),
                    "isPrivate" => table.is_private = flag(token),
                    other => tracing::trace!(line = token.line, key = other, "unused table property"),
                }
            }
            TokenType::Column => table.columns.push(column::build(cursor, token)),
            TokenType::Measure => table.measures.push(measure::build(cursor, token)),
            TokenType::Hierarchy => table.hierarchies.push(hierarchy::build(cursor, token)),
            TokenType::Partition => table.partitions.push(partition::build(cursor, token)),
            TokenType::CalculationGroup => {
                let group = build_calculation_group(cursor, token);
                if table.calculation_group.is_some() {
                    tracing::trace!(line = token.line, "second calculationGroup replaces the first");
                }
                table.calculation_group = Some(group);
            }
            TokenType::Annotation => table.annotations.push(build_annotation(cursor, token)),
            TokenType::ChangedProperty => {
                table
                    .changed_properties
                    .push(build_changed_property(cursor, token))
            }
            _ => cursor.skip(token),
        }
    }

    table.range = cursor.range_from(decl);
    table
}

pub fn build_calculation_group(cursor: &mut TokenCursor<'_>, decl: &Token) -> CalculationGroup {
    cursor.advance();
    let mut group = CalculationGroup {
        doc: cursor.take_doc(),
        ..Default::default()
    };

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "precedence" => group.precedence = integer(token),
                    "description" => group.description = text(token),
                    other => tracing::trace!(line = token.line, key = other, "unused calculationGroup property"),
                }
            }
            TokenType::CalculationItem => group.items.push(build_calculation_item(cursor, token)),
            TokenType::Column => group.columns.push(column::build(cursor, token)),
            TokenType::Annotation => group.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    group.range = cursor.range_from(decl);
    group
}

pub fn build_calculation_item(cursor: &mut TokenCursor<'_>, decl: &Token) -> CalculationItem {
    cursor.advance();
    let doc = cursor.take_doc();
    let mut item = CalculationItem::new(decl.name_str(), capture_expression(cursor, decl));
    item.doc = doc;

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "ordinal" => item.ordinal = integer(token),
                    "description" => item.description = text(token),
                    "formatStringExpression" => {
                        item.format_string_expression = Some(capture_expression(cursor, token))
                    }
                    other => tracing::trace!(line = token.line, key = other, "unused calculationItem property"),
                }
            }
            _ => cursor.skip(token),
        }
    }

    item.range = cursor.range_from(decl);
    item
}
