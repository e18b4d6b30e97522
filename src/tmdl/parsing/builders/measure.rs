use crate::tmdl::ast::Measure;
use crate::tmdl::parsing::builders::{build_annotation, build_changed_property, flag, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Measure {
    cursor.advance();
    let doc = cursor.take_doc();
    let mut measure = Measure::new(decl.name_str(), capture_expression(cursor, decl));
    measure.doc = doc;

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property | TokenType::BooleanFlag => {
                cursor.advance();
                match token.keyword_str() {
                    "formatString" => measure.format_string = text(token),
                    "formatStringExpression" => {
                        measure.format_string_expression = Some(capture_expression(cursor, token))
                    }
                    "displayFolder" => measure.display_folder = text(token),
                    "lineageTag" => measure.lineage_tag = text(token),
                    "description" => measure.description = text(token),
                    "isHidden" => measure.is_hidden = flag(token),
                    other => tracing::trace!(line = token.line, key = other, "unused measure property"),
                }
            }
            TokenType::Annotation => measure.annotations.push(build_annotation(cursor, token)),
            TokenType::ChangedProperty => {
                measure
                    .changed_properties
                    .push(build_changed_property(cursor, token))
            }
            _ => cursor.skip(token),
        }
    }

    measure.range = cursor.range_from(decl);
    measure
}
