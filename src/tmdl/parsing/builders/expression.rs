use crate::tmdl::ast::Expression;
use crate::tmdl::parsing::builders::{build_annotation, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::{capture_expression, extract_meta};
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Expression {
    cursor.advance();
    let doc = cursor.take_doc();
    let mut expression = Expression::new(decl.name_str(), capture_expression(cursor, decl));
    expression.meta = extract_meta(&expression.expression);
    expression.doc = doc;

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "lineageTag" => expression.lineage_tag = text(token),
                    "queryGroup" => expression.query_group = text(token),
                    "description" => expression.description = text(token),
                    other => tracing::trace!(line = token.line, key = other, "unused expression property"),
                }
            }
            TokenType::Annotation => expression.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    expression.range = cursor.range_from(decl);
    expression
}
