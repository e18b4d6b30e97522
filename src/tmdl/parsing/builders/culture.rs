use crate::tmdl::ast::Culture;
use crate::tmdl::parsing::builders::{build_annotation, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

/// The linguistic metadata is captured like any expression and kept opaque.
pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Culture {
    cursor.advance();
    let mut culture = Culture::new(decl.name_str());
    culture.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "linguisticMetadata" => {
                        culture.linguistic_metadata = Some(capture_expression(cursor, token))
                    }
                    "contentType" => culture.content_type = text(token),
                    other => tracing::trace!(line = token.line, key = other, "unused culture property"),
                }
            }
            TokenType::Annotation => culture.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    culture.range = cursor.range_from(decl);
    culture
}
