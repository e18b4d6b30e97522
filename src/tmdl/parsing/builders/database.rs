use crate::tmdl::ast::Database;
use crate::tmdl::parsing::builders::{build_annotation, integer};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Database {
    cursor.advance();
    let mut database = Database::new(decl.name_str());
    database.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property if token.is_property("compatibilityLevel") => {
                cursor.advance();
                database.compatibility_level = integer(token);
            }
            TokenType::Annotation => database.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    database.range = cursor.range_from(decl);
    database
}
