use crate::tmdl::ast::{Hierarchy, HierarchyLevel};
use crate::tmdl::parsing::builders::{build_annotation, flag, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Hierarchy {
    cursor.advance();
    let mut hierarchy = Hierarchy {
        name: decl.name_str().to_string(),
        doc: cursor.take_doc(),
        ..Default::default()
    };

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property | TokenType::BooleanFlag => {
                cursor.advance();
                match token.keyword_str() {
                    "lineageTag" => hierarchy.lineage_tag = text(token),
                    "displayFolder" => hierarchy.display_folder = text(token),
                    "isHidden" => hierarchy.is_hidden = flag(token),
                    other => tracing::trace!(line = token.line, key = other, "unused hierarchy property"),
                }
            }
            TokenType::Level => {
                let position = hierarchy.levels.len();
                hierarchy.levels.push(build_level(cursor, token, position));
            }
            TokenType::Annotation => hierarchy.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    hierarchy.range = cursor.range_from(decl);
    hierarchy
}

/// A level's ordinal defaults to its position within the hierarchy.
fn build_level(cursor: &mut TokenCursor<'_>, decl: &Token, position: usize) -> HierarchyLevel {
    cursor.advance();
    let mut level = HierarchyLevel {
        name: decl.name_str().to_string(),
        ordinal: position,
        doc: cursor.take_doc(),
        ..Default::default()
    };

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "column" => level.column = text(token),
                    "lineageTag" => level.lineage_tag = text(token),
                    "ordinal" => match token.value_str().parse() {
                        Ok(ordinal) => level.ordinal = ordinal,
                        Err(_) => tracing::trace!(line = token.line, "invalid level ordinal"),
                    },
                    other => tracing::trace!(line = token.line, key = other, "unused level property"),
                }
            }
            TokenType::Annotation => level.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    level.range = cursor.range_from(decl);
    level
}
