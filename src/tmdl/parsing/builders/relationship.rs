use crate::tmdl::ast::elements::relationship::split_column_ref;
use crate::tmdl::ast::Relationship;
use crate::tmdl::parsing::builders::{boolean, build_annotation, flag, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Relationship {
    cursor.advance();
    let mut relationship = Relationship::new(decl.name_str());
    relationship.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property | TokenType::BooleanFlag => {
                cursor.advance();
                match token.keyword_str() {
                    "fromColumn" => {
                        let (table, column) = split_column_ref(token.value_str());
                        relationship.from_table = table;
                        relationship.from_column = column;
                    }
                    "toColumn" => {
                        let (table, column) = split_column_ref(token.value_str());
                        relationship.to_table = table;
                        relationship.to_column = column;
                    }
                    "fromCardinality" => relationship.from_cardinality = text(token),
                    "toCardinality" => relationship.to_cardinality = text(token),
                    "crossFilteringBehavior" => relationship.cross_filtering_behavior = text(token),
                    "securityFilteringBehavior" => {
                        relationship.security_filtering_behavior = text(token)
                    }
                    "joinOnDateBehavior" => relationship.join_on_date_behavior = text(token),
                    "isActive" => relationship.is_active = boolean(token).unwrap_or(true),
                    "relyOnReferentialIntegrity" => {
                        relationship.rely_on_referential_integrity = flag(token)
                    }
                    other => tracing::trace!(line = token.line, key = other, "unused relationship property"),
                }
            }
            TokenType::Annotation => relationship.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    relationship.range = cursor.range_from(decl);
    relationship
}
