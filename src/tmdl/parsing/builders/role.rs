//! Role, member and table permission builders

use crate::tmdl::ast::{Role, RoleMember, TablePermission};
use crate::tmdl::parsing::builders::{build_annotation, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Role {
    cursor.advance();
    let mut role = Role::new(decl.name_str());
    role.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "modelPermission" => role.model_permission = text(token),
                    "description" => role.description = text(token),
                    other => tracing::trace!(line = token.line, key = other, "unused role property"),
                }
            }
            TokenType::Member => role.members.push(build_member(cursor, token)),
            TokenType::TablePermission => {
                role.table_permissions
                    .push(build_table_permission(cursor, token))
            }
            TokenType::Annotation => role.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    role.range = cursor.range_from(decl);
    role
}

fn build_member(cursor: &mut TokenCursor<'_>, decl: &Token) -> RoleMember {
    cursor.advance();
    let mut member = RoleMember {
        name: decl.name_str().to_string(),
        doc: cursor.take_doc(),
        ..Default::default()
    };
    while let Some(token) = cursor.next_child(decl.indent) {
        if token.is_property("identityProvider") {
            cursor.advance();
            member.identity_provider = text(token);
        } else {
            cursor.skip(token);
        }
    }
    member.range = cursor.range_from(decl);
    member
}

fn build_table_permission(cursor: &mut TokenCursor<'_>, decl: &Token) -> TablePermission {
    cursor.advance();
    let doc = cursor.take_doc();
    let filter_expression = capture_expression(cursor, decl);
    while let Some(token) = cursor.next_child(decl.indent) {
        cursor.skip(token);
    }
    TablePermission {
        table: decl.name_str().to_string(),
        filter_expression,
        doc,
        range: cursor.range_from(decl),
    }
}
