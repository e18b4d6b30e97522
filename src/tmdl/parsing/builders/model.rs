//! Model, query group and reference builders

use crate::tmdl::ast::{Model, ModelReference, QueryGroup};
use crate::tmdl::parsing::builders::{build_annotation, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::token::{Token, TokenType};

pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Model {
    cursor.advance();
    let mut model = Model::new(decl.name_str());
    model.doc = cursor.take_doc();

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property => {
                cursor.advance();
                match token.keyword_str() {
                    "culture" => model.culture = text(token),
                    "defaultPowerBIDataSourceVersion" => {
                        model.default_power_bi_data_source_version = text(token)
                    }
                    "sourceQueryCulture" => model.source_query_culture = text(token),
                    "discourageImplicitMeasures" => {
                        model.discourage_implicit_measures = token.value_str() == "true"
                    }
                    other => tracing::trace!(line = token.line, key = other, "unused model property"),
                }
            }
            TokenType::BooleanFlag if token.keyword_str() == "discourageImplicitMeasures" => {
                cursor.advance();
                model.discourage_implicit_measures = true;
            }
            TokenType::DataAccessOptions => build_data_access_options(cursor, token, &mut model),
            TokenType::QueryGroup => model.query_groups.push(build_query_group(cursor, token)),
            TokenType::Ref => model.references.push(build_reference(cursor, token)),
            TokenType::Annotation => model.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }

    model.range = cursor.range_from(decl);
    model
}

/// `dataAccessOptions` body: flags become `"true"`, properties keep their value.
fn build_data_access_options(cursor: &mut TokenCursor<'_>, decl: &Token, model: &mut Model) {
    cursor.advance();
    cursor.take_doc();
    while let Some(token) = cursor.next_child(decl.indent) {
        cursor.advance();
        match token.token_type {
            TokenType::BooleanFlag => {
                model
                    .data_access_options
                    .insert(token.keyword_str().to_string(), "true".to_string());
            }
            TokenType::Property => {
                model
                    .data_access_options
                    .insert(token.keyword_str().to_string(), token.value_str().to_string());
            }
            _ => tracing::trace!(line = token.line, "unused dataAccessOptions line"),
        }
    }
}

pub fn build_query_group(cursor: &mut TokenCursor<'_>, decl: &Token) -> QueryGroup {
    cursor.advance();
    let mut group = QueryGroup {
        name: decl.name_str().to_string(),
        doc: cursor.take_doc(),
        ..Default::default()
    };
    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Annotation => group.annotations.push(build_annotation(cursor, token)),
            _ => cursor.skip(token),
        }
    }
    group.range = cursor.range_from(decl);
    group
}

pub fn build_reference(cursor: &mut TokenCursor<'_>, decl: &Token) -> ModelReference {
    cursor.advance();
    let mut reference = ModelReference::new(decl.value_str(), decl.name_str());
    reference.doc = cursor.take_doc();
    // References have no body of their own
    while let Some(token) = cursor.next_child(decl.indent) {
        cursor.skip(token);
    }
    reference.range = cursor.range_from(decl);
    reference
}
