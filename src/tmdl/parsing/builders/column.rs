use crate::tmdl::ast::Column;
use crate::tmdl::parsing::builders::{boolean, build_annotation, build_changed_property, flag, text};
use crate::tmdl::parsing::cursor::TokenCursor;
use crate::tmdl::parsing::expression::capture_expression;
use crate::tmdl::token::{Token, TokenType};

/// Build a column. `column Name = ...` makes it a calculated column.
pub fn build(cursor: &mut TokenCursor<'_>, decl: &Token) -> Column {
    cursor.advance();
    let mut column = Column::new(decl.name_str());
    column.doc = cursor.take_doc();
    if decl.value.is_some() {
        column.expression = Some(capture_expression(cursor, decl));
    }

    while let Some(token) = cursor.next_child(decl.indent) {
        match token.token_type {
            TokenType::Property | TokenType::BooleanFlag => {
                cursor.advance();
                match token.keyword_str() {
                    "dataType" => column.data_type = text(token),
                    "formatString" => column.format_string = text(token),
                    "displayFolder" => column.display_folder = text(token),
                    "lineageTag" => column.lineage_tag = text(token),
                    "summarizeBy" => column.summarize_by = text(token),
                    "sourceColumn" => column.source_column = text(token),
                    "sortByColumn" => column.sort_by_column = text(token),
                    "dataCategory" => column.data_category = text(token),
                    "description" => column.description = text(token),
                    "isAvailableInMdx" => column.is_available_in_mdx = boolean(token),
                    "isKey" => column.is_key = flag(token),
                    "isHidden" => column.is_hidden = flag(token),
                    "isUnique" => column.is_unique = flag(token),
                    "isNameInferred" => column.is_name_inferred = flag(token),
                    "isDataTypeInferred" => column.is_data_type_inferred = flag(token),
                    other => tracing::trace!(line = token.line, key = other, "unused column property"),
                }
            }
            TokenType::Annotation => column.annotations.push(build_annotation(cursor, token)),
            TokenType::ChangedProperty => {
                column
                    .changed_properties
                    .push(build_changed_property(cursor, token))
            }
            _ => cursor.skip(token),
        }
    }

    column.range = cursor.range_from(decl);
    column
}
