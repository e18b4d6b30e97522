//! Line Classification
//!
//! Classifies a single source line, as seen in normal state, into a token. Embedded
//! block handling lives in [block_state](super::block_state); this module only answers
//! "what kind of line is this" and extracts keyword, name and value.
//!
//! Rules, in order:
//!
//!     blank                               BLANK_LINE
//!     /// text                            DOC_COMMENT
//!     ```                                 BACKTICK_FENCE
//!     key: value                          PROPERTY (even when key is a structural keyword)
//!     ref <kind> <name>                   REF
//!     <keyword> = value                   PROPERTY, except changedProperty = <name>
//!     <keyword> <name> [= value]          declaration
//!     key = value                         PROPERTY
//!     <flag>                              BOOLEAN_FLAG
//!     anything else                       UNKNOWN

use super::header::{scan_header, HeaderToken};
use super::keywords::{self, NAMELESS_DECLARATIONS};
use super::names::{is_bare_identifier, unquote_name};
use crate::tmdl::token::{Token, TokenType};
use std::ops::Range;

pub const FENCE: &str = "```";

/// Gets the indentation level of a line: its count of leading tabs.
///
/// Spaces never count, so a line indented with spaces is not structurally nested.
pub fn count_indent(raw: &str) -> usize {
    raw.bytes().take_while(|b| *b == b'\t').count()
}

/// The first word of a line's content: everything up to whitespace, `:` or `=`.
pub fn first_word(content: &str) -> &str {
    let content = content.trim_start();
    let end = content
        .find(|c: char| c.is_whitespace() || c == ':' || c == '=')
        .unwrap_or(content.len());
    &content[..end]
}

/// Determine the token for a line read in normal state.
pub fn classify_line(raw: &str, line: usize) -> Token {
    let indent = count_indent(raw);
    let content = &raw[indent..];
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Token::new(TokenType::BlankLine, indent, line, raw);
    }
    if let Some(text) = trimmed.strip_prefix("///") {
        let text = text.strip_prefix(' ').unwrap_or(text);
        return Token::new(TokenType::DocComment, indent, line, raw).with_value(text.trim_end());
    }
    if trimmed == FENCE {
        return Token::new(TokenType::BacktickFence, indent, line, raw);
    }

    let header = scan_header(content);
    let Some((HeaderToken::Word, word_span)) = header.first().cloned() else {
        return Token::new(TokenType::Unknown, indent, line, raw);
    };
    let word = &content[word_span.clone()];
    let structural = keywords::structural(word);

    match header.get(1) {
        Some((HeaderToken::Colon, separator)) if is_bare_identifier(word) => {
            return property(raw, indent, line, word, &content[separator.end..]);
        }
        Some((HeaderToken::Equals, separator))
            if is_bare_identifier(word) && structural != Some(TokenType::ChangedProperty) =>
        {
            return property(raw, indent, line, word, &content[separator.end..]);
        }
        _ => {}
    }

    if let Some(token_type) = structural {
        return declaration(raw, indent, line, token_type, word, content, &header);
    }

    if keywords::is_boolean_flag(word) && content[word_span.end..].trim().is_empty() {
        return Token::new(TokenType::BooleanFlag, indent, line, raw).with_keyword(word);
    }

    Token::new(TokenType::Unknown, indent, line, raw)
}

fn property(raw: &str, indent: usize, line: usize, key: &str, value: &str) -> Token {
    Token::new(TokenType::Property, indent, line, raw)
        .with_keyword(key)
        .with_value(value.trim())
}

fn declaration(
    raw: &str,
    indent: usize,
    line: usize,
    token_type: TokenType,
    keyword: &str,
    content: &str,
    header: &[(HeaderToken, Range<usize>)],
) -> Token {
    let mut token = Token::new(token_type, indent, line, raw).with_keyword(keyword);
    let keyword_end = header[0].1.end;

    if token_type == TokenType::ChangedProperty {
        // `changedProperty = IsHidden`: the changed property is the value
        if let Some((HeaderToken::Equals, separator)) = header.get(1) {
            return token.with_name(unquote_name(&content[separator.end..]));
        }
    }

    if token_type == TokenType::Ref {
        // `ref table Products`: the referenced kind travels as the value
        return match header.get(1) {
            Some((HeaderToken::Word, kind_span)) => {
                let kind = &content[kind_span.clone()];
                token
                    .with_value(kind)
                    .with_name(unquote_name(&content[kind_span.end..]))
            }
            _ => Token::new(TokenType::Unknown, indent, line, raw),
        };
    }

    let equals = header
        .iter()
        .find(|(t, _)| *t == HeaderToken::Equals)
        .map(|(_, span)| span.clone());
    let name_end = equals.as_ref().map(|span| span.start).unwrap_or(content.len());
    let name = content[keyword_end..name_end].trim();

    if !name.is_empty() {
        token = token.with_name(unquote_name(name));
    } else if equals.is_none() && !NAMELESS_DECLARATIONS.contains(&token_type) {
        tracing::trace!(line, keyword, "declaration without a name");
    }
    if let Some(span) = equals {
        token = token.with_value(content[span.end..].trim());
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank_and_doc_comment() {
        assert_eq!(classify_line("\t\t", 3).token_type, TokenType::BlankLine);
        let doc = classify_line("\t/// Number of products", 1);
        assert_eq!(doc.token_type, TokenType::DocComment);
        assert_eq!(doc.indent, 1);
        assert_eq!(doc.value.as_deref(), Some("Number of products"));
    }

    #[test]
    fn test_classify_declaration_with_inline_value() {
        let token = classify_line("\tmeasure 'Total Products' = COUNTROWS(Products)", 7);
        assert_eq!(token.token_type, TokenType::Measure);
        assert_eq!(token.indent, 1);
        assert_eq!(token.keyword.as_deref(), Some("measure"));
        assert_eq!(token.name.as_deref(), Some("Total Products"));
        assert_eq!(token.value.as_deref(), Some("COUNTROWS(Products)"));
        assert_eq!(token.line, 7);
    }

    #[test]
    fn test_classify_declaration_without_value() {
        let token = classify_line("\tcolumn ProductKey", 1);
        assert_eq!(token.token_type, TokenType::Column);
        assert_eq!(token.name.as_deref(), Some("ProductKey"));
        assert_eq!(token.value, None);

        let calculated = classify_line("\tcolumn Margin =", 1);
        assert_eq!(calculated.value.as_deref(), Some(""));
    }

    #[test]
    fn test_classify_properties() {
        let colon = classify_line("\t\tformatString: 0.0%;-0.0%;0.0%", 1);
        assert_eq!(colon.token_type, TokenType::Property);
        assert_eq!(colon.keyword.as_deref(), Some("formatString"));
        assert_eq!(colon.value.as_deref(), Some("0.0%;-0.0%;0.0%"));

        let equals = classify_line("\t\t\tsource =", 1);
        assert_eq!(equals.token_type, TokenType::Property);
        assert_eq!(equals.keyword.as_deref(), Some("source"));
        assert_eq!(equals.value.as_deref(), Some(""));

        // A structural keyword used as a key is still a property
        let level_column = classify_line("\t\t\tcolumn: Category", 1);
        assert_eq!(level_column.token_type, TokenType::Property);
        assert_eq!(level_column.value.as_deref(), Some("Category"));
    }

    #[test]
    fn test_classify_boolean_flag() {
        let flag = classify_line("\t\tisKey", 1);
        assert_eq!(flag.token_type, TokenType::BooleanFlag);
        assert_eq!(flag.keyword.as_deref(), Some("isKey"));
        assert_eq!(classify_line("\t\tisKey extra", 1).token_type, TokenType::Unknown);
    }

    #[test]
    fn test_classify_changed_property_and_ref() {
        let changed = classify_line("\t\tchangedProperty = IsHidden", 1);
        assert_eq!(changed.token_type, TokenType::ChangedProperty);
        assert_eq!(changed.name.as_deref(), Some("IsHidden"));

        let reference = classify_line("ref table 'Sales Order'", 1);
        assert_eq!(reference.token_type, TokenType::Ref);
        assert_eq!(reference.value.as_deref(), Some("table"));
        assert_eq!(reference.name.as_deref(), Some("Sales Order"));
    }

    #[test]
    fn test_classify_nameless_calculation_group() {
        let token = classify_line("\tcalculationGroup", 1);
        assert_eq!(token.token_type, TokenType::CalculationGroup);
        assert_eq!(token.name, None);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify_line("\tVAR x = 1", 1).token_type, TokenType::Unknown);
        assert_eq!(classify_line("#\"Changed Type\" = x", 1).token_type, TokenType::Unknown);
        assert_eq!(classify_line("'quoted' thing", 1).token_type, TokenType::Unknown);
    }

    #[test]
    fn test_spaces_do_not_count_as_indentation() {
        assert_eq!(count_indent("    column X"), 0);
        assert_eq!(count_indent("\t\t  x"), 2);
    }

    #[test]
    fn test_first_word() {
        assert_eq!(first_word("formatString: x"), "formatString");
        assert_eq!(first_word("source = x"), "source");
        assert_eq!(first_word("isHidden"), "isHidden");
        assert_eq!(first_word("  VAR x"), "VAR");
    }
}
