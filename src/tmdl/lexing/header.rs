//! Line header tokenization
//!
//! The structural part of a line (everything before its value) is tokenized with the logos
//! lexer: words, single-quoted names, `:` and `=`. Values are never tokenized; they are
//! sliced verbatim from the line using the span of the separator that precedes them, so
//! expressions, format strings and M code reach the parser untouched.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum HeaderToken {
    /// `'Total Products'`, with `''` as an escaped quote
    #[regex(r"'([^']|'')*'")]
    QuotedName,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    /// Anything else up to whitespace or a separator
    #[regex(r"[^ \t\r\n:=']+")]
    Word,
}

/// Scan the header of a line (its content after the leading tabs).
///
/// Scanning stops right after the first `=`, since everything past it is a value, and at
/// the first character logos cannot match.
pub fn scan_header(content: &str) -> Vec<(HeaderToken, Range<usize>)> {
    let mut lexer = HeaderToken::lexer(content);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let Ok(token) = result else {
            break;
        };
        tokens.push((token, lexer.span()));
        if token == HeaderToken::Equals {
            break;
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(content: &str) -> Vec<HeaderToken> {
        scan_header(content).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_declaration_with_quoted_name() {
        assert_eq!(
            kinds("measure 'Total Products' = COUNTROWS(Products)"),
            vec![HeaderToken::Word, HeaderToken::QuotedName, HeaderToken::Equals]
        );
    }

    #[test]
    fn test_property_with_colon() {
        let tokens = scan_header("formatString: 0.0%;-0.0%;0.0%");
        assert_eq!(tokens[0], (HeaderToken::Word, 0..12));
        assert_eq!(tokens[1], (HeaderToken::Colon, 12..13));
    }

    #[test]
    fn test_stops_after_equals() {
        // The value holds quotes and separators that must not be scanned.
        assert_eq!(
            kinds("expression Server = \"localhost\" meta [IsParameterQuery=true]"),
            vec![HeaderToken::Word, HeaderToken::Word, HeaderToken::Equals]
        );
    }

    #[test]
    fn test_escaped_quote_in_name() {
        let tokens = scan_header("column 'O''Brien'");
        assert_eq!(tokens[1], (HeaderToken::QuotedName, 7..17));
    }

    #[test]
    fn test_bare_words_keep_punctuation() {
        assert_eq!(
            kinds("member user@contoso.com"),
            vec![HeaderToken::Word, HeaderToken::Word]
        );
    }
}
