//! Token stream formatting
//!
//! Two views over a token stream:
//!
//! - [`detokenize`] rebuilds the source text from the raw lines the tokens carry. This is
//!   the token level round trip (source -> tokens -> source); it is exact up to line
//!   terminators, which are normalized to `\n`.
//! - [`format_token_stream`] renders one human readable line per token, used by the
//!   `tmdl tokens` command when debugging the lexer.

use super::core::{Token, TokenType};

/// Rebuild source text from a token stream.
///
/// The synthetic fence token that follows a declaration ending in a fence shares its
/// line with that declaration and is skipped so every source line appears once.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut last_line = 0;

    for token in tokens {
        if token.token_type == TokenType::BacktickFence && token.line == last_line {
            continue;
        }
        result.push_str(&token.raw);
        result.push('\n');
        last_line = token.line;
    }

    result
}

/// Render a token stream for inspection, one token per line.
pub fn format_token_stream(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "{:>4} {} {}",
            token.line, token.indent, token.token_type
        ));
        if let Some(keyword) = &token.keyword {
            out.push_str(&format!(" keyword={:?}", keyword));
        }
        if let Some(name) = &token.name {
            out.push_str(&format!(" name={:?}", name));
        }
        if let Some(value) = &token.value {
            out.push_str(&format!(" value={:?}", value));
        }
        if token.token_type == TokenType::ExpressionContent {
            out.push_str(&format!(" raw={:?}", token.raw));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detokenize_skips_synthetic_fence() {
        let tokens = vec![
            Token::new(TokenType::Measure, 1, 1, "\tmeasure X = ```")
                .with_keyword("measure")
                .with_name("X")
                .with_value(""),
            Token::new(TokenType::BacktickFence, 1, 1, "\tmeasure X = ```"),
            Token::new(TokenType::ExpressionContent, 2, 2, "\t\t1 + 1"),
            Token::new(TokenType::BacktickFence, 2, 3, "\t\t```"),
        ];
        assert_eq!(
            detokenize(&tokens),
            "\tmeasure X = ```\n\t\t1 + 1\n\t\t```\n"
        );
    }

    #[test]
    fn test_format_token_stream() {
        let tokens = vec![Token::new(TokenType::Property, 1, 2, "\tdataType: int64")
            .with_keyword("dataType")
            .with_value("int64")];
        assert_eq!(
            format_token_stream(&tokens),
            "   2 1 PROPERTY keyword=\"dataType\" value=\"int64\"\n"
        );
    }
}
