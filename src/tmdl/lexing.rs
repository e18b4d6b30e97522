//! Lexer
//!
//!     This module turns the text of one tmdl file into a flat, ordered list of tokens,
//!     one per source line. The lexer knows the keyword tables and nothing about the
//!     structural grammar: nesting is left to the parser, which reads it from the
//!     indentation recorded on every token.
//!
//! The Lexing Pipeline
//!
//!     Every line goes through:
//!         1. The block state machine. See [block_state](block_state). While an embedded
//!            block is open, the line is either captured verbatim as EXPRESSION_CONTENT
//!            or, if it satisfies the exit rule, closes the block.
//!         2. Line classification. See [line_classification](line_classification).
//!            The header of the line is scanned with logos (see [header](header)) and
//!            the line becomes a declaration, property, flag, doc comment, blank or
//!            unknown token.
//!         3. Block entry. A freshly classified token may open a block: a measure with
//!            no inline value opens a multi-line DAX block, `source =` opens an M code
//!            block, and so on.
//!
//! Permissiveness
//!
//!     The lexer never fails. Lines that match no rule become UNKNOWN tokens, which the
//!     parser steps over. This keeps hand-edited and forward-compatible files loadable.
//!
//! Content Preservation
//!
//!     Captured lines keep their leading tabs. Stripping the common indentation of an
//!     expression is the parser's job (normalization), not the lexer's, so the token
//!     stream can always be detokenized back into the source.

pub mod block_state;
pub mod header;
pub mod keywords;
pub mod line_classification;
pub mod names;

pub use block_state::LexState;
pub use line_classification::{classify_line, count_indent};
pub use names::{is_bare_identifier, quote_name, unquote_name};
// Re-export token types for consumers that import them from `lexing`
pub use crate::tmdl::token::{Token, TokenType};

use block_state::{ends_block, is_fence};

/// The line-driven lexer.
///
/// Holds the current block state between lines; feed it lines in order with
/// [`Lexer::push_line`] and collect the tokens with [`Lexer::finish`].
#[derive(Debug)]
pub struct Lexer {
    state: LexState,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: LexState::Normal,
            tokens: Vec::new(),
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Process one line (without its terminator). `line` is 1-based.
    pub fn push_line(&mut self, raw: &str, line: usize) {
        match self.state {
            LexState::Normal => self.push_normal(raw, line),
            LexState::DaxBlock { start_indent } => {
                if is_fence(raw) {
                    self.tokens.push(Token::new(
                        TokenType::BacktickFence,
                        count_indent(raw),
                        line,
                        raw,
                    ));
                    self.transition(LexState::Normal, line);
                } else if ends_block(raw, start_indent) {
                    tracing::trace!(line, "fenced block closed without its fence");
                    self.transition(LexState::Normal, line);
                    self.push_normal(raw, line);
                } else {
                    self.push_content(raw, line);
                }
            }
            LexState::DaxMultiline { start_indent }
            | LexState::McodeBlock { start_indent }
            | LexState::JsonBlob { start_indent } => {
                if ends_block(raw, start_indent) {
                    self.transition(LexState::Normal, line);
                    self.push_normal(raw, line);
                } else {
                    self.push_content(raw, line);
                }
            }
        }
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }

    fn push_normal(&mut self, raw: &str, line: usize) {
        let mut token = classify_line(raw, line);

        if let Some(fenced) = LexState::fenced_by(&token) {
            // The fence moves out of the value into its own synthetic token
            token.value = Some(String::new());
            let fence = Token::new(TokenType::BacktickFence, token.indent, line, raw);
            self.tokens.push(token);
            self.tokens.push(fence);
            self.transition(fenced, line);
            return;
        }

        let next = LexState::entered_by(&token);
        self.tokens.push(token);
        if next != LexState::Normal {
            self.transition(next, line);
        }
    }

    fn push_content(&mut self, raw: &str, line: usize) {
        self.tokens.push(Token::new(
            TokenType::ExpressionContent,
            count_indent(raw),
            line,
            raw,
        ));
    }

    fn transition(&mut self, next: LexState, line: usize) {
        tracing::trace!(line, from = ?self.state, to = ?next, "lexer state change");
        self.state = next;
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize the full text of one file.
///
/// Accepts `\n` and `\r\n` line endings. Never fails: see the module docs.
pub fn tokenize(source: &str) -> Vec<Token> {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
    let mut lexer = Lexer::new();
    for (idx, raw) in source.lines().enumerate() {
        lexer.push_line(raw, idx + 1);
    }
    let tokens = lexer.finish();
    tracing::debug!(tokens = tokens.len(), "tokenized source");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdl::token::detokenize;

    fn types(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_database_pattern() {
        let tokens = tokenize("database Minimal\n\tcompatibilityLevel: 1601\n");
        assert_eq!(types(&tokens), vec![TokenType::Database, TokenType::Property]);
        assert_eq!(tokens[0].name.as_deref(), Some("Minimal"));
        assert_eq!(tokens[1].indent, 1);
        assert_eq!(tokens[1].value.as_deref(), Some("1601"));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_column_flags_pattern() {
        let tokens = tokenize("\tcolumn ProductKey\n\t\tdataType: int64\n\t\tisKey\n\t\tisHidden");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Column,
                TokenType::Property,
                TokenType::BooleanFlag,
                TokenType::BooleanFlag,
            ]
        );
        assert!(tokens.iter().skip(1).all(|t| t.indent == 2));
    }

    #[test]
    fn test_multiline_measure_ends_at_property() {
        let source = "\tmeasure Ratio =\n\t\t\tDIVIDE(\n\t\t\t\t[A],\n\t\t\t\t[B]\n\t\t\t)\n\t\tformatString: 0.00\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Measure,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::Property,
            ]
        );
        assert_eq!(tokens[2].raw, "\t\t\t\t[A],");
    }

    #[test]
    fn test_fenced_measure() {
        let source = "\tmeasure 'Pct' = ```\n\t\tVAR _total = COUNTROWS(ALL(Products))\n\t\t\tformatString: deeper, so still content\n\t\t```\n\t\tformatString: 0.0%\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Measure,
                TokenType::BacktickFence,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::BacktickFence,
                TokenType::Property,
            ]
        );
        assert_eq!(tokens[0].value.as_deref(), Some(""));
        assert_eq!(tokens[5].keyword.as_deref(), Some("formatString"));
    }

    #[test]
    fn test_fenced_block_exit_rule_applies() {
        // A keyword line inside a fenced block at the start depth still ends the
        // block: the exit rule is shared by every block state.
        let source = "\tmeasure X = ```\n\t\t1 + 1\n\t\tformatString: 0\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Measure,
                TokenType::BacktickFence,
                TokenType::ExpressionContent,
                TokenType::Property,
            ]
        );
    }

    #[test]
    fn test_mcode_block_in_partition() {
        let source = "\tpartition Products = m\n\t\tmode: import\n\t\tsource =\n\t\t\t\tlet\n\t\t\t\t    Source = Sql.Database(\"srv\", \"db\")\n\n\t\t\t\tin\n\t\t\t\t    Source\n\n\tannotation PBI_ResultType = Table\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Partition,
                TokenType::Property,
                TokenType::Property,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::Annotation,
            ]
        );
        // `Source = ...` looks like a property but is M code inside the block
        assert_eq!(tokens[4].token_type, TokenType::ExpressionContent);
    }

    #[test]
    fn test_json_blob() {
        let source = "cultureInfo en-US\n\n\tlinguisticMetadata =\n\t\t\t{\n\t\t\t  \"Version\": \"1.0.0\"\n\t\t\t}\n\t\tcontentType: json\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Culture,
                TokenType::BlankLine,
                TokenType::Property,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::Property,
            ]
        );
    }

    #[test]
    fn test_doc_comment_closes_block() {
        let source = "\tmeasure A =\n\t\t\tSUM(x)\n\n\t/// Second\n\tmeasure B = 1\n";
        let tokens = tokenize(source);
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Measure,
                TokenType::ExpressionContent,
                TokenType::ExpressionContent,
                TokenType::DocComment,
                TokenType::Measure,
            ]
        );
    }

    #[test]
    fn test_unknown_lines_never_fail() {
        let tokens = tokenize("something odd\n\t\t'quoted' stuff\n");
        assert_eq!(types(&tokens), vec![TokenType::Unknown, TokenType::Unknown]);
    }

    #[test]
    fn test_crlf_and_bom() {
        let tokens = tokenize("\u{FEFF}database Minimal\r\n\tcompatibilityLevel: 1601\r\n");
        assert_eq!(tokens[0].name.as_deref(), Some("Minimal"));
        assert_eq!(tokens[1].value.as_deref(), Some("1601"));
    }

    #[test]
    fn test_detokenize_round_trip() {
        let source = "table Sales\n\n\tmeasure X = ```\n\t\tSUM(Sales[Amount])\n\t\t```\n\tcolumn Amount\n\t\tdataType: double\n";
        assert_eq!(detokenize(&tokenize(source)), source);
    }
}
