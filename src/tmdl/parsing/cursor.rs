//! Token cursor
//!
//! Builders share one forward-only cursor over the token stream. A builder peeks at the
//! next token, decides whether it belongs to the declaration being built and only then
//! consumes it, so when a builder returns the cursor rests on the first token that does
//! not belong to it.
//!
//! Doc comments are buffered on the cursor as they are stepped over and claimed by the
//! next declaration builder with [`TokenCursor::take_doc`].

use crate::tmdl::ast::SourceRange;
use crate::tmdl::token::{Token, TokenType};

#[derive(Debug)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    doc: Vec<&'t str>,
    /// Line of the last consumed token that was not blank
    last_line: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            doc: Vec::new(),
            last_line: 0,
        }
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub fn peek_type(&self) -> Option<TokenType> {
        self.peek().map(|t| t.token_type)
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        if !token.is_skippable() {
            self.last_line = token.line;
        }
        Some(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Step over a token nobody claims.
    pub fn skip(&mut self, token: &Token) {
        tracing::trace!(
            line = token.line,
            token_type = %token.token_type,
            "skipping token"
        );
        self.advance();
        self.doc.clear();
    }

    /// Consume a doc comment token into the pending doc buffer.
    pub fn buffer_doc(&mut self, token: &'t Token) {
        self.doc.push(token.value_str());
        self.advance();
    }

    /// Claim the pending doc comment, joining consecutive `///` lines with `\n`.
    pub fn take_doc(&mut self) -> Option<String> {
        if self.doc.is_empty() {
            return None;
        }
        let doc = self.doc.join("\n");
        self.doc.clear();
        Some(doc)
    }

    /// The next token in the body of a declaration indented at `parent_indent`.
    ///
    /// Steps over blank lines and blank captured lines, buffers doc comments and returns
    /// `None` at the first token that is not indented deeper than the parent. The
    /// returned token is not consumed.
    pub fn next_child(&mut self, parent_indent: usize) -> Option<&'t Token> {
        loop {
            let token = self.peek()?;
            if token.is_skippable() {
                self.advance();
                continue;
            }
            if token.indent <= parent_indent {
                if !self.doc.is_empty() {
                    tracing::trace!(line = token.line, "dropping doc comment at end of block");
                    self.doc.clear();
                }
                return None;
            }
            if token.token_type == TokenType::DocComment {
                self.buffer_doc(token);
                continue;
            }
            if !token.token_type.is_declaration() && !self.doc.is_empty() {
                tracing::trace!(line = token.line, "doc comment not followed by a declaration");
                self.doc.clear();
            }
            return Some(token);
        }
    }

    /// The span from a declaration to the last token consumed so far.
    pub fn range_from(&self, decl: &Token) -> SourceRange {
        SourceRange::new(decl.line, self.last_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdl::lexing::tokenize;

    #[test]
    fn test_next_child_stops_at_dedent() {
        let tokens = tokenize("table T\n\n\tcolumn A\n\ntable U\n");
        let mut cursor = TokenCursor::new(&tokens);
        let decl = cursor.advance().map(|t| t.indent).unwrap_or_default();
        let child = cursor.next_child(decl).map(|t| t.token_type);
        assert_eq!(child, Some(TokenType::Column));
        cursor.advance();
        assert!(cursor.next_child(decl).is_none());
        // rests on the terminating token, blank lines consumed
        assert_eq!(cursor.peek_type(), Some(TokenType::Table));
    }

    #[test]
    fn test_doc_comments_are_buffered_and_joined() {
        let tokens = tokenize("table T\n\t/// first\n\t/// second\n\tmeasure M = 1\n");
        let mut cursor = TokenCursor::new(&tokens);
        cursor.advance();
        let child = cursor.next_child(0).map(|t| t.token_type);
        assert_eq!(child, Some(TokenType::Measure));
        assert_eq!(cursor.take_doc().as_deref(), Some("first\nsecond"));
        assert_eq!(cursor.take_doc(), None);
    }

    #[test]
    fn test_doc_before_property_is_dropped() {
        let tokens = tokenize("table T\n\t/// stray\n\tlineageTag: x\n\tmeasure M = 1\n");
        let mut cursor = TokenCursor::new(&tokens);
        cursor.advance();
        assert_eq!(cursor.next_child(0).map(|t| t.token_type), Some(TokenType::Property));
        assert_eq!(cursor.take_doc(), None);
    }

    #[test]
    fn test_range_ignores_trailing_blanks() {
        let tokens = tokenize("table T\n\tcolumn A\n\n\n");
        let mut cursor = TokenCursor::new(&tokens);
        let decl = &tokens[0];
        cursor.advance();
        while let Some(token) = cursor.next_child(0) {
            cursor.skip(token);
        }
        let range = cursor.range_from(decl);
        assert_eq!((range.start_line, range.end_line), (1, 2));
    }
}
