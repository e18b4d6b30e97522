//! Embedded block state machine
//!
//! Four sub-languages live inside tmdl files: backtick-fenced DAX, bare multi-line DAX,
//! M code behind `source =` and opaque JSON-like blobs. While one of them is open, lines
//! are captured verbatim as EXPRESSION_CONTENT instead of being classified.
//!
//! Exit rule, shared by every block state: a non-blank line closes the block when its
//! indentation is at most the block's start indentation and its first word is a known
//! keyword. A `///` doc comment above the start indentation closes it too, since it always
//! introduces the next declaration; at the start indentation `///` is a DAX or M comment
//! and stays in the body. A fenced block also closes at its closing fence.

use super::keywords;
use super::line_classification::{count_indent, first_word, FENCE};
use crate::tmdl::token::{Token, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Normal,
    /// Backtick-fenced DAX
    DaxBlock { start_indent: usize },
    /// Unfenced DAX continuation lines
    DaxMultiline { start_indent: usize },
    McodeBlock { start_indent: usize },
    JsonBlob { start_indent: usize },
}

impl LexState {
    pub fn start_indent(&self) -> Option<usize> {
        match self {
            LexState::Normal => None,
            LexState::DaxBlock { start_indent }
            | LexState::DaxMultiline { start_indent }
            | LexState::McodeBlock { start_indent }
            | LexState::JsonBlob { start_indent } => Some(*start_indent),
        }
    }

    /// The state a token classified in normal state leads into.
    ///
    /// Every block records the indentation of its opener + 1. A property nested under a
    /// block-opening property (`contentType` under `linguisticMetadata`) therefore
    /// closes the block, just as a sibling property does.
    pub fn entered_by(token: &Token) -> LexState {
        let empty = token.value_str().is_empty();
        let explicit_empty = token.value.as_deref() == Some("");
        let child_indent = token.indent + 1;

        match token.token_type {
            TokenType::Measure
            | TokenType::Expression
            | TokenType::CalculationItem
            | TokenType::TablePermission
                if empty =>
            {
                LexState::DaxMultiline {
                    start_indent: child_indent,
                }
            }
            TokenType::Column if explicit_empty => LexState::DaxMultiline {
                start_indent: child_indent,
            },
            TokenType::Annotation if explicit_empty => LexState::JsonBlob {
                start_indent: child_indent,
            },
            TokenType::Property if explicit_empty => match token.keyword_str() {
                "source" => LexState::McodeBlock {
                    start_indent: child_indent,
                },
                "linguisticMetadata" => LexState::JsonBlob {
                    start_indent: child_indent,
                },
                "formatStringExpression" => LexState::DaxMultiline {
                    start_indent: child_indent,
                },
                _ => LexState::Normal,
            },
            _ => LexState::Normal,
        }
    }

    /// The fenced block a token opens when its value is a bare fence, if any.
    pub fn fenced_by(token: &Token) -> Option<LexState> {
        if token.value.as_deref() != Some(FENCE) {
            return None;
        }
        let block_property = token.token_type == TokenType::Property
            && matches!(
                token.keyword_str(),
                "source" | "formatStringExpression" | "linguisticMetadata"
            );
        if token.token_type.is_declaration() || block_property {
            Some(LexState::DaxBlock {
                start_indent: token.indent + 1,
            })
        } else {
            None
        }
    }
}

/// Is this the line of a closing fence?
pub fn is_fence(raw: &str) -> bool {
    raw.trim() == FENCE
}

/// Does `raw` close a block opened at `start_indent`?
pub fn ends_block(raw: &str, start_indent: usize) -> bool {
    let indent = count_indent(raw);
    let content = raw[indent..].trim();
    if content.is_empty() || indent > start_indent {
        return false;
    }
    if content.starts_with("///") {
        // Body lines sit at the start depth, so only a shallower `///` is a doc comment
        return indent < start_indent;
    }
    keywords::is_known_keyword(first_word(content))
}
