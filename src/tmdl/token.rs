//! Core token types and helpers shared across the lexer, parser, and tooling.

pub mod core;
pub mod formatting;

pub use self::core::{Token, TokenType};
pub use formatting::{detokenize, format_token_stream};
