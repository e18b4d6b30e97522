//! Main module for tmdl library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod token;

pub use ast::TmdlFile;
pub use parsing::{FileKind, ParseOutcome, ParseWarning};
