//! Parsing module for the tmdl format
//!
//! Turns the token stream of one file into a typed tree. The caller states what the file
//! is expected to contain (a [`FileKind`]); the parser then looks for the matching
//! declaration(s) and builds them with one builder per node kind.
//!
//! Scoping
//!
//!     Nesting is read from indentation alone: a declaration's body is every following
//!     token indented deeper than the declaration itself. The first token at the same or
//!     a shallower depth ends the body. Blank lines never end a body.
//!
//! Warnings
//!
//!     The parser never fails. When the expected declaration is missing it records a
//!     [`ParseWarning`] and returns a default node in its place; every other anomaly
//!     (unknown lines, stray properties, malformed numbers) is skipped and only traced.
//!
//! Modules
//!
//! - `cursor` - The forward-only token cursor shared by all builders
//! - `expression` - Expression capture, normalization and `meta` extraction
//! - `builders` - One builder per declaration kind

pub mod builders;
pub mod cursor;
pub mod expression;

use crate::tmdl::ast::{Model, TmdlFile};
use crate::tmdl::token::{Token, TokenType};
use builders::{culture, database, expression as expression_builder, model, relationship, role, table};
use cursor::TokenCursor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What a file is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Database,
    Model,
    Table,
    Relationships,
    Expressions,
    Culture,
    Role,
}

impl FileKind {
    pub const ALL: [FileKind; 7] = [
        FileKind::Database,
        FileKind::Model,
        FileKind::Table,
        FileKind::Relationships,
        FileKind::Expressions,
        FileKind::Culture,
        FileKind::Role,
    ];

    /// The declaration token each file kind is built from.
    pub fn declaration(&self) -> TokenType {
        match self {
            FileKind::Database => TokenType::Database,
            FileKind::Model => TokenType::Model,
            FileKind::Table => TokenType::Table,
            FileKind::Relationships => TokenType::Relationship,
            FileKind::Expressions => TokenType::Expression,
            FileKind::Culture => TokenType::Culture,
            FileKind::Role => TokenType::Role,
        }
    }

    /// Infer the kind from the conventional project layout:
    ///
    ///     database.tmdl  model.tmdl  relationships.tmdl  expressions.tmdl
    ///     tables/*.tmdl  cultures/*.tmdl  roles/*.tmdl
    pub fn infer_from_path(path: &Path) -> Option<FileKind> {
        let stem = path.file_stem()?.to_str()?;
        match stem {
            "database" => return Some(FileKind::Database),
            "model" => return Some(FileKind::Model),
            "relationships" => return Some(FileKind::Relationships),
            "expressions" => return Some(FileKind::Expressions),
            _ => {}
        }
        let parent = path.parent()?.file_name()?.to_str()?;
        match parent {
            "tables" => Some(FileKind::Table),
            "cultures" => Some(FileKind::Culture),
            "roles" => Some(FileKind::Role),
            _ => None,
        }
    }

    /// Guess the kind from the first top-level declaration in a token stream.
    pub fn sniff(tokens: &[Token]) -> Option<FileKind> {
        tokens
            .iter()
            .filter(|t| t.indent == 0 && t.token_type.is_declaration())
            .find_map(|t| {
                FileKind::ALL
                    .into_iter()
                    .find(|kind| kind.declaration() == t.token_type)
            })
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::Database => "database",
            FileKind::Model => "model",
            FileKind::Table => "table",
            FileKind::Relationships => "relationships",
            FileKind::Expressions => "expressions",
            FileKind::Culture => "culture",
            FileKind::Role => "role",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "database" => Ok(FileKind::Database),
            "model" => Ok(FileKind::Model),
            "table" => Ok(FileKind::Table),
            "relationships" | "relationship" => Ok(FileKind::Relationships),
            "expressions" | "expression" => Ok(FileKind::Expressions),
            "culture" | "cultureInfo" => Ok(FileKind::Culture),
            "role" => Ok(FileKind::Role),
            other => Err(format!("unknown file kind '{}'", other)),
        }
    }
}

/// A non-fatal parse diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub message: String,
    pub line: Option<usize>,
}

impl ParseWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// The tree parsed from one file plus the warnings collected on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub file: TmdlFile,
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Parse a token stream as the given file kind.
pub fn parse(tokens: &[Token], kind: FileKind) -> ParseOutcome {
    let mut cursor = TokenCursor::new(tokens);
    let mut warnings = Vec::new();

    let file = match kind {
        FileKind::Database => TmdlFile::Database(
            single(&mut cursor, kind, &mut warnings, database::build).unwrap_or_default(),
        ),
        FileKind::Model => TmdlFile::Model(parse_model_file(&mut cursor, &mut warnings)),
        FileKind::Table => TmdlFile::Table(
            single(&mut cursor, kind, &mut warnings, table::build).unwrap_or_default(),
        ),
        FileKind::Culture => TmdlFile::Culture(
            single(&mut cursor, kind, &mut warnings, culture::build).unwrap_or_default(),
        ),
        FileKind::Role => TmdlFile::Role(
            single(&mut cursor, kind, &mut warnings, role::build).unwrap_or_default(),
        ),
        FileKind::Relationships => TmdlFile::Relationships(collect(
            &mut cursor,
            kind,
            &mut warnings,
            relationship::build,
        )),
        FileKind::Expressions => TmdlFile::Expressions(collect(
            &mut cursor,
            kind,
            &mut warnings,
            expression_builder::build,
        )),
    };

    for warning in &warnings {
        tracing::warn!(%kind, "{}", warning);
    }
    tracing::debug!(%kind, warnings = warnings.len(), "parsed file");
    ParseOutcome { file, warnings }
}

/// Tokenize and parse in one call.
pub fn parse_source(source: &str, kind: FileKind) -> ParseOutcome {
    let tokens = crate::tmdl::lexing::tokenize(source);
    parse(&tokens, kind)
}

type Builder<T> = fn(&mut TokenCursor<'_>, &Token) -> T;

/// Build the first declaration of the expected kind, stepping over everything else.
fn single<T>(
    cursor: &mut TokenCursor<'_>,
    kind: FileKind,
    warnings: &mut Vec<ParseWarning>,
    build: Builder<T>,
) -> Option<T> {
    let wanted = kind.declaration();
    while let Some(token) = cursor.peek() {
        if token.token_type == TokenType::DocComment {
            cursor.buffer_doc(token);
        } else if token.token_type == wanted {
            return Some(build(cursor, token));
        } else if token.is_skippable() {
            cursor.advance();
        } else {
            cursor.skip(token);
        }
    }
    warnings.push(missing(wanted));
    None
}

/// Build every declaration of the expected kind, in order.
fn collect<T>(
    cursor: &mut TokenCursor<'_>,
    kind: FileKind,
    warnings: &mut Vec<ParseWarning>,
    build: Builder<T>,
) -> Vec<T> {
    let wanted = kind.declaration();
    let mut nodes = Vec::new();
    while let Some(token) = cursor.peek() {
        if token.token_type == TokenType::DocComment {
            cursor.buffer_doc(token);
        } else if token.token_type == wanted {
            nodes.push(build(cursor, token));
        } else if token.is_skippable() {
            cursor.advance();
        } else {
            cursor.skip(token);
        }
    }
    if nodes.is_empty() {
        warnings.push(missing(wanted));
    }
    nodes
}

/// The model block, then the top-level query groups, annotations and refs that follow it.
fn parse_model_file(cursor: &mut TokenCursor<'_>, warnings: &mut Vec<ParseWarning>) -> Model {
    let mut model = single(cursor, FileKind::Model, warnings, model::build)
        .unwrap_or_else(|| Model::new("Model"));

    while let Some(token) = cursor.peek() {
        match token.token_type {
            TokenType::DocComment => cursor.buffer_doc(token),
            TokenType::QueryGroup => model
                .query_groups
                .push(model::build_query_group(cursor, token)),
            TokenType::Annotation => model
                .annotations
                .push(builders::build_annotation(cursor, token)),
            TokenType::Ref => model.references.push(model::build_reference(cursor, token)),
            _ if token.is_skippable() => {
                cursor.advance();
            }
            _ => cursor.skip(token),
        }
    }
    model
}

fn missing(wanted: TokenType) -> ParseWarning {
    let keyword = wanted.keyword().unwrap_or("declaration");
    ParseWarning::new(format!("no `{}` declaration found", keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_path() {
        let cases = [
            ("model/database.tmdl", Some(FileKind::Database)),
            ("definition/model.tmdl", Some(FileKind::Model)),
            ("definition/tables/Sales.tmdl", Some(FileKind::Table)),
            ("definition/cultures/en-US.tmdl", Some(FileKind::Culture)),
            ("definition/roles/Readers.tmdl", Some(FileKind::Role)),
            ("relationships.tmdl", Some(FileKind::Relationships)),
            ("definition/other/x.tmdl", None),
        ];
        for (path, expected) in cases {
            assert_eq!(FileKind::infer_from_path(Path::new(path)), expected, "{}", path);
        }
    }

    #[test]
    fn test_file_kind_round_trips_through_strings() {
        for kind in FileKind::ALL {
            assert_eq!(kind.to_string().parse::<FileKind>(), Ok(kind));
        }
        assert!("nonsense".parse::<FileKind>().is_err());
    }

    #[test]
    fn test_sniff_kind() {
        let tokens = crate::tmdl::lexing::tokenize("/// doc\ntable Sales\n\tcolumn A\n");
        assert_eq!(FileKind::sniff(&tokens), Some(FileKind::Table));
    }

    #[test]
    fn test_missing_declaration_warns_with_default() {
        let outcome = parse_source("\tcolumn Orphan\n", FileKind::Table);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].message.contains("table"));
        assert_eq!(outcome.file.as_table().map(|t| t.name.as_str()), Some(""));
    }

    #[test]
    fn test_empty_collection_warns() {
        let outcome = parse_source("", FileKind::Relationships);
        assert_eq!(outcome.file, TmdlFile::Relationships(Vec::new()));
        assert!(!outcome.is_clean());
    }
}
