//! Text to tree in one call, and the round-trip checker
//!
//! The pipeline chains the three core stages:
//!
//!     source --tokenize--> tokens --parse--> tree --serialize--> canonical text
//!
//! [`round_trip`] runs the chain twice (source to tree to text to tree to text) and
//! [`check_round_trip`] turns a lossy or unstable result into a [`CheckError`]. Trees
//! are compared, not texts: the first serialization may legitimately differ from the
//! source, but it must parse back to the same tree and serialize to itself.

use crate::tmdl::ast::TmdlFile;
use crate::tmdl::formats::{serialize_with, to_treeviz_str, SerializeOptions};
use crate::tmdl::lexing::tokenize;
use crate::tmdl::parsing::{parse, FileKind, ParseOutcome, ParseWarning};
use crate::tmdl::token::Token;
use thiserror::Error;

/// Everything the pipeline produced for one source text.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub tokens: Vec<Token>,
    pub outcome: ParseOutcome,
}

/// Tokenize and parse, keeping the tokens.
pub fn run(source: &str, kind: FileKind) -> PipelineOutput {
    let tokens = tokenize(source);
    let outcome = parse(&tokens, kind);
    PipelineOutput { tokens, outcome }
}

/// Both passes of a round trip.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub kind: FileKind,
    /// Tree parsed from the original source
    pub original: TmdlFile,
    /// Canonical text of `original`
    pub serialized: String,
    /// Tree parsed from `serialized`
    pub reparsed: TmdlFile,
    /// Canonical text of `reparsed`
    pub reserialized: String,
    pub warnings: Vec<ParseWarning>,
}

impl RoundTrip {
    /// Parsing the canonical text gives back the same tree.
    pub fn is_equivalent(&self) -> bool {
        self.original == self.reparsed
    }

    /// Serializing is stable: the second pass reproduces the first byte for byte.
    pub fn is_idempotent(&self) -> bool {
        self.serialized == self.reserialized
    }
}

pub fn round_trip(source: &str, kind: FileKind, options: &SerializeOptions) -> RoundTrip {
    let first = run(source, kind).outcome;
    let serialized = serialize_with(&first.file, options);
    let second = run(&serialized, kind).outcome;
    let reserialized = serialize_with(&second.file, options);
    tracing::debug!(
        %kind,
        equivalent = first.file == second.file,
        idempotent = serialized == reserialized,
        "round trip"
    );
    RoundTrip {
        kind,
        original: first.file,
        serialized,
        reparsed: second.file,
        reserialized,
        warnings: first.warnings,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("round trip changed the {kind} tree; first difference:\n  before: {before}\n  after:  {after}")]
    TreeMismatch {
        kind: FileKind,
        before: String,
        after: String,
    },
    #[error("serializing the {kind} tree twice gave different text at line {line}")]
    NotIdempotent { kind: FileKind, line: usize },
    #[error("{count} parse warning(s): {first}")]
    Warnings { count: usize, first: String },
}

/// Round trip `source` and fail on the first problem found.
pub fn check_round_trip(
    source: &str,
    kind: FileKind,
    options: &SerializeOptions,
    fail_on_warnings: bool,
) -> Result<RoundTrip, CheckError> {
    let result = round_trip(source, kind, options);

    if fail_on_warnings {
        if let Some(first) = result.warnings.first() {
            return Err(CheckError::Warnings {
                count: result.warnings.len(),
                first: first.to_string(),
            });
        }
    }

    if !result.is_equivalent() {
        let (before, after) =
            first_difference(&to_treeviz_str(&result.original), &to_treeviz_str(&result.reparsed));
        return Err(CheckError::TreeMismatch {
            kind,
            before,
            after,
        });
    }

    if !result.is_idempotent() {
        let line = result
            .serialized
            .lines()
            .zip(result.reserialized.lines())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| result.serialized.lines().count().min(result.reserialized.lines().count()))
            + 1;
        return Err(CheckError::NotIdempotent { kind, line });
    }

    Ok(result)
}

/// The first pair of differing lines of two dumps. Missing lines show as `<none>`.
fn first_difference(before: &str, after: &str) -> (String, String) {
    let mut left = before.lines();
    let mut right = after.lines();
    loop {
        match (left.next(), right.next()) {
            (Some(a), Some(b)) if a == b => continue,
            (None, None) => return (String::new(), String::new()),
            (a, b) => {
                return (
                    a.unwrap_or("<none>").trim().to_string(),
                    b.unwrap_or("<none>").trim().to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_tokens() {
        let output = run("table Sales\n\tcolumn A\n", FileKind::Table);
        assert_eq!(output.tokens.len(), 2);
        assert!(output.outcome.is_clean());
    }

    #[test]
    fn test_round_trip_of_messy_source() {
        // Extra blank lines and a fenced body are not canonical, but keep their meaning
        let source = "table Sales\n\n\n\tmeasure Total = ```\n\t\tSUM(Sales[Amount])\n\t\t```\n\n\n\tcolumn Amount\n\t\tdataType: double\n";
        let result = check_round_trip(source, FileKind::Table, &SerializeOptions::default(), false)
            .expect("round trip");
        assert!(result.serialized.contains("measure Total = SUM(Sales[Amount])"));
        assert_ne!(result.serialized, source);
    }

    #[test]
    fn test_warnings_fail_check_when_asked() {
        let options = SerializeOptions::default();
        assert!(check_round_trip("", FileKind::Role, &options, false).is_ok());
        assert!(matches!(
            check_round_trip("", FileKind::Role, &options, true),
            Err(CheckError::Warnings { count: 1, .. })
        ));
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(
            first_difference("a\nb\nc", "a\nx\nc"),
            ("b".to_string(), "x".to_string())
        );
        assert_eq!(
            first_difference("a", "a\nb"),
            ("<none>".to_string(), "b".to_string())
        );
    }
}
