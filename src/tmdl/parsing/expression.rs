//! Expression capture and normalization
//!
//! One capture routine serves every expression-bearing declaration: measures,
//! calculation items, shared expressions, partition sources, format-string expressions,
//! table-permission filters, calculated columns, linguistic metadata and multi-line
//! annotation values.
//!
//! Capture, in order of precedence:
//!
//!     1. A fence follows the declaration: take content lines up to the closing fence.
//!     2. The declaration has a non-empty inline value: take it verbatim.
//!     3. Otherwise take consecutive content lines.
//!
//! The captured lines are then normalized: the smallest leading tab count across the
//! non-blank lines is stripped from every line, trailing whitespace and blank lines at
//! either end are dropped and the rest is joined with `\n`.

use super::cursor::TokenCursor;
use crate::tmdl::token::{Token, TokenType};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Capture the expression of `decl`. The cursor must rest right after `decl`.
pub fn capture_expression(cursor: &mut TokenCursor<'_>, decl: &Token) -> String {
    if cursor.peek_type() == Some(TokenType::BacktickFence) {
        cursor.advance();
        let mut lines = Vec::new();
        while let Some(token) = cursor.peek() {
            match token.token_type {
                TokenType::ExpressionContent => {
                    lines.push(token.raw.as_str());
                    cursor.advance();
                }
                TokenType::BacktickFence => {
                    cursor.advance();
                    break;
                }
                _ => {
                    tracing::trace!(line = decl.line, "fenced expression without closing fence");
                    break;
                }
            }
        }
        return normalize_lines(&lines);
    }

    let inline = decl.value_str();
    if !inline.is_empty() {
        return inline.to_string();
    }

    let mut lines = Vec::new();
    while let Some(token) = cursor.peek() {
        if token.token_type != TokenType::ExpressionContent {
            break;
        }
        lines.push(token.raw.as_str());
        cursor.advance();
    }
    normalize_lines(&lines)
}

/// Strip the common tab indentation, drop blank edge lines and join.
pub fn normalize_lines(lines: &[&str]) -> String {
    let min_tabs = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.bytes().take_while(|b| *b == b'\t').count())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line[min_tabs..].trim_end()
            }
        })
        .collect();

    let start = stripped.iter().position(|l| !l.is_empty());
    let end = stripped.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => stripped[start..=end].join("\n"),
        _ => String::new(),
    }
}

static META_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\bmeta\s*\[(.*)\]\s*$").expect("valid meta regex"));

/// Parse a trailing `meta [key = value, ...]` clause into an ordered map.
///
/// `true`/`false` become booleans, double-quoted text becomes a string (with `""`
/// unescaped), numbers become numbers and anything else is kept as raw text.
pub fn extract_meta(expression: &str) -> IndexMap<String, Value> {
    let mut meta = IndexMap::new();
    let Some(captures) = META_CLAUSE.captures(expression) else {
        return meta;
    };
    let body = captures.get(1).map(|m| m.as_str()).unwrap_or("");

    for entry in split_entries(body) {
        let Some((key, value)) = entry.split_once('=') else {
            tracing::trace!(entry, "meta entry without a value");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        meta.insert(key.to_string(), meta_value(value.trim()));
    }
    meta
}

/// Split on commas that are not inside a double-quoted string.
fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_string = false;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '"' => in_string = !in_string,
            ',' if !in_string => {
                entries.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&body[start..]);
    entries.into_iter().filter(|e| !e.trim().is_empty()).collect()
}

fn meta_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::String(raw[1..raw.len() - 1].replace("\"\"", "\""));
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}
