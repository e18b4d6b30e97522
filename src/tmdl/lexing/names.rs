//! Object name quoting
//!
//! Names that are not bare identifiers are written between single quotes, with an
//! embedded quote doubled. Reading undoes exactly that, so the transform is lossless.

use once_cell::sync::Lazy;
use regex::Regex;

static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Can this name be written without quotes?
pub fn is_bare_identifier(name: &str) -> bool {
    BARE_IDENTIFIER.is_match(name)
}

/// Quote a name for writing, if it needs it.
pub fn quote_name(name: &str) -> String {
    if is_bare_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// Strip the quotes a writer added. Bare names come back unchanged.
pub fn unquote_name(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].replace("''", "'")
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_identifiers() {
        assert!(is_bare_identifier("Products"));
        assert!(is_bare_identifier("_total2"));
        assert!(!is_bare_identifier("Total Products"));
        assert!(!is_bare_identifier("2024Sales"));
        assert!(!is_bare_identifier("en-US"));
        assert!(!is_bare_identifier(""));
    }

    #[test]
    fn test_quote_round_trip() {
        for name in ["Sales", "Total Products", "O'Brien's", "%", "a.b"] {
            assert_eq!(unquote_name(&quote_name(name)), name);
        }
        assert_eq!(quote_name("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_unquote_bare_is_identity() {
        assert_eq!(unquote_name("Sales"), "Sales");
        assert_eq!(unquote_name("  Sales  "), "Sales");
    }
}
