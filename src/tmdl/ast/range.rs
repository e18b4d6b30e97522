//! Source line spans
//!
//! Every declaration remembers the lines it was parsed from, for diagnostics and for the
//! treeviz dump. Two trees must compare equal when their content matches, whether they
//! were parsed from differently laid out texts or built in code, so `SourceRange` is
//! transparent to `PartialEq`: any two ranges are equal. Nodes built in code carry the
//! default range, line 0, which [`SourceRange::is_set`] reports as unset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based, inclusive line span of a declaration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Lines are 1-based, so the default range marks a node that was not parsed.
    pub fn is_set(&self) -> bool {
        self.start_line > 0
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

impl PartialEq for SourceRange {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for SourceRange {}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}", self.start_line)
        } else {
            write!(f, "{}..{}", self.start_line, self.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_never_affect_equality() {
        assert_eq!(SourceRange::new(1, 4), SourceRange::new(10, 12));
        assert_eq!(SourceRange::default(), SourceRange::single(9));
    }

    #[test]
    fn test_default_range_is_unset() {
        assert!(!SourceRange::default().is_set());
        assert!(SourceRange::single(1).is_set());
    }

    #[test]
    fn test_display_and_contains() {
        let range = SourceRange::new(3, 7);
        assert_eq!(range.to_string(), "3..7");
        assert_eq!(SourceRange::single(2).to_string(), "2");
        assert!(range.contains(5));
        assert!(!range.contains(8));
        // end never precedes start
        assert_eq!(SourceRange::new(5, 2).end_line, 5);
    }
}
