//! Text matchers for fluent assertions

/// How a text property is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    /// Panics with `context` in the message when `actual` does not match.
    pub fn assert(&self, actual: &str, context: &str) {
        match self {
            TextMatch::Exact(expected) => {
                assert_eq!(
                    actual, expected,
                    "{}: Expected text to be '{}', but got '{}'",
                    context, expected, actual
                );
            }
            TextMatch::StartsWith(prefix) => {
                assert!(
                    actual.starts_with(prefix.as_str()),
                    "{}: Expected text to start with '{}', but got '{}'",
                    context,
                    prefix,
                    actual
                );
            }
            TextMatch::Contains(substring) => {
                assert!(
                    actual.contains(substring.as_str()),
                    "{}: Expected text to contain '{}', but got '{}'",
                    context,
                    substring,
                    actual
                );
            }
        }
    }

    /// Like [`TextMatch::assert`], for optional properties that must be set.
    pub fn assert_some(&self, actual: Option<&str>, context: &str) {
        match actual {
            Some(actual) => self.assert(actual, context),
            None => panic!("{}: Expected a value matching {:?}, but it is unset", context, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        TextMatch::Exact("SUM(a)".into()).assert("SUM(a)", "m");
        TextMatch::StartsWith("VAR".into()).assert("VAR x = 1", "m");
        TextMatch::Contains("RETURN".into()).assert("VAR x = 1\nRETURN x", "m");
    }

    #[test]
    #[should_panic(expected = "ctx: Expected text to contain 'zzz'")]
    fn test_mismatch_reports_context() {
        TextMatch::Contains("zzz".into()).assert("abc", "ctx");
    }

    #[test]
    #[should_panic(expected = "it is unset")]
    fn test_unset_value_fails() {
        TextMatch::Exact("x".into()).assert_some(None, "ctx");
    }
}
