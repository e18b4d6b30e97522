//! Common traits for AST nodes

use super::range::SourceRange;

/// Common interface for every declaration node.
pub trait AstNode {
    /// The node's kind as shown by the inspection formats (e.g. "Measure")
    fn node_type(&self) -> &'static str;

    /// One-line label: the declared name, or a short description for nameless nodes
    fn display_label(&self) -> String;

    fn range(&self) -> Option<SourceRange>;

    /// The `///` doc comment preceding the declaration, if any
    fn doc(&self) -> Option<&str>;
}

/// Labels longer than this are cut when shown on a single line.
pub const LABEL_LIMIT: usize = 50;

/// Shorten a label for single-line display, marking the cut with `...`.
pub fn truncate_label(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let multi_line = text.lines().nth(1).is_some();
    if first_line.chars().count() > LABEL_LIMIT {
        let cut: String = first_line.chars().take(LABEL_LIMIT).collect();
        format!("{}...", cut)
    } else if multi_line {
        format!("{}...", first_line)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("SUM(x)"), "SUM(x)");
        assert_eq!(truncate_label("VAR a = 1\nRETURN a"), "VAR a = 1...");
        let long = "x".repeat(60);
        assert_eq!(truncate_label(&long), format!("{}...", "x".repeat(50)));
    }
}
