//! Treeviz formatter
//!
//! A one line per node view of the tree, built from the [`AstSnapshot`]. Nesting is drawn
//! with box characters and every line reads `<Type>: <label>`, followed by the node's
//! set attributes in braces:
//!
//!     └─ Table: Sales {lineageTag=abc}
//!       ├─ Measure: Total {expression=SUM(Sales[Amount])}
//!       └─ Column: Amount {dataType=double}
//!
//! Labels are cut at 30 characters.

use super::registry::{FormatError, Formatter};
use crate::tmdl::ast::{snapshot_file, AstSnapshot, TmdlFile};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(file: &TmdlFile) -> String {
    let mut result = String::new();
    append_node(&mut result, &snapshot_file(file), "", true);
    result
}

fn append_node(result: &mut String, node: &AstSnapshot, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {}: {}",
        prefix,
        connector,
        node.node_type,
        truncate(&node.label, LABEL_WIDTH)
    ));
    if !node.attributes.is_empty() {
        let attributes: Vec<String> = node
            .attributes
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        result.push_str(&format!(" {{{}}}", attributes.join(", ")));
    }
    result.push('\n');

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    for (i, child) in node.children.iter().enumerate() {
        append_node(result, child, &new_prefix, i == node.children.len() - 1);
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, file: &TmdlFile) -> Result<String, FormatError> {
        Ok(to_treeviz_str(file))
    }

    fn description(&self) -> &str {
        "One line per node tree view"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdl::ast::{Column, Measure, Table};

    #[test]
    fn test_treeviz_layout() {
        let file = TmdlFile::Table(Table {
            name: "Sales".into(),
            measures: vec![Measure::new("Total", "SUM(Sales[Amount])")],
            columns: vec![Column {
                name: "Amount".into(),
                data_type: Some("double".into()),
                ..Default::default()
            }],
            ..Default::default()
        });
        let expected = "\
└─ Table: Sales
  ├─ Measure: Total {expression=SUM(Sales[Amount])}
  └─ Column: Amount {dataType=double}
";
        assert_eq!(to_treeviz_str(&file), expected);
    }

    #[test]
    fn test_truncate_long_labels() {
        let name = "A".repeat(40);
        let file = TmdlFile::Table(Table::new(name));
        assert!(to_treeviz_str(&file).starts_with(&format!("└─ Table: {}...", "A".repeat(30))));
    }
}
