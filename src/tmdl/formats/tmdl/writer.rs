//! Line writer used by the element serializers
//!
//! Collects output lines indented with tabs. Blank lines between children are requested
//! with [`Writer::gap`] and collapse, so no element ever emits two in a row.

use super::SerializeOptions;
use crate::tmdl::lexing::keywords;
use crate::tmdl::lexing::line_classification::FENCE;

pub struct Writer<'o> {
    lines: Vec<String>,
    options: &'o SerializeOptions,
}

impl<'o> Writer<'o> {
    pub fn new(options: &'o SerializeOptions) -> Self {
        Self {
            lines: Vec::new(),
            options,
        }
    }

    pub fn line(&mut self, level: usize, text: &str) {
        self.lines.push(format!("{}{}", "\t".repeat(level), text));
    }

    /// Separate two children. A no-op at the start of the output, after another gap or
    /// when gaps are turned off.
    pub fn gap(&mut self) {
        if !self.options.blank_line_between_children {
            return;
        }
        match self.lines.last() {
            Some(last) if !last.is_empty() => self.lines.push(String::new()),
            _ => {}
        }
    }

    pub fn doc(&mut self, level: usize, doc: Option<&str>) {
        let Some(doc) = doc else {
            return;
        };
        for line in doc.split('\n') {
            if line.is_empty() {
                self.line(level, "///");
            } else {
                self.line(level, &format!("/// {}", line));
            }
        }
    }

    /// `key: value`, when the value is set.
    pub fn property(&mut self, level: usize, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.line(level, &format!("{}: {}", key, value));
        }
    }

    /// A bare flag when true. Nothing otherwise.
    pub fn flag(&mut self, level: usize, key: &str, set: bool) {
        if set {
            self.line(level, key);
        }
    }

    /// `head = expression` inline, or `head =` followed by the expression lines at
    /// `body_level`.
    pub fn expression(&mut self, level: usize, head: &str, expression: &str, body_level: usize) {
        if expression.is_empty() {
            self.line(level, &format!("{} =", head));
        } else if fits_inline(expression) {
            self.line(level, &format!("{} = {}", head, expression));
        } else {
            self.line(level, &format!("{} =", head));
            for line in expression.split('\n') {
                if line.trim().is_empty() {
                    self.lines.push(String::new());
                } else {
                    self.line(body_level, line);
                }
            }
        }
    }

    /// A declaration with its expression; the body sits one level deeper.
    pub fn declaration_expression(&mut self, level: usize, head: &str, expression: &str) {
        self.expression(level, head, expression, level + 1);
    }

    /// A block-opening property (`source =`, `formatStringExpression =`, ...); the body
    /// sits one level below the property.
    pub fn property_expression(&mut self, level: usize, key: &str, expression: Option<&str>) {
        if let Some(expression) = expression {
            self.expression(level, key, expression, level + 1);
        }
    }

    /// Boolean-valued entries of an options bag: a bare flag when the language knows the
    /// flag, `key: value` otherwise.
    pub fn option(&mut self, level: usize, key: &str, value: &str) {
        if value == "true" && keywords::is_boolean_flag(key) {
            self.line(level, key);
        } else {
            self.line(level, &format!("{}: {}", key, value));
        }
    }

    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Single-line expressions are written on the declaration line, unless the lexer would
/// read them back differently (edge whitespace is trimmed, a bare fence opens a block).
fn fits_inline(expression: &str) -> bool {
    !expression.contains('\n') && expression.trim() == expression && expression != FENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps_collapse() {
        let options = SerializeOptions::default();
        let mut writer = Writer::new(&options);
        writer.gap();
        writer.line(0, "table T");
        writer.gap();
        writer.gap();
        writer.line(1, "column A");
        writer.gap();
        assert_eq!(writer.finish(), "table T\n\n\tcolumn A\n");
    }

    #[test]
    fn test_gaps_can_be_disabled() {
        let options = SerializeOptions {
            blank_line_between_children: false,
        };
        let mut writer = Writer::new(&options);
        writer.line(0, "table T");
        writer.gap();
        writer.line(1, "column A");
        assert_eq!(writer.finish(), "table T\n\tcolumn A\n");
    }

    #[test]
    fn test_expression_forms() {
        let options = SerializeOptions::default();
        let mut writer = Writer::new(&options);
        writer.declaration_expression(1, "measure X", "SUM(a)");
        writer.declaration_expression(1, "measure Y", "VAR a = 1\n\nRETURN a");
        writer.declaration_expression(1, "measure Z", "");
        assert_eq!(
            writer.finish(),
            "\tmeasure X = SUM(a)\n\tmeasure Y =\n\t\tVAR a = 1\n\n\t\tRETURN a\n\tmeasure Z =\n"
        );
    }

    #[test]
    fn test_doc_lines() {
        let options = SerializeOptions::default();
        let mut writer = Writer::new(&options);
        writer.doc(1, Some("first\n\nthird"));
        assert_eq!(writer.finish(), "\t/// first\n\t///\n\t/// third\n");
    }
}
