//! Token definitions for the tmdl format
//!
//! The lexer is line based: every source line produces exactly one token (plus, for a
//! declaration opening a fenced block, one synthetic fence token). A token records what
//! kind of line it is, how deep it is indented and the pieces the parser needs from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    // Structural declarations
    Database,
    Model,
    Table,
    Column,
    Measure,
    Partition,
    Hierarchy,
    Level,
    Relationship,
    Expression,
    Culture,
    CalculationGroup,
    CalculationItem,
    Annotation,
    ChangedProperty,
    Ref,
    QueryGroup,
    DataAccessOptions,
    Role,
    TablePermission,
    Member,

    /// `key: value` or `key = value`
    Property,
    /// A bare recognized keyword, implying `true`
    BooleanFlag,
    /// A line starting with `///`
    DocComment,
    /// A raw line captured inside an embedded block
    ExpressionContent,
    /// A line consisting solely of a triple backtick
    BacktickFence,
    BlankLine,
    /// Anything no rule matched. Never an error.
    Unknown,
}

impl TokenType {
    /// The source keyword introducing this declaration, if it is one.
    pub fn keyword(&self) -> Option<&'static str> {
        let keyword = match self {
            TokenType::Database => "database",
            TokenType::Model => "model",
            TokenType::Table => "table",
            TokenType::Column => "column",
            TokenType::Measure => "measure",
            TokenType::Partition => "partition",
            TokenType::Hierarchy => "hierarchy",
            TokenType::Level => "level",
            TokenType::Relationship => "relationship",
            TokenType::Expression => "expression",
            TokenType::Culture => "cultureInfo",
            TokenType::CalculationGroup => "calculationGroup",
            TokenType::CalculationItem => "calculationItem",
            TokenType::Annotation => "annotation",
            TokenType::ChangedProperty => "changedProperty",
            TokenType::Ref => "ref",
            TokenType::QueryGroup => "queryGroup",
            TokenType::DataAccessOptions => "dataAccessOptions",
            TokenType::Role => "role",
            TokenType::TablePermission => "tablePermission",
            TokenType::Member => "member",
            _ => return None,
        };
        Some(keyword)
    }

    /// True for every structural declaration kind.
    pub fn is_declaration(&self) -> bool {
        self.keyword().is_some()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Database => "DATABASE",
            TokenType::Model => "MODEL",
            TokenType::Table => "TABLE",
            TokenType::Column => "COLUMN",
            TokenType::Measure => "MEASURE",
            TokenType::Partition => "PARTITION",
            TokenType::Hierarchy => "HIERARCHY",
            TokenType::Level => "LEVEL",
            TokenType::Relationship => "RELATIONSHIP",
            TokenType::Expression => "EXPRESSION",
            TokenType::Culture => "CULTURE",
            TokenType::CalculationGroup => "CALCULATION_GROUP",
            TokenType::CalculationItem => "CALCULATION_ITEM",
            TokenType::Annotation => "ANNOTATION",
            TokenType::ChangedProperty => "CHANGED_PROPERTY",
            TokenType::Ref => "REF",
            TokenType::QueryGroup => "QUERY_GROUP",
            TokenType::DataAccessOptions => "DATA_ACCESS_OPTIONS",
            TokenType::Role => "ROLE",
            TokenType::TablePermission => "TABLE_PERMISSION",
            TokenType::Member => "MEMBER",
            TokenType::Property => "PROPERTY",
            TokenType::BooleanFlag => "BOOLEAN_FLAG",
            TokenType::DocComment => "DOC_COMMENT",
            TokenType::ExpressionContent => "EXPRESSION_CONTENT",
            TokenType::BacktickFence => "BACKTICK_FENCE",
            TokenType::BlankLine => "BLANK_LINE",
            TokenType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// One classified source line.
///
/// `keyword` holds the declaration keyword, property key or flag name. `value` is `None`
/// when the line carries no `=`/`:` part at all and `Some` (possibly empty) otherwise,
/// which is how the lexer tells `column X` apart from a calculated `column X =`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    /// Count of leading tab characters
    pub indent: usize,
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    /// 1-based source line
    pub line: usize,
    /// The original line, without its line terminator
    pub raw: String,
}

impl Token {
    pub fn new(token_type: TokenType, indent: usize, line: usize, raw: impl Into<String>) -> Self {
        Self {
            token_type,
            indent,
            keyword: None,
            name: None,
            value: None,
            line,
            raw: raw.into(),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn keyword_str(&self) -> &str {
        self.keyword.as_deref().unwrap_or("")
    }

    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Captured content line holding nothing but whitespace.
    pub fn is_blank_content(&self) -> bool {
        self.token_type == TokenType::ExpressionContent && self.raw.trim().is_empty()
    }

    /// Tokens the parser's child loops step over without looking at their indentation.
    pub fn is_skippable(&self) -> bool {
        self.token_type == TokenType::BlankLine || self.is_blank_content()
    }

    /// Is this a property line with the given key?
    pub fn is_property(&self, key: &str) -> bool {
        self.token_type == TokenType::Property && self.keyword.as_deref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_keywords() {
        assert_eq!(TokenType::Culture.keyword(), Some("cultureInfo"));
        assert_eq!(TokenType::CalculationItem.keyword(), Some("calculationItem"));
        assert!(TokenType::Member.is_declaration());
        assert!(!TokenType::Property.is_declaration());
        assert!(!TokenType::Unknown.is_declaration());
    }

    #[test]
    fn test_display_uses_grammar_names() {
        assert_eq!(TokenType::BooleanFlag.to_string(), "BOOLEAN_FLAG");
        assert_eq!(TokenType::ExpressionContent.to_string(), "EXPRESSION_CONTENT");
        assert_eq!(TokenType::CalculationGroup.to_string(), "CALCULATION_GROUP");
    }

    #[test]
    fn test_blank_content_is_skippable() {
        let blank = Token::new(TokenType::ExpressionContent, 2, 4, "\t\t");
        let content = Token::new(TokenType::ExpressionContent, 2, 5, "\t\tSUM(x)");
        assert!(blank.is_skippable());
        assert!(!content.is_skippable());
        assert!(Token::new(TokenType::BlankLine, 0, 1, "").is_skippable());
    }
}
