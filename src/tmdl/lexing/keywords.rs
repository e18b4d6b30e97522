//! Keyword tables
//!
//! Immutable lookup data shared by the line classifier and the block exit rule. The
//! tables are built once on first use and never mutated afterwards.

use crate::tmdl::token::TokenType;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Keywords that introduce a structural declaration, mapped to their token type.
pub static STRUCTURAL_KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    [
        ("database", TokenType::Database),
        ("model", TokenType::Model),
        ("table", TokenType::Table),
        ("column", TokenType::Column),
        ("measure", TokenType::Measure),
        ("partition", TokenType::Partition),
        ("hierarchy", TokenType::Hierarchy),
        ("level", TokenType::Level),
        ("relationship", TokenType::Relationship),
        ("expression", TokenType::Expression),
        ("cultureInfo", TokenType::Culture),
        ("calculationGroup", TokenType::CalculationGroup),
        ("calculationItem", TokenType::CalculationItem),
        ("annotation", TokenType::Annotation),
        ("changedProperty", TokenType::ChangedProperty),
        ("ref", TokenType::Ref),
        ("queryGroup", TokenType::QueryGroup),
        ("dataAccessOptions", TokenType::DataAccessOptions),
        ("role", TokenType::Role),
        ("tablePermission", TokenType::TablePermission),
        ("member", TokenType::Member),
    ]
    .into_iter()
    .collect()
});

/// Property keys the block exit rule recognizes.
///
/// Any `identifier: value` line is a property in normal state; this list only decides
/// whether a line inside an embedded block closes it.
pub static PROPERTY_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "compatibilityLevel",
        "culture",
        "defaultPowerBIDataSourceVersion",
        "sourceQueryCulture",
        "dataType",
        "formatString",
        "formatStringExpression",
        "displayFolder",
        "lineageTag",
        "sourceLineageTag",
        "summarizeBy",
        "sourceColumn",
        "sortByColumn",
        "dataCategory",
        "description",
        "isActive",
        "isAvailableInMdx",
        "mode",
        "source",
        "queryGroup",
        "column",
        "ordinal",
        "precedence",
        "fromColumn",
        "toColumn",
        "fromCardinality",
        "toCardinality",
        "crossFilteringBehavior",
        "securityFilteringBehavior",
        "joinOnDateBehavior",
        "linguisticMetadata",
        "contentType",
        "modelPermission",
        "identityProvider",
        "entityName",
        "expressionSource",
        "schemaName",
    ]
    .into_iter()
    .collect()
});

/// Keywords that may stand alone on a line, meaning `true`.
pub static BOOLEAN_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "isHidden",
        "isKey",
        "isUnique",
        "isNameInferred",
        "isDataTypeInferred",
        "isDefaultLabel",
        "isDefaultImage",
        "isPrivate",
        "isSimpleMeasure",
        "discourageImplicitMeasures",
        "relyOnReferentialIntegrity",
        "legacyRedirects",
        "returnErrorValuesAsNull",
        "fastCombine",
        "excludeFromModelRefresh",
        "showAsVariationsOnly",
    ]
    .into_iter()
    .collect()
});

/// Declarations that are complete without a name.
pub const NAMELESS_DECLARATIONS: &[TokenType] =
    &[TokenType::CalculationGroup, TokenType::DataAccessOptions];

pub fn structural(word: &str) -> Option<TokenType> {
    STRUCTURAL_KEYWORDS.get(word).copied()
}

pub fn is_property_keyword(word: &str) -> bool {
    PROPERTY_KEYWORDS.contains(word)
}

pub fn is_boolean_flag(word: &str) -> bool {
    BOOLEAN_KEYWORDS.contains(word)
}

/// Structural, property or boolean keyword.
pub fn is_known_keyword(word: &str) -> bool {
    structural(word).is_some() || is_property_keyword(word) || is_boolean_flag(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_lookup() {
        assert_eq!(structural("cultureInfo"), Some(TokenType::Culture));
        assert_eq!(structural("tablePermission"), Some(TokenType::TablePermission));
        assert_eq!(structural("culture"), None);
        assert_eq!(structural("Table"), None);
    }

    #[test]
    fn test_known_keywords_cover_all_tables() {
        assert!(is_known_keyword("measure"));
        assert!(is_known_keyword("formatString"));
        assert!(is_known_keyword("isHidden"));
        assert!(!is_known_keyword("VAR"));
        assert!(!is_known_keyword("let"));
        assert!(!is_known_keyword("Source"));
    }
}
