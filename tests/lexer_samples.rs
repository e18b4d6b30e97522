//! Lexer behaviour over the sample project
//!
//! Checks the block state machine on real files: which lines are captured as content,
//! which close a block, and that every file survives the token-level round trip.

use tmdl::tmdl::lexing::tokenize;
use tmdl::tmdl::testing::Samples;
use tmdl::tmdl::token::{detokenize, Token, TokenType};

fn line(tokens: &[Token], text: &str) -> Token {
    tokens
        .iter()
        .find(|t| t.raw.trim() == text)
        .cloned()
        .unwrap_or_else(|| panic!("no token for line '{}'", text))
}

#[test]
fn test_every_sample_detokenizes_to_itself() {
    for sample in Samples::all() {
        let source = sample.source();
        assert_eq!(detokenize(&tokenize(&source)), source, "{}", sample.name());
    }
}

#[test]
fn test_no_unknown_lines_outside_entity_sources() {
    for sample in Samples::all() {
        for token in sample.tokenize() {
            if token.token_type == TokenType::Unknown {
                assert_eq!(token.raw.trim(), "source", "{}: line {}", sample.name(), token.line);
            }
        }
    }
}

#[test]
fn test_multiline_measure_body_is_content() {
    let tokens = Samples::load("tables/Sales.tmdl").tokenize();
    assert_eq!(line(&tokens, "RETURN").token_type, TokenType::ExpressionContent);
    let closing = line(&tokens, "formatString: $#,0.00");
    assert_eq!(closing.token_type, TokenType::Property);
    assert_eq!(closing.indent, 2);
}

#[test]
fn test_fenced_measure_emits_both_fences() {
    let tokens = Samples::load("tables/Sales.tmdl").tokenize();
    let start = tokens
        .iter()
        .position(|t| t.name.as_deref() == Some("Sales YoY %"))
        .unwrap();
    assert_eq!(tokens[start].value.as_deref(), Some(""));
    assert_eq!(tokens[start + 1].token_type, TokenType::BacktickFence);
    assert_eq!(tokens[start + 1].line, tokens[start].line);

    let types: Vec<TokenType> = tokens[start + 2..start + 8].iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::ExpressionContent,
            TokenType::ExpressionContent,
            TokenType::ExpressionContent,
            TokenType::ExpressionContent,
            TokenType::BacktickFence,
            TokenType::Property,
        ]
    );
}

#[test]
fn test_mcode_assignments_are_not_properties() {
    let tokens = Samples::load("tables/Sales.tmdl").tokenize();
    let assignment = line(&tokens, "Source = #\"Sales Query\",");
    assert_eq!(assignment.token_type, TokenType::ExpressionContent);
    assert_eq!(line(&tokens, "in").token_type, TokenType::ExpressionContent);
    assert_eq!(
        line(&tokens, "annotation PBI_ResultType = Table").token_type,
        TokenType::Annotation
    );
}

#[test]
fn test_json_blob_closes_at_nested_property() {
    let tokens = Samples::load("cultures/en-US.tmdl").tokenize();
    assert_eq!(line(&tokens, "{").token_type, TokenType::ExpressionContent);
    assert_eq!(line(&tokens, "\"Version\": \"1.0.0\",").token_type, TokenType::ExpressionContent);
    let content_type = line(&tokens, "contentType: json");
    assert_eq!(content_type.token_type, TokenType::Property);
    assert_eq!(content_type.value.as_deref(), Some("json"));
}

#[test]
fn test_format_string_expression_block_in_calculation_item() {
    let tokens = Samples::load("tables/Time Intelligence.tmdl").tokenize();
    let opener = line(&tokens, "formatStringExpression =");
    assert_eq!(opener.token_type, TokenType::Property);
    assert_eq!(line(&tokens, "SELECTEDMEASUREFORMATSTRING()").token_type, TokenType::ExpressionContent);
    // the calculation group's first column closes the block three levels up
    let column = line(&tokens, "column Period");
    assert_eq!(column.token_type, TokenType::Column);
    assert_eq!(column.indent, 2);
}

#[test]
fn test_doc_comments_and_refs_in_model() {
    let tokens = Samples::load("model.tmdl").tokenize();
    assert_eq!(tokens[0].token_type, TokenType::DocComment);
    assert_eq!(tokens[0].value.as_deref(), Some("Sales reporting model"));
    let reference = line(&tokens, "ref table 'Time Intelligence'");
    assert_eq!(reference.token_type, TokenType::Ref);
    assert_eq!(reference.value.as_deref(), Some("table"));
    assert_eq!(reference.name.as_deref(), Some("Time Intelligence"));
    assert_eq!(line(&tokens, "legacyRedirects").token_type, TokenType::BooleanFlag);
}

#[test]
fn test_expression_with_meta_stays_inline() {
    let tokens = Samples::load("expressions.tmdl").tokenize();
    let server = &tokens[0];
    assert_eq!(server.token_type, TokenType::Expression);
    assert_eq!(server.name.as_deref(), Some("Server"));
    assert!(server.value_str().starts_with("\"sql.contoso.com\" meta ["));
    assert_eq!(tokens[1].token_type, TokenType::Property);
}
