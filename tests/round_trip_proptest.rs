//! Property-based round-trip tests
//!
//! Generated names and expressions must come back unchanged through
//! serialize -> tokenize -> parse, and arbitrary input must never make the lexer or
//! parser panic.

use proptest::prelude::*;
use tmdl::tmdl::ast::{Annotation, Measure, Table, TmdlFile};
use tmdl::tmdl::formats::serialize;
use tmdl::tmdl::lexing::keywords::is_known_keyword;
use tmdl::tmdl::lexing::line_classification::first_word;
use tmdl::tmdl::lexing::{quote_name, tokenize, unquote_name};
use tmdl::tmdl::parsing::{parse, parse_source, FileKind};
use tmdl::tmdl::token::detokenize;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _%.'-]{0,20}"
}

/// Normalized expression text: no edge blank lines, no trailing whitespace, first
/// line flush left. Lines may be DAX/M comments (`/// ...`) or start in lower case;
/// only a line led by a tmdl keyword is excluded, since at the body's depth it closes
/// the block by definition.
fn expression_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        "[A-Z][A-Za-z0-9()+, ]{0,24}",
        "[a-z][A-Za-z0-9()+, ]{0,24}",
        "/// [A-Za-z0-9 ]{0,20}",
    ]
    .prop_map(|text| text.trim_end().to_string())
    .prop_filter("keyword-led line", |text| !is_known_keyword(first_word(text)));

    prop::collection::vec((0..3usize, line), 1..5).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (tabs, text))| {
                let tabs = if i == 0 { 0 } else { tabs };
                format!("{}{}", "\t".repeat(tabs), text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #[test]
    fn test_name_quoting_round_trips(name in name_strategy()) {
        prop_assert_eq!(unquote_name(&quote_name(&name)), name);
    }

    #[test]
    fn test_table_round_trips(
        table_name in name_strategy(),
        measures in prop::collection::vec((name_strategy(), expression_strategy()), 0..4),
        annotation in expression_strategy(),
    ) {
        let mut table = Table::new(table_name);
        for (name, expression) in measures {
            table.measures.push(Measure::new(name, expression));
        }
        table.annotations.push(Annotation::new("Note", annotation));
        let file = TmdlFile::Table(table);

        let text = serialize(&file);
        let reparsed = parse_source(&text, FileKind::Table);
        prop_assert!(reparsed.is_clean());
        prop_assert_eq!(&reparsed.file, &file);
        prop_assert_eq!(serialize(&reparsed.file), text);
    }

    #[test]
    fn test_tokenize_never_panics(input in "\\PC*") {
        let tokens = tokenize(&input);
        prop_assert!(tokens.len() >= input.lines().count());
    }

    #[test]
    fn test_parse_never_panics(input in "([\\t]{0,3}[a-zA-Z'= :`/]{0,20}\n){0,12}") {
        let tokens = tokenize(&input);
        for kind in FileKind::ALL {
            let _ = parse(&tokens, kind);
        }
        prop_assert_eq!(detokenize(&tokens), input);
    }
}
