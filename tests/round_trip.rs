//! Round-trip equivalence and idempotence over the sample project

use rstest::rstest;
use tmdl::tmdl::ast::{
    CalculationGroup, CalculationItem, Column, Expression, Measure, Partition, PartitionSource,
    Relationship, Role, Table, TmdlFile,
};
use tmdl::tmdl::formats::{serialize, SerializeOptions};
use tmdl::tmdl::parsing::{parse_source, FileKind};
use tmdl::tmdl::pipeline::{check_round_trip, round_trip};
use tmdl::tmdl::testing::Samples;

#[rstest]
#[case::database("database.tmdl")]
#[case::model("model.tmdl")]
#[case::relationships("relationships.tmdl")]
#[case::expressions("expressions.tmdl")]
#[case::sales("tables/Sales.tmdl")]
#[case::products("tables/Products.tmdl")]
#[case::date("tables/Date.tmdl")]
#[case::calculation_group("tables/Time Intelligence.tmdl")]
#[case::culture("cultures/en-US.tmdl")]
#[case::role("roles/Regional Managers.tmdl")]
fn test_sample_round_trips(#[case] name: &str) {
    let sample = Samples::load(name);
    let result = check_round_trip(&sample.source(), sample.kind(), &SerializeOptions::default(), true)
        .unwrap_or_else(|e| panic!("{}: {}", name, e));
    assert!(result.is_equivalent());
    assert!(result.is_idempotent());
}

#[rstest]
#[case::sales("tables/Sales.tmdl")]
#[case::calculation_group("tables/Time Intelligence.tmdl")]
#[case::role("roles/Regional Managers.tmdl")]
fn test_round_trip_without_blank_lines(#[case] name: &str) {
    let sample = Samples::load(name);
    let options = SerializeOptions {
        blank_line_between_children: false,
    };
    let result = round_trip(&sample.source(), sample.kind(), &options);
    assert!(result.is_equivalent(), "{}", name);
    assert!(result.is_idempotent(), "{}", name);
    assert!(!result.serialized.contains("\n\n\t"), "{}", name);
}

#[test]
fn test_inactive_relationship_is_written_only_when_false() {
    let active = Relationship {
        name: "r1".to_string(),
        from_table: "Sales".to_string(),
        from_column: "ProductKey".to_string(),
        to_table: "Products".to_string(),
        to_column: "ProductKey".to_string(),
        ..Default::default()
    };
    let text = serialize(&TmdlFile::Relationships(vec![active.clone()]));
    assert!(!text.contains("isActive"));
    assert!(text.contains("\tfromColumn: Sales.ProductKey\n"));

    let inactive = Relationship {
        is_active: false,
        ..active
    };
    let text = serialize(&TmdlFile::Relationships(vec![inactive.clone()]));
    assert!(text.contains("\tisActive: false\n"));

    let reparsed = parse_source(&text, FileKind::Relationships).file;
    assert_eq!(reparsed, TmdlFile::Relationships(vec![inactive]));
}

#[test]
fn test_quoted_table_names_survive_column_refs() {
    let relationship = Relationship {
        name: "r".to_string(),
        from_table: "Sales Order".to_string(),
        from_column: "Key".to_string(),
        to_table: "O'Brien".to_string(),
        to_column: "Key".to_string(),
        ..Default::default()
    };
    let file = TmdlFile::Relationships(vec![relationship]);
    let text = serialize(&file);
    assert!(text.contains("fromColumn: 'Sales Order'.Key"));
    assert_eq!(parse_source(&text, FileKind::Relationships).file, file);
}

#[test]
fn test_built_table_round_trips() {
    let mut table = Table::new("Sales Summary");
    table.is_hidden = true;
    let mut measure = Measure::new("Margin %", "VAR m = [Margin]\n\nRETURN\n\tDIVIDE(m, [Sales])");
    measure.doc = Some("Margin over sales\nas a ratio".to_string());
    measure.format_string = Some("0.0%".to_string());
    table.measures.push(measure);
    let mut column = Column::new("Key");
    column.data_type = Some("int64".to_string());
    column.is_key = true;
    column.is_available_in_mdx = Some(false);
    table.columns.push(column);
    table.partitions.push(Partition {
        name: "p".to_string(),
        mode: Some("import".to_string()),
        source: PartitionSource::MCode {
            expression: "let\n\tSource = 1\nin\n\tSource".to_string(),
        },
        ..Default::default()
    });
    table.partitions.push(Partition {
        name: "e".to_string(),
        ..Default::default()
    });
    table.calculation_group = Some(CalculationGroup {
        precedence: Some(1),
        items: vec![CalculationItem {
            format_string_expression: Some("\"#,0\"".to_string()),
            ..CalculationItem::new("Plain", "SELECTEDMEASURE()")
        }],
        ..Default::default()
    });

    let file = TmdlFile::Table(table);
    let text = serialize(&file);
    assert!(text.starts_with("table 'Sales Summary'\n\tisHidden\n"));
    assert!(text.contains("\t/// Margin over sales\n\t/// as a ratio\n\tmeasure 'Margin %' =\n"));
    assert!(text.contains("\t\tisAvailableInMdx: false\n"));

    let reparsed = parse_source(&text, FileKind::Table);
    assert!(reparsed.is_clean());
    assert_eq!(reparsed.file, file);
    assert_eq!(serialize(&reparsed.file), text);
}

#[test]
fn test_empty_table_round_trips() {
    let file = TmdlFile::Table(Table::new("Empty"));
    let text = serialize(&file);
    assert_eq!(text, "table Empty\n");
    assert_eq!(parse_source(&text, FileKind::Table).file, file);
}

#[test]
fn test_built_expression_equals_its_reparse() {
    let file = TmdlFile::Expressions(vec![Expression::new(
        "Q",
        "let\n    x = 1\nin\n    x\ntype table",
    )]);
    let text = serialize(&file);
    let reparsed = parse_source(&text, FileKind::Expressions);
    assert!(reparsed.is_clean());
    assert_eq!(reparsed.file, file);
}

#[test]
fn test_synthesized_default_survives_the_check() {
    let result = check_round_trip("", FileKind::Role, &SerializeOptions::default(), false)
        .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(result.original, TmdlFile::Role(Role::default()));
    assert!(result.is_equivalent());
}

#[test]
fn test_comment_lines_stay_in_multiline_bodies() {
    let mut table = Table::new("T");
    table
        .measures
        .push(Measure::new("M", "SUM(x)\n/// running total\n+ 1"));
    table.measures.push(Measure::new("N", "1"));
    let file = TmdlFile::Table(table);

    let text = serialize(&file);
    assert!(text.contains("\tmeasure M =\n\t\tSUM(x)\n\t\t/// running total\n\t\t+ 1\n"));
    let reparsed = parse_source(&text, FileKind::Table);
    assert!(reparsed.is_clean());
    assert_eq!(reparsed.file, file);
}

#[test]
fn test_dotted_column_without_table_round_trips() {
    let relationship = Relationship {
        name: "r".to_string(),
        from_column: "a.b".to_string(),
        to_table: "Products".to_string(),
        to_column: "Key".to_string(),
        ..Default::default()
    };
    let file = TmdlFile::Relationships(vec![relationship]);
    let text = serialize(&file);
    assert!(text.contains("\tfromColumn: 'a.b'\n"));
    assert_eq!(parse_source(&text, FileKind::Relationships).file, file);
}
