//! Snapshot of the treeviz view of a parsed table

use tmdl::tmdl::formats::treeviz::to_treeviz_str;
use tmdl::tmdl::parsing::{parse_source, FileKind};

const SOURCE: &str = "table Sales
\tmeasure Total = SUM(Sales[Amount])
\t\tformatString: 0.00

\tcolumn Amount
\t\tdataType: double
\t\tisHidden

\tpartition Sales = m
\t\tmode: import
\t\tsource =
\t\t\t\tlet
\t\t\t\t\tSource = Sql.Database(\"srv\", \"db\")
\t\t\t\tin
\t\t\t\t\tSource
";

#[test]
fn test_table_treeviz() {
    let outcome = parse_source(SOURCE, FileKind::Table);
    assert!(outcome.warnings.is_empty());
    insta::assert_snapshot!(to_treeviz_str(&outcome.file), @r###"
    └─ Table: Sales
      ├─ Measure: Total {expression=SUM(Sales[Amount]), formatString=0.00}
      ├─ Column: Amount {dataType=double, isHidden=true}
      └─ Partition: Sales (m) {mode=import, source=let...}
    "###);
}
