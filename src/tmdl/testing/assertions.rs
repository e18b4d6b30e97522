//! Fluent assertions over parsed trees
//!
//! Every assertion carries a context path (`table[Sales]:measure[Total]`) that prefixes
//! its failure message, so a failing check deep in a nested closure still says where it
//! looked.

use super::matchers::TextMatch;
use crate::tmdl::ast::elements::common::annotation_value;
use crate::tmdl::ast::{
    Annotation, CalculationGroup, CalculationItem, Column, Culture, Database, Expression,
    Hierarchy, Measure, Model, Partition, Relationship, Role, Table, TmdlFile,
};

/// Start a fluent assertion over a parsed file.
pub fn assert_tree(file: &TmdlFile) -> FileAssertion<'_> {
    FileAssertion {
        file,
        context: "file".to_string(),
    }
}

fn found<'a, T>(item: Option<&'a T>, what: &str, name: &str, context: &str, known: Vec<&str>) -> &'a T {
    match item {
        Some(item) => item,
        None => panic!(
            "{}: Expected a {} named '{}', found [{}]",
            context,
            what,
            name,
            known.join(", ")
        ),
    }
}

fn check_count(actual: usize, expected: usize, what: &str, context: &str) {
    assert_eq!(
        actual, expected,
        "{}: Expected {} {}, found {}",
        context, expected, what, actual
    );
}

fn check_flag(actual: bool, expected: bool, what: &str, context: &str) {
    assert_eq!(
        actual, expected,
        "{}: Expected {} to be {}, but it is {}",
        context, what, expected, actual
    );
}

fn check_annotation(list: &[Annotation], name: &str, expected: &str, context: &str) {
    let ctx = format!("{}:annotation[{}]", context, name);
    TextMatch::Exact(expected.to_string()).assert_some(annotation_value(list, name), &ctx);
}

// ============================================================================
// File
// ============================================================================

pub struct FileAssertion<'a> {
    file: &'a TmdlFile,
    context: String,
}

impl<'a> FileAssertion<'a> {
    pub fn table<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TableAssertion<'a>),
    {
        let Some(table) = self.file.as_table() else {
            panic!("{}: Expected a table file, got {:?}", self.context, self.file);
        };
        assertion(TableAssertion {
            context: format!("table[{}]", table.name),
            table,
        });
        self
    }

    pub fn model<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ModelAssertion<'a>),
    {
        let Some(model) = self.file.as_model() else {
            panic!("{}: Expected a model file, got {:?}", self.context, self.file);
        };
        assertion(ModelAssertion {
            context: format!("model[{}]", model.name),
            model,
        });
        self
    }

    pub fn database<F>(self, assertion: F) -> Self
    where
        F: FnOnce(DatabaseAssertion<'a>),
    {
        let Some(database) = self.file.as_database() else {
            panic!("{}: Expected a database file, got {:?}", self.context, self.file);
        };
        assertion(DatabaseAssertion {
            context: format!("database[{}]", database.name),
            database,
        });
        self
    }

    pub fn culture<F>(self, assertion: F) -> Self
    where
        F: FnOnce(CultureAssertion<'a>),
    {
        let Some(culture) = self.file.as_culture() else {
            panic!("{}: Expected a culture file, got {:?}", self.context, self.file);
        };
        assertion(CultureAssertion {
            context: format!("cultureInfo[{}]", culture.name),
            culture,
        });
        self
    }

    pub fn role<F>(self, assertion: F) -> Self
    where
        F: FnOnce(RoleAssertion<'a>),
    {
        let Some(role) = self.file.as_role() else {
            panic!("{}: Expected a role file, got {:?}", self.context, self.file);
        };
        assertion(RoleAssertion {
            context: format!("role[{}]", role.name),
            role,
        });
        self
    }

    pub fn relationship_count(self, expected: usize) -> Self {
        let actual = self.relationships().len();
        check_count(actual, expected, "relationships", &self.context);
        self
    }

    pub fn relationship<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(RelationshipAssertion<'a>),
    {
        let list = self.relationships();
        let relationship = found(
            list.iter().find(|r| r.name == name),
            "relationship",
            name,
            &self.context,
            list.iter().map(|r| r.name.as_str()).collect(),
        );
        assertion(RelationshipAssertion {
            context: format!("relationship[{}]", name),
            relationship,
        });
        self
    }

    pub fn expression_count(self, expected: usize) -> Self {
        let actual = self.expressions().len();
        check_count(actual, expected, "expressions", &self.context);
        self
    }

    pub fn expression<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let list = self.expressions();
        let expression = found(
            list.iter().find(|e| e.name == name),
            "expression",
            name,
            &self.context,
            list.iter().map(|e| e.name.as_str()).collect(),
        );
        assertion(ExpressionAssertion {
            context: format!("expression[{}]", name),
            expression,
        });
        self
    }

    fn relationships(&self) -> &'a [Relationship] {
        match self.file.as_relationships() {
            Some(list) => list,
            None => panic!("{}: Expected a relationships file, got {:?}", self.context, self.file),
        }
    }

    fn expressions(&self) -> &'a [Expression] {
        match self.file.as_expressions() {
            Some(list) => list,
            None => panic!("{}: Expected an expressions file, got {:?}", self.context, self.file),
        }
    }
}

// ============================================================================
// Database and model
// ============================================================================

pub struct DatabaseAssertion<'a> {
    database: &'a Database,
    context: String,
}

impl<'a> DatabaseAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.database.name, &self.context);
        self
    }

    pub fn compatibility_level(self, expected: i64) -> Self {
        assert_eq!(
            self.database.compatibility_level,
            Some(expected),
            "{}: Expected compatibilityLevel {}",
            self.context,
            expected
        );
        self
    }
}

pub struct ModelAssertion<'a> {
    model: &'a Model,
    context: String,
}

impl<'a> ModelAssertion<'a> {
    pub fn culture(self, expected: &str) -> Self {
        let ctx = format!("{}:culture", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.model.culture.as_deref(), &ctx);
        self
    }

    pub fn discourages_implicit_measures(self, expected: bool) -> Self {
        check_flag(
            self.model.discourage_implicit_measures,
            expected,
            "discourageImplicitMeasures",
            &self.context,
        );
        self
    }

    pub fn table_refs(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.model.table_refs().collect();
        assert_eq!(
            actual, expected,
            "{}: Expected table refs {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn query_groups(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.model.query_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected query groups {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn data_access_option(self, key: &str, expected: &str) -> Self {
        let ctx = format!("{}:dataAccessOptions[{}]", self.context, key);
        let actual = self.model.data_access_options.get(key).map(String::as_str);
        TextMatch::Exact(expected.to_string()).assert_some(actual, &ctx);
        self
    }

    pub fn annotation(self, name: &str, expected: &str) -> Self {
        check_annotation(&self.model.annotations, name, expected, &self.context);
        self
    }
}

// ============================================================================
// Table and its children
// ============================================================================

pub struct TableAssertion<'a> {
    table: &'a Table,
    context: String,
}

impl<'a> TableAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.table.name, &self.context);
        self
    }

    pub fn lineage_tag(self, expected: &str) -> Self {
        let ctx = format!("{}:lineageTag", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.table.lineage_tag.as_deref(), &ctx);
        self
    }

    pub fn is_hidden(self, expected: bool) -> Self {
        check_flag(self.table.is_hidden, expected, "isHidden", &self.context);
        self
    }

    pub fn measure_count(self, expected: usize) -> Self {
        check_count(self.table.measures.len(), expected, "measures", &self.context);
        self
    }

    pub fn column_count(self, expected: usize) -> Self {
        check_count(self.table.columns.len(), expected, "columns", &self.context);
        self
    }

    pub fn partition_count(self, expected: usize) -> Self {
        check_count(self.table.partitions.len(), expected, "partitions", &self.context);
        self
    }

    /// Names of the measures, in declaration order.
    pub fn measure_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.table.measures.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected measures {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    /// Names of the columns, in declaration order.
    pub fn column_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected columns {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn measure<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(MeasureAssertion<'a>),
    {
        let measure = found(
            self.table.measure(name),
            "measure",
            name,
            &self.context,
            self.table.measures.iter().map(|m| m.name.as_str()).collect(),
        );
        assertion(MeasureAssertion {
            context: format!("{}:measure[{}]", self.context, name),
            measure,
        });
        self
    }

    pub fn column<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ColumnAssertion<'a>),
    {
        let column = found(
            self.table.column(name),
            "column",
            name,
            &self.context,
            self.table.columns.iter().map(|c| c.name.as_str()).collect(),
        );
        assertion(ColumnAssertion {
            context: format!("{}:column[{}]", self.context, name),
            column,
        });
        self
    }

    pub fn hierarchy<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(HierarchyAssertion<'a>),
    {
        let hierarchy = found(
            self.table.hierarchy(name),
            "hierarchy",
            name,
            &self.context,
            self.table.hierarchies.iter().map(|h| h.name.as_str()).collect(),
        );
        assertion(HierarchyAssertion {
            context: format!("{}:hierarchy[{}]", self.context, name),
            hierarchy,
        });
        self
    }

    pub fn partition<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(PartitionAssertion<'a>),
    {
        let partition = found(
            self.table.partition(name),
            "partition",
            name,
            &self.context,
            self.table.partitions.iter().map(|p| p.name.as_str()).collect(),
        );
        assertion(PartitionAssertion {
            context: format!("{}:partition[{}]", self.context, name),
            partition,
        });
        self
    }

    pub fn calculation_group<F>(self, assertion: F) -> Self
    where
        F: FnOnce(CalculationGroupAssertion<'a>),
    {
        let Some(group) = self.table.calculation_group.as_ref() else {
            panic!("{}: Expected a calculation group", self.context);
        };
        assertion(CalculationGroupAssertion {
            context: format!("{}:calculationGroup", self.context),
            group,
        });
        self
    }

    pub fn annotation(self, name: &str, expected: &str) -> Self {
        check_annotation(&self.table.annotations, name, expected, &self.context);
        self
    }
}

pub struct MeasureAssertion<'a> {
    measure: &'a Measure,
    context: String,
}

impl<'a> MeasureAssertion<'a> {
    pub fn expression(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.measure.expression, &self.context);
        self
    }

    pub fn expression_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.measure.expression, &self.context);
        self
    }

    pub fn expression_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.measure.expression, &self.context);
        self
    }

    pub fn format_string(self, expected: &str) -> Self {
        let ctx = format!("{}:formatString", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.measure.format_string.as_deref(), &ctx);
        self
    }

    pub fn format_string_expression_contains(self, substring: &str) -> Self {
        let ctx = format!("{}:formatStringExpression", self.context);
        TextMatch::Contains(substring.to_string())
            .assert_some(self.measure.format_string_expression.as_deref(), &ctx);
        self
    }

    pub fn display_folder(self, expected: &str) -> Self {
        let ctx = format!("{}:displayFolder", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.measure.display_folder.as_deref(), &ctx);
        self
    }

    pub fn doc(self, expected: &str) -> Self {
        let ctx = format!("{}:doc", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.measure.doc.as_deref(), &ctx);
        self
    }

    pub fn is_hidden(self, expected: bool) -> Self {
        check_flag(self.measure.is_hidden, expected, "isHidden", &self.context);
        self
    }

    pub fn annotation(self, name: &str, expected: &str) -> Self {
        check_annotation(&self.measure.annotations, name, expected, &self.context);
        self
    }
}

pub struct ColumnAssertion<'a> {
    column: &'a Column,
    context: String,
}

impl<'a> ColumnAssertion<'a> {
    pub fn data_type(self, expected: &str) -> Self {
        let ctx = format!("{}:dataType", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.column.data_type.as_deref(), &ctx);
        self
    }

    pub fn source_column(self, expected: &str) -> Self {
        let ctx = format!("{}:sourceColumn", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.column.source_column.as_deref(), &ctx);
        self
    }

    pub fn summarize_by(self, expected: &str) -> Self {
        let ctx = format!("{}:summarizeBy", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.column.summarize_by.as_deref(), &ctx);
        self
    }

    pub fn is_key(self, expected: bool) -> Self {
        check_flag(self.column.is_key, expected, "isKey", &self.context);
        self
    }

    pub fn is_hidden(self, expected: bool) -> Self {
        check_flag(self.column.is_hidden, expected, "isHidden", &self.context);
        self
    }

    pub fn is_calculated(self, expected: bool) -> Self {
        check_flag(self.column.is_calculated(), expected, "calculated", &self.context);
        self
    }

    pub fn expression_contains(self, substring: &str) -> Self {
        let ctx = format!("{}:expression", self.context);
        TextMatch::Contains(substring.to_string()).assert_some(self.column.expression.as_deref(), &ctx);
        self
    }

    pub fn annotation(self, name: &str, expected: &str) -> Self {
        check_annotation(&self.column.annotations, name, expected, &self.context);
        self
    }
}

pub struct HierarchyAssertion<'a> {
    hierarchy: &'a Hierarchy,
    context: String,
}

impl<'a> HierarchyAssertion<'a> {
    pub fn level_count(self, expected: usize) -> Self {
        check_count(self.hierarchy.levels.len(), expected, "levels", &self.context);
        self
    }

    /// Check the level at `index`: its name, ordinal and source column.
    pub fn level(self, index: usize, name: &str, column: &str) -> Self {
        let levels = &self.hierarchy.levels;
        assert!(
            index < levels.len(),
            "{}: Level index {} out of bounds (hierarchy has {} levels)",
            self.context,
            index,
            levels.len()
        );
        let level = &levels[index];
        let ctx = format!("{}:levels[{}]", self.context, index);
        TextMatch::Exact(name.to_string()).assert(&level.name, &ctx);
        TextMatch::Exact(column.to_string()).assert_some(level.column.as_deref(), &ctx);
        assert_eq!(level.ordinal, index, "{}: Expected ordinal {}", ctx, index);
        self
    }
}

pub struct PartitionAssertion<'a> {
    partition: &'a Partition,
    context: String,
}

impl<'a> PartitionAssertion<'a> {
    /// `m`, `calculated` or `entity`
    pub fn source_type(self, expected: &str) -> Self {
        let ctx = format!("{}:type", self.context);
        TextMatch::Exact(expected.to_string()).assert(self.partition.source.type_keyword(), &ctx);
        self
    }

    pub fn mode(self, expected: &str) -> Self {
        let ctx = format!("{}:mode", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.partition.mode.as_deref(), &ctx);
        self
    }

    pub fn source_starts_with(self, prefix: &str) -> Self {
        let ctx = format!("{}:source", self.context);
        TextMatch::StartsWith(prefix.to_string()).assert_some(self.partition.source.expression(), &ctx);
        self
    }

    pub fn source_contains(self, substring: &str) -> Self {
        let ctx = format!("{}:source", self.context);
        TextMatch::Contains(substring.to_string()).assert_some(self.partition.source.expression(), &ctx);
        self
    }
}

pub struct CalculationGroupAssertion<'a> {
    group: &'a CalculationGroup,
    context: String,
}

impl<'a> CalculationGroupAssertion<'a> {
    pub fn precedence(self, expected: i64) -> Self {
        assert_eq!(
            self.group.precedence,
            Some(expected),
            "{}: Expected precedence {}",
            self.context,
            expected
        );
        self
    }

    pub fn item_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.group.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected calculation items {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn item<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(CalculationItemAssertion<'a>),
    {
        let item = found(
            self.group.item(name),
            "calculation item",
            name,
            &self.context,
            self.group.items.iter().map(|i| i.name.as_str()).collect(),
        );
        assertion(CalculationItemAssertion {
            context: format!("{}:calculationItem[{}]", self.context, name),
            item,
        });
        self
    }
}

pub struct CalculationItemAssertion<'a> {
    item: &'a CalculationItem,
    context: String,
}

impl<'a> CalculationItemAssertion<'a> {
    pub fn expression(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.item.expression, &self.context);
        self
    }

    pub fn expression_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.item.expression, &self.context);
        self
    }

    pub fn ordinal(self, expected: i64) -> Self {
        assert_eq!(
            self.item.ordinal,
            Some(expected),
            "{}: Expected ordinal {}",
            self.context,
            expected
        );
        self
    }

    pub fn format_string_expression(self, expected: &str) -> Self {
        let ctx = format!("{}:formatStringExpression", self.context);
        TextMatch::Exact(expected.to_string())
            .assert_some(self.item.format_string_expression.as_deref(), &ctx);
        self
    }
}

// ============================================================================
// Relationships, expressions, cultures and roles
// ============================================================================

pub struct RelationshipAssertion<'a> {
    relationship: &'a Relationship,
    context: String,
}

impl<'a> RelationshipAssertion<'a> {
    pub fn from(self, table: &str, column: &str) -> Self {
        let r = self.relationship;
        assert_eq!(
            (r.from_table.as_str(), r.from_column.as_str()),
            (table, column),
            "{}: Unexpected from side",
            self.context
        );
        self
    }

    pub fn to(self, table: &str, column: &str) -> Self {
        let r = self.relationship;
        assert_eq!(
            (r.to_table.as_str(), r.to_column.as_str()),
            (table, column),
            "{}: Unexpected to side",
            self.context
        );
        self
    }

    pub fn is_active(self, expected: bool) -> Self {
        check_flag(self.relationship.is_active, expected, "isActive", &self.context);
        self
    }

    pub fn cross_filtering_behavior(self, expected: &str) -> Self {
        let ctx = format!("{}:crossFilteringBehavior", self.context);
        TextMatch::Exact(expected.to_string())
            .assert_some(self.relationship.cross_filtering_behavior.as_deref(), &ctx);
        self
    }
}

pub struct ExpressionAssertion<'a> {
    expression: &'a Expression,
    context: String,
}

impl<'a> ExpressionAssertion<'a> {
    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.expression.expression, &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.expression.expression, &self.context);
        self
    }

    pub fn is_parameter(self, expected: bool) -> Self {
        check_flag(self.expression.is_parameter(), expected, "a parameter", &self.context);
        self
    }

    pub fn meta(self, key: &str, expected: serde_json::Value) -> Self {
        assert_eq!(
            self.expression.meta.get(key),
            Some(&expected),
            "{}: Unexpected meta entry '{}' in {:?}",
            self.context,
            key,
            self.expression.meta
        );
        self
    }

    pub fn query_group(self, expected: &str) -> Self {
        let ctx = format!("{}:queryGroup", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.expression.query_group.as_deref(), &ctx);
        self
    }
}

pub struct CultureAssertion<'a> {
    culture: &'a Culture,
    context: String,
}

impl<'a> CultureAssertion<'a> {
    pub fn content_type(self, expected: &str) -> Self {
        let ctx = format!("{}:contentType", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.culture.content_type.as_deref(), &ctx);
        self
    }

    pub fn metadata_starts_with(self, prefix: &str) -> Self {
        let ctx = format!("{}:linguisticMetadata", self.context);
        TextMatch::StartsWith(prefix.to_string())
            .assert_some(self.culture.linguistic_metadata.as_deref(), &ctx);
        self
    }
}

pub struct RoleAssertion<'a> {
    role: &'a Role,
    context: String,
}

impl<'a> RoleAssertion<'a> {
    pub fn model_permission(self, expected: &str) -> Self {
        let ctx = format!("{}:modelPermission", self.context);
        TextMatch::Exact(expected.to_string()).assert_some(self.role.model_permission.as_deref(), &ctx);
        self
    }

    pub fn members(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.role.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected members {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn table_permission(self, table: &str, filter: TextMatch) -> Self {
        let permission = found(
            self.role.table_permissions.iter().find(|p| p.table == table),
            "table permission",
            table,
            &self.context,
            self.role.table_permissions.iter().map(|p| p.table.as_str()).collect(),
        );
        let ctx = format!("{}:tablePermission[{}]", self.context, table);
        filter.assert(&permission.filter_expression, &ctx);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdl::ast::Measure;

    fn sales() -> TmdlFile {
        let mut table = Table::new("Sales");
        let mut measure = Measure::new("Total", "SUM(Sales[Amount])");
        measure.format_string = Some("#,0".to_string());
        table.measures.push(measure);
        TmdlFile::Table(table)
    }

    #[test]
    fn test_fluent_table_checks() {
        assert_tree(&sales()).table(|t| {
            t.name("Sales")
                .measure_count(1)
                .measure("Total", |m| {
                    m.expression_starts_with("SUM(").format_string("#,0");
                });
        });
    }

    #[test]
    #[should_panic(expected = "table[Sales]: Expected a measure named 'Missing', found [Total]")]
    fn test_missing_child_names_the_candidates() {
        assert_tree(&sales()).table(|t| {
            t.measure("Missing", |_| {});
        });
    }

    #[test]
    #[should_panic(expected = "Expected a model file")]
    fn test_wrong_file_kind() {
        assert_tree(&sales()).model(|_| {});
    }
}
