//! Per-kind element writers
//!
//! Each writer emits its declaration at `level` and its body below it. Property order
//! here is the canonical order of the output.

use super::writer::Writer;
use crate::tmdl::ast::elements::relationship::join_column_ref;
use crate::tmdl::ast::{
    Annotation, CalculationGroup, CalculationItem, ChangedProperty, Column, Culture, Database,
    Expression, Hierarchy, HierarchyLevel, Measure, Model, ModelReference, Partition,
    PartitionSource, QueryGroup, Relationship, Role, RoleMember, Table, TablePermission,
};
use crate::tmdl::lexing::names::quote_name;

fn head(keyword: &str, name: &str) -> String {
    format!("{} {}", keyword, quote_name(name))
}

fn annotations(w: &mut Writer, list: &[Annotation], level: usize) {
    for annotation in list {
        w.gap();
        w.doc(level, annotation.doc.as_deref());
        w.declaration_expression(level, &head("annotation", &annotation.name), &annotation.value);
    }
}

fn changed_properties(w: &mut Writer, list: &[ChangedProperty], level: usize) {
    for changed in list {
        w.doc(level, changed.doc.as_deref());
        w.line(level, &format!("changedProperty = {}", quote_name(&changed.name)));
    }
}

pub fn database(w: &mut Writer, node: &Database) {
    w.doc(0, node.doc.as_deref());
    w.line(0, &head("database", &node.name));
    let compatibility_level = node.compatibility_level.map(|l| l.to_string());
    w.property(1, "compatibilityLevel", compatibility_level.as_deref());
    annotations(w, &node.annotations, 1);
}

/// The model block, then its query groups, annotations and references at top level.
pub fn model_file(w: &mut Writer, node: &Model) {
    w.doc(0, node.doc.as_deref());
    w.line(0, &head("model", &node.name));
    w.property(1, "culture", node.culture.as_deref());
    w.property(
        1,
        "defaultPowerBIDataSourceVersion",
        node.default_power_bi_data_source_version.as_deref(),
    );
    w.property(1, "sourceQueryCulture", node.source_query_culture.as_deref());
    w.flag(1, "discourageImplicitMeasures", node.discourage_implicit_measures);
    if !node.data_access_options.is_empty() {
        w.gap();
        w.line(1, "dataAccessOptions");
        for (key, value) in &node.data_access_options {
            w.option(2, key, value);
        }
    }

    for group in &node.query_groups {
        w.gap();
        query_group(w, group, 0);
    }
    annotations(w, &node.annotations, 0);
    if !node.references.is_empty() {
        w.gap();
        for reference in &node.references {
            model_reference(w, reference, 0);
        }
    }
}

fn query_group(w: &mut Writer, node: &QueryGroup, level: usize) {
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("queryGroup", &node.name));
    annotations(w, &node.annotations, level + 1);
}

fn model_reference(w: &mut Writer, node: &ModelReference, level: usize) {
    w.doc(level, node.doc.as_deref());
    w.line(level, &format!("ref {} {}", node.kind, quote_name(&node.name)));
}

pub fn table(w: &mut Writer, node: &Table, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("table", &node.name));
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "dataCategory", node.data_category.as_deref());
    w.property(body, "description", node.description.as_deref());
    w.flag(body, "isHidden", node.is_hidden);
    w.flag(body, "isPrivate", node.is_private);
    changed_properties(w, &node.changed_properties, body);

    if let Some(group) = &node.calculation_group {
        w.gap();
        calculation_group(w, group, body);
    }
    for measure_node in &node.measures {
        w.gap();
        measure(w, measure_node, body);
    }
    for column_node in &node.columns {
        w.gap();
        column(w, column_node, body);
    }
    for hierarchy_node in &node.hierarchies {
        w.gap();
        hierarchy(w, hierarchy_node, body);
    }
    for partition_node in &node.partitions {
        w.gap();
        partition(w, partition_node, body);
    }
    annotations(w, &node.annotations, body);
}

pub fn column(w: &mut Writer, node: &Column, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    let head = head("column", &node.name);
    match &node.expression {
        Some(expression) => w.declaration_expression(level, &head, expression),
        None => w.line(level, &head),
    }
    w.property(body, "dataType", node.data_type.as_deref());
    w.property(body, "formatString", node.format_string.as_deref());
    w.property(body, "displayFolder", node.display_folder.as_deref());
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "summarizeBy", node.summarize_by.as_deref());
    w.property(body, "sourceColumn", node.source_column.as_deref());
    w.property(body, "sortByColumn", node.sort_by_column.as_deref());
    w.property(body, "dataCategory", node.data_category.as_deref());
    w.property(body, "description", node.description.as_deref());
    w.flag(body, "isKey", node.is_key);
    w.flag(body, "isHidden", node.is_hidden);
    w.flag(body, "isUnique", node.is_unique);
    w.flag(body, "isNameInferred", node.is_name_inferred);
    w.flag(body, "isDataTypeInferred", node.is_data_type_inferred);
    let mdx = node.is_available_in_mdx.map(|b| b.to_string());
    w.property(body, "isAvailableInMdx", mdx.as_deref());
    changed_properties(w, &node.changed_properties, body);
    annotations(w, &node.annotations, body);
}

pub fn measure(w: &mut Writer, node: &Measure, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.declaration_expression(level, &head("measure", &node.name), &node.expression);
    w.property(body, "formatString", node.format_string.as_deref());
    w.property_expression(
        body,
        "formatStringExpression",
        node.format_string_expression.as_deref(),
    );
    w.property(body, "displayFolder", node.display_folder.as_deref());
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "description", node.description.as_deref());
    w.flag(body, "isHidden", node.is_hidden);
    changed_properties(w, &node.changed_properties, body);
    annotations(w, &node.annotations, body);
}

fn hierarchy(w: &mut Writer, node: &Hierarchy, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("hierarchy", &node.name));
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "displayFolder", node.display_folder.as_deref());
    w.flag(body, "isHidden", node.is_hidden);
    for (position, level_node) in node.levels.iter().enumerate() {
        w.gap();
        hierarchy_level(w, level_node, position, body);
    }
    annotations(w, &node.annotations, body);
}

/// The ordinal is implied by position and only written when it differs.
fn hierarchy_level(w: &mut Writer, node: &HierarchyLevel, position: usize, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("level", &node.name));
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "column", node.column.as_deref());
    if node.ordinal != position {
        w.property(body, "ordinal", Some(&node.ordinal.to_string()));
    }
    annotations(w, &node.annotations, body);
}

fn partition(w: &mut Writer, node: &Partition, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(
        level,
        &format!(
            "{} = {}",
            head("partition", &node.name),
            node.source.type_keyword()
        ),
    );
    w.property(body, "mode", node.mode.as_deref());
    w.property(body, "queryGroup", node.query_group.as_deref());
    match &node.source {
        PartitionSource::MCode { expression } | PartitionSource::Calculated { expression } => {
            w.gap();
            w.property_expression(body, "source", Some(expression));
        }
        PartitionSource::Entity {
            entity_name,
            expression_source,
            schema_name,
        } => {
            if entity_name.is_some() || expression_source.is_some() || schema_name.is_some() {
                w.gap();
                w.line(body, "source");
                w.property(body + 1, "entityName", entity_name.as_deref());
                w.property(body + 1, "expressionSource", expression_source.as_deref());
                w.property(body + 1, "schemaName", schema_name.as_deref());
            }
        }
    }
    annotations(w, &node.annotations, body);
}

fn calculation_group(w: &mut Writer, node: &CalculationGroup, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(level, "calculationGroup");
    let precedence = node.precedence.map(|p| p.to_string());
    w.property(body, "precedence", precedence.as_deref());
    w.property(body, "description", node.description.as_deref());
    for item in &node.items {
        w.gap();
        calculation_item(w, item, body);
    }
    for column_node in &node.columns {
        w.gap();
        column(w, column_node, body);
    }
    annotations(w, &node.annotations, body);
}

fn calculation_item(w: &mut Writer, node: &CalculationItem, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.declaration_expression(level, &head("calculationItem", &node.name), &node.expression);
    let ordinal = node.ordinal.map(|o| o.to_string());
    w.property(body, "ordinal", ordinal.as_deref());
    w.property(body, "description", node.description.as_deref());
    w.property_expression(
        body,
        "formatStringExpression",
        node.format_string_expression.as_deref(),
    );
}

pub fn relationship(w: &mut Writer, node: &Relationship, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("relationship", &node.name));
    if !node.is_active {
        w.line(body, "isActive: false");
    }
    w.flag(
        body,
        "relyOnReferentialIntegrity",
        node.rely_on_referential_integrity,
    );
    w.property(body, "fromCardinality", node.from_cardinality.as_deref());
    w.property(body, "toCardinality", node.to_cardinality.as_deref());
    w.property(
        body,
        "crossFilteringBehavior",
        node.cross_filtering_behavior.as_deref(),
    );
    w.property(
        body,
        "securityFilteringBehavior",
        node.security_filtering_behavior.as_deref(),
    );
    w.property(body, "joinOnDateBehavior", node.join_on_date_behavior.as_deref());
    let from = join_column_ref(&node.from_table, &node.from_column);
    let to = join_column_ref(&node.to_table, &node.to_column);
    w.property(body, "fromColumn", Some(&from));
    w.property(body, "toColumn", Some(&to));
    annotations(w, &node.annotations, body);
}

pub fn expression(w: &mut Writer, node: &Expression, level: usize) {
    let body = level + 1;
    w.doc(level, node.doc.as_deref());
    w.declaration_expression(level, &head("expression", &node.name), &node.expression);
    w.property(body, "lineageTag", node.lineage_tag.as_deref());
    w.property(body, "queryGroup", node.query_group.as_deref());
    w.property(body, "description", node.description.as_deref());
    annotations(w, &node.annotations, body);
}

pub fn culture(w: &mut Writer, node: &Culture) {
    w.doc(0, node.doc.as_deref());
    w.line(0, &head("cultureInfo", &node.name));
    if node.linguistic_metadata.is_some() {
        w.gap();
    }
    w.property_expression(1, "linguisticMetadata", node.linguistic_metadata.as_deref());
    w.property(1, "contentType", node.content_type.as_deref());
    annotations(w, &node.annotations, 1);
}

pub fn role(w: &mut Writer, node: &Role) {
    w.doc(0, node.doc.as_deref());
    w.line(0, &head("role", &node.name));
    w.property(1, "modelPermission", node.model_permission.as_deref());
    w.property(1, "description", node.description.as_deref());
    for member in &node.members {
        w.gap();
        role_member(w, member, 1);
    }
    for permission in &node.table_permissions {
        w.gap();
        table_permission(w, permission, 1);
    }
    annotations(w, &node.annotations, 1);
}

fn role_member(w: &mut Writer, node: &RoleMember, level: usize) {
    w.doc(level, node.doc.as_deref());
    w.line(level, &head("member", &node.name));
    w.property(level + 1, "identityProvider", node.identity_provider.as_deref());
}

fn table_permission(w: &mut Writer, node: &TablePermission, level: usize) {
    w.doc(level, node.doc.as_deref());
    w.declaration_expression(
        level,
        &head("tablePermission", &node.table),
        &node.filter_expression,
    );
}
