//! AST Snapshot - a normalized intermediate representation of the tree
//!
//! A canonical, format-agnostic view of any tree, suitable for the inspection formats
//! (treeviz, json-like dumps). It records node type, label, the set scalar attributes
//! and children, so each output format only decides presentation.

use super::elements::PartitionSource;
use super::node::{NodeRef, TmdlFile};
use super::traits::truncate_label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of one node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g. "Table", "Measure")
    pub node_type: String,

    /// The primary label: the declared name in most cases
    pub label: String,

    /// Scalar fields that are set, keyed by their source keyword. Sorted for stable output.
    pub attributes: BTreeMap<String, String>,

    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Count of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Snapshot a whole file. Collections get a synthetic root node.
pub fn snapshot_file(file: &TmdlFile) -> AstSnapshot {
    match file {
        TmdlFile::Relationships(list) => AstSnapshot::new("Relationships", list.len().to_string())
            .with_children(file.roots().into_iter().map(snapshot_node).collect()),
        TmdlFile::Expressions(list) => AstSnapshot::new("Expressions", list.len().to_string())
            .with_children(file.roots().into_iter().map(snapshot_node).collect()),
        _ => file
            .roots()
            .into_iter()
            .next()
            .map(snapshot_node)
            .unwrap_or_else(|| AstSnapshot::new("Empty", "")),
    }
}

/// Snapshot a node and its subtree.
pub fn snapshot_node(node: NodeRef<'_>) -> AstSnapshot {
    let inner = node.as_node();
    let mut attrs = Attrs::default();
    if let Some(doc) = inner.doc() {
        attrs.text("doc", Some(doc));
    }

    match node {
        NodeRef::Database(n) => {
            attrs.text("compatibilityLevel", n.compatibility_level.map(|l| l.to_string()));
        }
        NodeRef::Model(n) => {
            attrs.text("culture", n.culture.as_deref());
            attrs.text(
                "defaultPowerBIDataSourceVersion",
                n.default_power_bi_data_source_version.as_deref(),
            );
            attrs.text("sourceQueryCulture", n.source_query_culture.as_deref());
            attrs.flag("discourageImplicitMeasures", n.discourage_implicit_measures);
            for (key, value) in &n.data_access_options {
                attrs.text(&format!("dataAccessOptions.{}", key), Some(value.as_str()));
            }
        }
        NodeRef::Table(n) => {
            attrs.text("lineageTag", n.lineage_tag.as_deref());
            attrs.text("dataCategory", n.data_category.as_deref());
            attrs.text("description", n.description.as_deref());
            attrs.flag("isHidden", n.is_hidden);
            attrs.flag("isPrivate", n.is_private);
        }
        NodeRef::Column(n) => {
            attrs.text("dataType", n.data_type.as_deref());
            attrs.expression("expression", n.expression.as_deref());
            attrs.text("formatString", n.format_string.as_deref());
            attrs.text("displayFolder", n.display_folder.as_deref());
            attrs.text("lineageTag", n.lineage_tag.as_deref());
            attrs.text("summarizeBy", n.summarize_by.as_deref());
            attrs.text("sourceColumn", n.source_column.as_deref());
            attrs.text("sortByColumn", n.sort_by_column.as_deref());
            attrs.text("dataCategory", n.data_category.as_deref());
            attrs.text("description", n.description.as_deref());
            attrs.flag("isKey", n.is_key);
            attrs.flag("isHidden", n.is_hidden);
            attrs.flag("isUnique", n.is_unique);
            attrs.flag("isNameInferred", n.is_name_inferred);
            attrs.flag("isDataTypeInferred", n.is_data_type_inferred);
            attrs.text("isAvailableInMdx", n.is_available_in_mdx.map(|b| b.to_string()));
        }
        NodeRef::Measure(n) => {
            attrs.expression("expression", Some(&n.expression));
            attrs.text("formatString", n.format_string.as_deref());
            attrs.expression("formatStringExpression", n.format_string_expression.as_deref());
            attrs.text("displayFolder", n.display_folder.as_deref());
            attrs.text("lineageTag", n.lineage_tag.as_deref());
            attrs.text("description", n.description.as_deref());
            attrs.flag("isHidden", n.is_hidden);
        }
        NodeRef::Hierarchy(n) => {
            attrs.text("lineageTag", n.lineage_tag.as_deref());
            attrs.text("displayFolder", n.display_folder.as_deref());
            attrs.flag("isHidden", n.is_hidden);
        }
        NodeRef::Level(n) => {
            attrs.text("ordinal", Some(n.ordinal.to_string()));
            attrs.text("column", n.column.as_deref());
            attrs.text("lineageTag", n.lineage_tag.as_deref());
        }
        NodeRef::Partition(n) => {
            attrs.text("mode", n.mode.as_deref());
            attrs.text("queryGroup", n.query_group.as_deref());
            match &n.source {
                PartitionSource::MCode { expression }
                | PartitionSource::Calculated { expression } => {
                    attrs.expression("source", Some(expression));
                }
                PartitionSource::Entity {
                    entity_name,
                    expression_source,
                    schema_name,
                } => {
                    attrs.text("entityName", entity_name.as_deref());
                    attrs.text("expressionSource", expression_source.as_deref());
                    attrs.text("schemaName", schema_name.as_deref());
                }
            }
        }
        NodeRef::Relationship(n) => {
            attrs.text("fromColumn", Some(format!("{}.{}", n.from_table, n.from_column)));
            attrs.text("toColumn", Some(format!("{}.{}", n.to_table, n.to_column)));
            attrs.text("fromCardinality", n.from_cardinality.as_deref());
            attrs.text("toCardinality", n.to_cardinality.as_deref());
            attrs.text("crossFilteringBehavior", n.cross_filtering_behavior.as_deref());
            attrs.text("securityFilteringBehavior", n.security_filtering_behavior.as_deref());
            attrs.text("joinOnDateBehavior", n.join_on_date_behavior.as_deref());
            if !n.is_active {
                attrs.text("isActive", Some("false"));
            }
            attrs.flag("relyOnReferentialIntegrity", n.rely_on_referential_integrity);
        }
        NodeRef::Expression(n) => {
            attrs.expression("expression", Some(&n.expression));
            for (key, value) in &n.meta {
                attrs.text(&format!("meta.{}", key), Some(value.to_string()));
            }
            attrs.text("lineageTag", n.lineage_tag.as_deref());
            attrs.text("queryGroup", n.query_group.as_deref());
            attrs.text("description", n.description.as_deref());
        }
        NodeRef::Culture(n) => {
            attrs.expression("linguisticMetadata", n.linguistic_metadata.as_deref());
            attrs.text("contentType", n.content_type.as_deref());
        }
        NodeRef::CalculationGroup(n) => {
            attrs.text("precedence", n.precedence.map(|p| p.to_string()));
            attrs.text("description", n.description.as_deref());
        }
        NodeRef::CalculationItem(n) => {
            attrs.expression("expression", Some(&n.expression));
            attrs.text("ordinal", n.ordinal.map(|o| o.to_string()));
            attrs.expression("formatStringExpression", n.format_string_expression.as_deref());
            attrs.text("description", n.description.as_deref());
        }
        NodeRef::Role(n) => {
            attrs.text("modelPermission", n.model_permission.as_deref());
            attrs.text("description", n.description.as_deref());
        }
        NodeRef::TablePermission(n) => {
            attrs.expression("filter", Some(&n.filter_expression));
        }
        NodeRef::Member(n) => {
            attrs.text("identityProvider", n.identity_provider.as_deref());
        }
        NodeRef::Annotation(n) => {
            attrs.expression("value", Some(&n.value));
        }
        NodeRef::QueryGroup(_) | NodeRef::Ref(_) | NodeRef::ChangedProperty(_) => {}
    }

    let mut snapshot = AstSnapshot::new(inner.node_type(), node.label());
    snapshot.attributes = attrs.0;
    snapshot.with_children(node.children().into_iter().map(snapshot_node).collect())
}

#[derive(Default)]
struct Attrs(BTreeMap<String, String>);

impl Attrs {
    fn text<S: AsRef<str>>(&mut self, key: &str, value: Option<S>) {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.as_ref().to_string());
        }
    }

    fn flag(&mut self, key: &str, set: bool) {
        if set {
            self.0.insert(key.to_string(), "true".to_string());
        }
    }

    /// Expressions are shown by their first line only.
    fn expression(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.insert(key.to_string(), truncate_label(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdl::ast::elements::{Column, Measure, Relationship, Table};

    #[test]
    fn test_snapshot_table() {
        let table = Table {
            name: "Sales".into(),
            is_hidden: true,
            columns: vec![Column {
                name: "Amount".into(),
                data_type: Some("double".into()),
                ..Default::default()
            }],
            measures: vec![Measure::new("Total", "SUM(Sales[Amount])")],
            ..Default::default()
        };
        let snapshot = snapshot_file(&TmdlFile::Table(table));
        assert_eq!(snapshot.node_type, "Table");
        assert_eq!(snapshot.attributes.get("isHidden").map(String::as_str), Some("true"));
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0].node_type, "Measure");
        assert_eq!(
            snapshot.children[1].attributes.get("dataType").map(String::as_str),
            Some("double")
        );
        assert_eq!(snapshot.node_count(), 3);
    }

    #[test]
    fn test_snapshot_collection_root() {
        let file = TmdlFile::Relationships(vec![Relationship::new("r1")]);
        let snapshot = snapshot_file(&file);
        assert_eq!(snapshot.node_type, "Relationships");
        assert_eq!(snapshot.label, "1");
        assert_eq!(snapshot.children[0].label, "r1");
        // active is the default and stays out of the attributes
        assert!(!snapshot.children[0].attributes.contains_key("isActive"));
    }
}
