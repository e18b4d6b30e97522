//! Generic node access
//!
//! [`TmdlFile`] is the owned result of parsing one file: one variant per file kind.
//! [`NodeRef`] is a borrowed view over any node in a tree, which lets tree walkers
//! (the snapshot builder, test assertions) handle every kind uniformly without a
//! visitor per kind.

use super::elements::*;
use super::traits::AstNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parse result of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TmdlFile {
    Database(Database),
    Model(Model),
    Table(Table),
    Relationships(Vec<Relationship>),
    Expressions(Vec<Expression>),
    Culture(Culture),
    Role(Role),
}

impl TmdlFile {
    /// The top-level nodes of the file.
    pub fn roots(&self) -> Vec<NodeRef<'_>> {
        match self {
            TmdlFile::Database(n) => vec![NodeRef::Database(n)],
            TmdlFile::Model(n) => vec![NodeRef::Model(n)],
            TmdlFile::Table(n) => vec![NodeRef::Table(n)],
            TmdlFile::Relationships(list) => list.iter().map(NodeRef::Relationship).collect(),
            TmdlFile::Expressions(list) => list.iter().map(NodeRef::Expression).collect(),
            TmdlFile::Culture(n) => vec![NodeRef::Culture(n)],
            TmdlFile::Role(n) => vec![NodeRef::Role(n)],
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            TmdlFile::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            TmdlFile::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_database(&self) -> Option<&Database> {
        match self {
            TmdlFile::Database(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_relationships(&self) -> Option<&[Relationship]> {
        match self {
            TmdlFile::Relationships(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_expressions(&self) -> Option<&[Expression]> {
        match self {
            TmdlFile::Expressions(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_culture(&self) -> Option<&Culture> {
        match self {
            TmdlFile::Culture(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_role(&self) -> Option<&Role> {
        match self {
            TmdlFile::Role(r) => Some(r),
            _ => None,
        }
    }

    /// Every node of the file, depth first, parents before children.
    pub fn descendants(&self) -> Vec<NodeRef<'_>> {
        let mut out = Vec::new();
        for root in self.roots() {
            root.collect_into(&mut out);
        }
        out
    }
}

/// Every kind of node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Database,
    Model,
    QueryGroup,
    Ref,
    Table,
    Column,
    Measure,
    Hierarchy,
    Level,
    Partition,
    Relationship,
    Expression,
    Culture,
    CalculationGroup,
    CalculationItem,
    Role,
    TablePermission,
    Member,
    Annotation,
    ChangedProperty,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A borrowed reference to any node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Database(&'a Database),
    Model(&'a Model),
    QueryGroup(&'a QueryGroup),
    Ref(&'a ModelReference),
    Table(&'a Table),
    Column(&'a Column),
    Measure(&'a Measure),
    Hierarchy(&'a Hierarchy),
    Level(&'a HierarchyLevel),
    Partition(&'a Partition),
    Relationship(&'a Relationship),
    Expression(&'a Expression),
    Culture(&'a Culture),
    CalculationGroup(&'a CalculationGroup),
    CalculationItem(&'a CalculationItem),
    Role(&'a Role),
    TablePermission(&'a TablePermission),
    Member(&'a RoleMember),
    Annotation(&'a Annotation),
    ChangedProperty(&'a ChangedProperty),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Database(_) => NodeKind::Database,
            NodeRef::Model(_) => NodeKind::Model,
            NodeRef::QueryGroup(_) => NodeKind::QueryGroup,
            NodeRef::Ref(_) => NodeKind::Ref,
            NodeRef::Table(_) => NodeKind::Table,
            NodeRef::Column(_) => NodeKind::Column,
            NodeRef::Measure(_) => NodeKind::Measure,
            NodeRef::Hierarchy(_) => NodeKind::Hierarchy,
            NodeRef::Level(_) => NodeKind::Level,
            NodeRef::Partition(_) => NodeKind::Partition,
            NodeRef::Relationship(_) => NodeKind::Relationship,
            NodeRef::Expression(_) => NodeKind::Expression,
            NodeRef::Culture(_) => NodeKind::Culture,
            NodeRef::CalculationGroup(_) => NodeKind::CalculationGroup,
            NodeRef::CalculationItem(_) => NodeKind::CalculationItem,
            NodeRef::Role(_) => NodeKind::Role,
            NodeRef::TablePermission(_) => NodeKind::TablePermission,
            NodeRef::Member(_) => NodeKind::Member,
            NodeRef::Annotation(_) => NodeKind::Annotation,
            NodeRef::ChangedProperty(_) => NodeKind::ChangedProperty,
        }
    }

    /// The node as a trait object, for the accessors every kind shares.
    pub fn as_node(&self) -> &'a dyn AstNode {
        match *self {
            NodeRef::Database(n) => n,
            NodeRef::Model(n) => n,
            NodeRef::QueryGroup(n) => n,
            NodeRef::Ref(n) => n,
            NodeRef::Table(n) => n,
            NodeRef::Column(n) => n,
            NodeRef::Measure(n) => n,
            NodeRef::Hierarchy(n) => n,
            NodeRef::Level(n) => n,
            NodeRef::Partition(n) => n,
            NodeRef::Relationship(n) => n,
            NodeRef::Expression(n) => n,
            NodeRef::Culture(n) => n,
            NodeRef::CalculationGroup(n) => n,
            NodeRef::CalculationItem(n) => n,
            NodeRef::Role(n) => n,
            NodeRef::TablePermission(n) => n,
            NodeRef::Member(n) => n,
            NodeRef::Annotation(n) => n,
            NodeRef::ChangedProperty(n) => n,
        }
    }

    pub fn label(&self) -> String {
        self.as_node().display_label()
    }

    /// Direct children in serialization order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match *self {
            NodeRef::Database(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Model(n) => {
                out.extend(n.query_groups.iter().map(NodeRef::QueryGroup));
                out.extend(n.references.iter().map(NodeRef::Ref));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::QueryGroup(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Table(n) => {
                out.extend(n.changed_properties.iter().map(NodeRef::ChangedProperty));
                out.extend(n.calculation_group.iter().map(NodeRef::CalculationGroup));
                out.extend(n.measures.iter().map(NodeRef::Measure));
                out.extend(n.columns.iter().map(NodeRef::Column));
                out.extend(n.hierarchies.iter().map(NodeRef::Hierarchy));
                out.extend(n.partitions.iter().map(NodeRef::Partition));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Column(n) => {
                out.extend(n.changed_properties.iter().map(NodeRef::ChangedProperty));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Measure(n) => {
                out.extend(n.changed_properties.iter().map(NodeRef::ChangedProperty));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Hierarchy(n) => {
                out.extend(n.levels.iter().map(NodeRef::Level));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Level(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Partition(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Relationship(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Expression(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::Culture(n) => out.extend(n.annotations.iter().map(NodeRef::Annotation)),
            NodeRef::CalculationGroup(n) => {
                out.extend(n.items.iter().map(NodeRef::CalculationItem));
                out.extend(n.columns.iter().map(NodeRef::Column));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Role(n) => {
                out.extend(n.members.iter().map(NodeRef::Member));
                out.extend(n.table_permissions.iter().map(NodeRef::TablePermission));
                out.extend(n.annotations.iter().map(NodeRef::Annotation));
            }
            NodeRef::Ref(_)
            | NodeRef::CalculationItem(_)
            | NodeRef::TablePermission(_)
            | NodeRef::Member(_)
            | NodeRef::Annotation(_)
            | NodeRef::ChangedProperty(_) => {}
        }
        out
    }

    fn collect_into(self, out: &mut Vec<NodeRef<'a>>) {
        out.push(self);
        for child in self.children() {
            child.collect_into(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table {
            name: "Sales".into(),
            columns: vec![Column::new("Amount")],
            measures: vec![Measure::new("Total", "SUM(Sales[Amount])")],
            annotations: vec![Annotation::new("PBI_ResultType", "Table")],
            ..Default::default()
        }
    }

    #[test]
    fn test_children_in_serialization_order() {
        let table = sample_table();
        let kinds: Vec<NodeKind> = NodeRef::Table(&table)
            .children()
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Measure, NodeKind::Column, NodeKind::Annotation]
        );
    }

    #[test]
    fn test_descendants_walk_depth_first() {
        let file = TmdlFile::Table(sample_table());
        let labels: Vec<String> = file.descendants().iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["Sales", "Total", "Amount", "PBI_ResultType"]);
    }

    #[test]
    fn test_collection_roots() {
        let file = TmdlFile::Relationships(vec![Relationship::new("a"), Relationship::new("b")]);
        assert_eq!(file.roots().len(), 2);
        assert!(file.as_table().is_none());
        assert_eq!(file.as_relationships().map(|r| r.len()), Some(2));
    }
}
