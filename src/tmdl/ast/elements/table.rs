//! Table element
//!
//! A table owns its columns, measures, hierarchies and partitions, plus at most one
//! calculation group. Children keep their declaration order within each list.

use super::calculation_group::CalculationGroup;
use super::column::Column;
use super::common::{Annotation, ChangedProperty};
use super::hierarchy::Hierarchy;
use super::measure::Measure;
use super::partition::Partition;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub lineage_tag: Option<String>,
    pub data_category: Option<String>,
    pub description: Option<String>,
    pub is_hidden: bool,
    pub is_private: bool,
    pub columns: Vec<Column>,
    pub measures: Vec<Measure>,
    pub hierarchies: Vec<Hierarchy>,
    pub partitions: Vec<Partition>,
    pub calculation_group: Option<CalculationGroup>,
    pub annotations: Vec<Annotation>,
    pub changed_properties: Vec<ChangedProperty>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn hierarchy(&self, name: &str) -> Option<&Hierarchy> {
        self.hierarchies.iter().find(|h| h.name == name)
    }

    pub fn partition(&self, name: &str) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.name == name)
    }
}

impl_ast_node!(Table, "Table", |node| node.name.clone());
