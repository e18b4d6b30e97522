//! Partition element
//!
//! A partition's source is one of three shapes, modelled as a closed union:
//!
//!     partition Sales = m               MCode: the `source =` block holds M code
//!     partition Dates = calculated      Calculated: the `source =` block holds DAX
//!     partition Cache = entity          Entity: a reference to a shared entity

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartitionSource {
    MCode {
        expression: String,
    },
    Calculated {
        expression: String,
    },
    Entity {
        entity_name: Option<String>,
        expression_source: Option<String>,
        schema_name: Option<String>,
    },
}

impl PartitionSource {
    /// The keyword written after `partition Name =`.
    pub fn type_keyword(&self) -> &'static str {
        match self {
            PartitionSource::MCode { .. } => "m",
            PartitionSource::Calculated { .. } => "calculated",
            PartitionSource::Entity { .. } => "entity",
        }
    }

    /// The `source =` body, for the kinds that have one.
    pub fn expression(&self) -> Option<&str> {
        match self {
            PartitionSource::MCode { expression } | PartitionSource::Calculated { expression } => {
                Some(expression)
            }
            PartitionSource::Entity { .. } => None,
        }
    }
}

/// An entity source with nothing set: the shape a partition without a body parses to.
impl Default for PartitionSource {
    fn default() -> Self {
        PartitionSource::Entity {
            entity_name: None,
            expression_source: None,
            schema_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Partition {
    pub name: String,
    pub mode: Option<String>,
    pub query_group: Option<String>,
    pub source: PartitionSource,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(Partition, "Partition", |node| format!(
    "{} ({})",
    node.name,
    node.source.type_keyword()
));
