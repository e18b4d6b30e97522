//! AST node type definitions, one module per declaration kind
//!
//! Every element carries its kind-specific fields plus `doc` (the preceding `///`
//! comment) and `range` (the source lines it came from). Element structs derive
//! `Default`, so tests and callers can build them with struct update syntax.

/// Implement [`AstNode`](super::traits::AstNode) for an element with `doc` and `range`
/// fields. The closure-like argument computes the display label.
macro_rules! impl_ast_node {
    ($ty:ty, $name:literal, |$node:ident| $label:expr) => {
        impl $crate::tmdl::ast::traits::AstNode for $ty {
            fn node_type(&self) -> &'static str {
                $name
            }
            fn display_label(&self) -> String {
                let $node = self;
                $label
            }
            fn range(&self) -> Option<$crate::tmdl::ast::range::SourceRange> {
                Some(self.range).filter(|range| range.is_set())
            }
            fn doc(&self) -> Option<&str> {
                self.doc.as_deref()
            }
        }
    };
}

pub mod calculation_group;
pub mod column;
pub mod common;
pub mod culture;
pub mod database;
pub mod expression;
pub mod hierarchy;
pub mod measure;
pub mod model;
pub mod partition;
pub mod relationship;
pub mod role;
pub mod table;

pub use calculation_group::{CalculationGroup, CalculationItem};
pub use column::Column;
pub use common::{Annotation, ChangedProperty};
pub use culture::Culture;
pub use database::Database;
pub use expression::Expression;
pub use hierarchy::{Hierarchy, HierarchyLevel};
pub use measure::Measure;
pub use model::{Model, ModelReference, QueryGroup};
pub use partition::{Partition, PartitionSource};
pub use relationship::Relationship;
pub use role::{Role, RoleMember, TablePermission};
pub use table::Table;
