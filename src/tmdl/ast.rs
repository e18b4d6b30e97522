//! AST definitions for the tmdl format
//!
//! The tree is heterogeneous: every declaration kind has its own struct with its own
//! typed fields, nested the way the language nests them (a table owns its columns, a
//! calculation group owns its items, and so on). Nodes are plain owned data; callers
//! may build and mutate them freely and hand them to the serializer.
//!
//! ## Modules
//!
//! - `range` - Source line spans. Ranges never take part in equality.
//! - `elements` - One module per declaration kind
//! - `traits` - The `AstNode` trait shared by every element
//! - `node` - `TmdlFile` (a parse result), `NodeRef` (borrowed generic view) and `NodeKind`
//! - `snapshot` - Format-agnostic snapshot of a tree, used by the inspection formats

pub mod elements;
pub mod node;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use elements::{
    Annotation, CalculationGroup, CalculationItem, ChangedProperty, Column, Culture, Database,
    Expression, Hierarchy, HierarchyLevel, Measure, Model, ModelReference, Partition,
    PartitionSource, QueryGroup, Relationship, Role, RoleMember, Table, TablePermission,
};
pub use node::{NodeKind, NodeRef, TmdlFile};
pub use range::SourceRange;
pub use snapshot::{snapshot_file, snapshot_node, AstSnapshot};
pub use traits::AstNode;
