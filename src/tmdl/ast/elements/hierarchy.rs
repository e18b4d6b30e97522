//! Hierarchy and hierarchy level elements

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hierarchy {
    pub name: String,
    pub lineage_tag: Option<String>,
    pub display_folder: Option<String>,
    pub is_hidden: bool,
    pub levels: Vec<HierarchyLevel>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(Hierarchy, "Hierarchy", |node| node.name.clone());

/// One level of a hierarchy.
///
/// `ordinal` is the explicit `ordinal:` property when present, otherwise the level's
/// position within its hierarchy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub name: String,
    pub ordinal: usize,
    pub column: Option<String>,
    pub lineage_tag: Option<String>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl_ast_node!(HierarchyLevel, "Level", |node| node.name.clone());
