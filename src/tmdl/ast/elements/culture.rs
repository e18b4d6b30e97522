//! Culture element (`cultures/<name>.tmdl`)

use super::common::Annotation;
use crate::tmdl::ast::range::SourceRange;
use serde::{Deserialize, Serialize};

/// A `cultureInfo` declaration.
///
/// The linguistic metadata is kept as an opaque, normalized text blob. It is not
/// validated as JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Culture {
    pub name: String,
    pub linguistic_metadata: Option<String>,
    pub content_type: Option<String>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<String>,
    pub range: SourceRange,
}

impl Culture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_ast_node!(Culture, "Culture", |node| node.name.clone());
