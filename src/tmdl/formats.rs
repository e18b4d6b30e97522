//! Output format implementations
//!
//! This module contains the formats a parsed tree can be written to:
//! - `tmdl`: the canonical serializer, the inverse of the parser
//! - `treeviz`: one line per node, for reading a tree at a glance
//! - `json` and `yaml`: full structured dumps of the tree
//!
//! All of them are reachable by name through the [`FormatRegistry`].

pub mod data;
pub mod registry;
pub mod tmdl;
pub mod treeviz;

pub use data::{JsonFormatter, YamlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tmdl::{serialize, serialize_with, SerializeOptions, TmdlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
