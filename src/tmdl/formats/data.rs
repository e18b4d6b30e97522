//! Structured dumps of the tree
//!
//! Every node derives `serde::Serialize`, so these formats are thin wrappers around
//! `serde_json` and `serde_yaml`. Source ranges are included.

use super::registry::{FormatError, Formatter};
use crate::tmdl::ast::TmdlFile;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, file: &TmdlFile) -> Result<String, FormatError> {
        serde_json::to_string_pretty(file)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON of the full tree"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, file: &TmdlFile) -> Result<String, FormatError> {
        serde_yaml::to_string(file).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML of the full tree"
    }
}
