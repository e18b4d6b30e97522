//! Canonical tmdl serializer
//!
//! The inverse of the parser: a tree in, canonical text out. Serialization is not a
//! byte-for-byte reproduction of the parsed source. It is canonical: properties come in
//! a fixed order, flags are written only when true, optional properties only when set,
//! and children are separated by one blank line. Parsing the output gives back an equal
//! tree, and serializing that tree gives back the same text.
//!
//! Expressions that fit on one line are written inline (`measure X = SUM(a)`); longer
//! ones are written as `measure X =` followed by their lines one level deeper. Names
//! that are not bare identifiers are single-quoted.

mod elements;
pub mod writer;

use super::registry::{FormatError, Formatter};
use crate::tmdl::ast::{
    Culture, Database, Expression, Model, Relationship, Role, Table, TmdlFile,
};
use serde::{Deserialize, Serialize};
use writer::Writer;

/// Layout knobs for the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Write one blank line before each nested child declaration
    pub blank_line_between_children: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            blank_line_between_children: true,
        }
    }
}

/// Serialize a parsed file with the default options.
pub fn serialize(file: &TmdlFile) -> String {
    serialize_with(file, &SerializeOptions::default())
}

pub fn serialize_with(file: &TmdlFile, options: &SerializeOptions) -> String {
    let mut writer = Writer::new(options);
    match file {
        TmdlFile::Database(node) => elements::database(&mut writer, node),
        TmdlFile::Model(node) => elements::model_file(&mut writer, node),
        TmdlFile::Table(node) => elements::table(&mut writer, node, 0),
        TmdlFile::Relationships(list) => {
            for node in list {
                writer.gap();
                elements::relationship(&mut writer, node, 0);
            }
        }
        TmdlFile::Expressions(list) => {
            for node in list {
                writer.gap();
                elements::expression(&mut writer, node, 0);
            }
        }
        TmdlFile::Culture(node) => elements::culture(&mut writer, node),
        TmdlFile::Role(node) => elements::role(&mut writer, node),
    }
    writer.finish()
}

pub fn serialize_database(database: &Database) -> String {
    serialize(&TmdlFile::Database(database.clone()))
}

pub fn serialize_model(model: &Model) -> String {
    serialize(&TmdlFile::Model(model.clone()))
}

pub fn serialize_table(table: &Table) -> String {
    let options = SerializeOptions::default();
    let mut writer = Writer::new(&options);
    elements::table(&mut writer, table, 0);
    writer.finish()
}

pub fn serialize_relationships(relationships: &[Relationship]) -> String {
    serialize(&TmdlFile::Relationships(relationships.to_vec()))
}

pub fn serialize_expressions(expressions: &[Expression]) -> String {
    serialize(&TmdlFile::Expressions(expressions.to_vec()))
}

pub fn serialize_culture(culture: &Culture) -> String {
    serialize(&TmdlFile::Culture(culture.clone()))
}

pub fn serialize_role(role: &Role) -> String {
    serialize(&TmdlFile::Role(role.clone()))
}

/// The canonical serializer as a registry format.
#[derive(Debug, Clone, Default)]
pub struct TmdlFormatter {
    options: SerializeOptions,
}

impl TmdlFormatter {
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TmdlFormatter {
    fn name(&self) -> &str {
        "tmdl"
    }

    fn serialize(&self, file: &TmdlFile) -> Result<String, FormatError> {
        Ok(serialize_with(file, &self.options))
    }

    fn description(&self) -> &str {
        "Canonical tmdl text"
    }
}
