//! Fixture loader
//!
//!     Loads the curated sample project under `tests/fixtures` and hands it out as text,
//!     tokens or a parsed tree. Paths are relative to the fixture root and follow the
//!     project layout, so the file kind is inferred from the path exactly as the loader
//!     does for real files.
//!
//!     ```rust,ignore
//!     use tmdl::tmdl::testing::Samples;
//!
//!     let source = Samples::load("tables/Sales.tmdl").source();
//!     let tokens = Samples::load("tables/Sales.tmdl").tokenize();
//!     let table = Samples::table("Sales");
//!     ```

use crate::tmdl::ast::{Culture, Database, Model, Role, Table, TmdlFile};
use crate::tmdl::lexing::tokenize;
use crate::tmdl::loader::ModelFile;
use crate::tmdl::parsing::{FileKind, ParseOutcome};
use crate::tmdl::token::Token;
use std::path::{Path, PathBuf};

pub const FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Every sample file, relative to the fixture root.
pub const SAMPLE_FILES: &[&str] = &[
    "database.tmdl",
    "model.tmdl",
    "relationships.tmdl",
    "expressions.tmdl",
    "tables/Sales.tmdl",
    "tables/Products.tmdl",
    "tables/Date.tmdl",
    "tables/Time Intelligence.tmdl",
    "cultures/en-US.tmdl",
    "roles/Regional Managers.tmdl",
];

/// Entry point of the fluent fixture API.
pub struct Samples;

impl Samples {
    pub fn root() -> PathBuf {
        PathBuf::from(FIXTURE_ROOT)
    }

    pub fn path(name: &str) -> PathBuf {
        Self::root().join(name)
    }

    pub fn load(name: &str) -> SampleLoader {
        SampleLoader {
            path: Self::path(name),
        }
    }

    pub fn all() -> impl Iterator<Item = SampleLoader> {
        SAMPLE_FILES.iter().map(|name| Self::load(name))
    }

    pub fn table(name: &str) -> Table {
        let file = Self::load(&format!("tables/{}.tmdl", name)).parse_clean();
        match file {
            TmdlFile::Table(table) => table,
            other => panic!("tables/{}.tmdl did not parse as a table: {:?}", name, other),
        }
    }

    pub fn model() -> Model {
        match Self::load("model.tmdl").parse_clean() {
            TmdlFile::Model(model) => model,
            other => panic!("model.tmdl did not parse as a model: {:?}", other),
        }
    }

    pub fn database() -> Database {
        match Self::load("database.tmdl").parse_clean() {
            TmdlFile::Database(database) => database,
            other => panic!("database.tmdl did not parse as a database: {:?}", other),
        }
    }

    pub fn culture(name: &str) -> Culture {
        match Self::load(&format!("cultures/{}.tmdl", name)).parse_clean() {
            TmdlFile::Culture(culture) => culture,
            other => panic!("cultures/{}.tmdl did not parse as a culture: {:?}", name, other),
        }
    }

    pub fn role(name: &str) -> Role {
        match Self::load(&format!("roles/{}.tmdl", name)).parse_clean() {
            TmdlFile::Role(role) => role,
            other => panic!("roles/{}.tmdl did not parse as a role: {:?}", name, other),
        }
    }
}

/// One sample file, ready to be transformed.
#[derive(Debug, Clone)]
pub struct SampleLoader {
    path: PathBuf,
}

impl SampleLoader {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name relative to the fixture root, for test labels.
    pub fn name(&self) -> String {
        self.path
            .strip_prefix(FIXTURE_ROOT)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }

    fn file(&self) -> ModelFile {
        ModelFile::from_path(&self.path)
            .unwrap_or_else(|e| panic!("failed to load sample {}: {}", self.name(), e))
    }

    pub fn kind(&self) -> FileKind {
        self.file().kind
    }

    pub fn source(&self) -> String {
        self.file().source
    }

    pub fn tokenize(&self) -> Vec<Token> {
        tokenize(&self.source())
    }

    pub fn parse(&self) -> ParseOutcome {
        self.file().parse()
    }

    /// Parse and require that no warnings were raised.
    pub fn parse_clean(&self) -> TmdlFile {
        let outcome = self.parse();
        assert!(
            outcome.is_clean(),
            "sample {} parsed with warnings: {:?}",
            self.name(),
            outcome.warnings
        );
        outcome.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_exists() {
        for sample in Samples::all() {
            assert!(sample.path().is_file(), "missing sample {}", sample.name());
        }
    }

    #[test]
    fn test_kind_follows_layout() {
        assert_eq!(Samples::load("tables/Sales.tmdl").kind(), FileKind::Table);
        assert_eq!(Samples::load("relationships.tmdl").kind(), FileKind::Relationships);
        assert_eq!(Samples::load("cultures/en-US.tmdl").kind(), FileKind::Culture);
    }

    #[test]
    fn test_sample_name_is_relative() {
        assert_eq!(Samples::load("tables/Sales.tmdl").name(), "tables/Sales.tmdl");
    }
}
