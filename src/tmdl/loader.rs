//! Single-file boundary
//!
//! The core never touches the filesystem. This module reads one `.tmdl` file, works out
//! which kind of file it is and hands the text to the pipeline; it also writes
//! serialized text back. Its errors are the only fatal ones in the crate.

use crate::tmdl::lexing::tokenize;
use crate::tmdl::parsing::{parse, FileKind, ParseOutcome};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot tell what kind of tmdl file {0} is; pass the kind explicitly")]
    UnknownKind(PathBuf),
}

/// One file's text, with its path and kind.
#[derive(Debug, Clone)]
pub struct ModelFile {
    pub path: PathBuf,
    pub kind: FileKind,
    pub source: String,
}

impl ModelFile {
    /// Read a file, inferring its kind from the path or, failing that, its content.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        Self::load(path.as_ref(), None)
    }

    /// Read a file whose kind is known.
    pub fn from_path_as(path: impl AsRef<Path>, kind: FileKind) -> Result<Self, LoaderError> {
        Self::load(path.as_ref(), Some(kind))
    }

    fn load(path: &Path, kind: Option<FileKind>) -> Result<Self, LoaderError> {
        let source = read_file(path)?;
        let kind = match kind.or_else(|| FileKind::infer_from_path(path)) {
            Some(kind) => kind,
            None => FileKind::sniff(&tokenize(&source))
                .ok_or_else(|| LoaderError::UnknownKind(path.to_path_buf()))?,
        };
        tracing::debug!(path = %path.display(), %kind, bytes = source.len(), "loaded file");
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            source,
        })
    }

    pub fn parse(&self) -> ParseOutcome {
        parse(&tokenize(&self.source), self.kind)
    }
}

/// Read a file, telling a missing file apart from other I/O failures.
pub fn read_file(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoaderError::NotFound(path.to_path_buf()),
        _ => LoaderError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn write_file(path: &Path, text: &str) -> Result<(), LoaderError> {
    fs::write(path, text).map_err(|source| LoaderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ModelFile::from_path("/no/such/dir/tables/Sales.tmdl").unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_kind_from_path_then_content() {
        let dir = tempfile::tempdir().unwrap();
        let tables = dir.path().join("tables");
        fs::create_dir(&tables).unwrap();
        let by_path = tables.join("Sales.tmdl");
        fs::write(&by_path, "table Sales\n").unwrap();
        assert_eq!(ModelFile::from_path(&by_path).unwrap().kind, FileKind::Table);

        let by_content = dir.path().join("anything.tmdl");
        fs::write(&by_content, "role Readers\n").unwrap();
        assert_eq!(ModelFile::from_path(&by_content).unwrap().kind, FileKind::Role);

        let unknown = dir.path().join("blank.tmdl");
        fs::write(&unknown, "\n").unwrap();
        assert!(matches!(
            ModelFile::from_path(&unknown),
            Err(LoaderError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_write_then_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.tmdl");
        write_file(&path, "database Sales\n\tcompatibilityLevel: 1601\n").unwrap();
        let outcome = ModelFile::from_path(&path).unwrap().parse();
        let database = outcome.file.as_database().cloned().unwrap_or_default();
        assert_eq!(database.compatibility_level, Some(1601));
    }
}
