//! # tmdl
//!
//! A tokenizer, parser and serializer for the tabular model definition language: the
//! tab-indented text format that describes tables, columns, measures, relationships,
//! calculation groups and roles of an analytical data model.
//!
//! File Layout
//!
//! The crate follows the reading and writing directions of the format:
//! src/tmdl
//!   ├── token       Token types shared by lexer, parser and tooling
//!   ├── lexing      Text to tokens (line classification + block state machine)
//!   ├── ast         The typed declaration tree
//!   ├── parsing     Tokens to tree (one builder per node kind)
//!   ├── formats     Tree to text (canonical serializer, treeviz, json, yaml)
//!   ├── pipeline    Text to tree in one call, and the round-trip checker
//!   ├── loader      Single file boundary (read, infer kind, write)
//!   ├── config      Layered configuration
//!   └── testing     Fixture loading and fluent tree assertions
//!
//! For testing guidelines, see the [testing module](tmdl::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod tmdl;
