//! Testing utilities for the tmdl pipeline
//!
//! # Parser Testing Guidelines
//!
//! Parser and serializer tests follow two rules. This module provides the tools for both.
//!
//! ## Rule 1: Use the sample project for test content
//!
//! tmdl is whitespace sensitive: a space where a tab belongs, or a property one level
//! too shallow, silently changes what a file means. Hand-typed sources in test bodies
//! get these details wrong and then pass for the wrong reason.
//!
//! The curated project under `tests/fixtures` is laid out like a real semantic model
//! folder and is kept in canonical form. Load it through [`Samples`]:
//!
//! ```rust,ignore
//! use tmdl::tmdl::testing::Samples;
//!
//! // CORRECT: a vetted file, kind inferred from its path
//! let outcome = Samples::load("tables/Sales.tmdl").parse();
//!
//! // WRONG: content typed into the test
//! let outcome = parse_source("table Sales\n    measure X = 1", FileKind::Table);
//! ```
//!
//! Small inline sources remain fine for unit tests of a single lexer or parser rule,
//! where the exact whitespace is the point of the test.
//!
//! ## Rule 2: Use assert_tree for tree verification
//!
//! Matching nested enums and options by hand is long, and node counts alone say very
//! little. [`assert_tree`] walks the tree fluently and reports failures with the path of
//! the node it was looking at:
//!
//! ```rust,ignore
//! use tmdl::tmdl::testing::assert_tree;
//!
//! assert_tree(&file).table(|t| {
//!     t.name("Sales")
//!         .measure("Total Sales", |m| {
//!             m.expression("SUM(Sales[Amount])").format_string("#,0");
//!         })
//!         .column("Amount", |c| {
//!             c.data_type("double").is_hidden(false);
//!         });
//! });
//! ```
//!
//! Text properties can be compared exactly, by prefix or by substring; see [`TextMatch`].

mod assertions;
mod matchers;
pub mod samples;

pub use assertions::{
    assert_tree, CalculationGroupAssertion, CalculationItemAssertion, ColumnAssertion,
    CultureAssertion, DatabaseAssertion, ExpressionAssertion, FileAssertion,
    HierarchyAssertion, MeasureAssertion, ModelAssertion, PartitionAssertion,
    RelationshipAssertion, RoleAssertion, TableAssertion,
};
pub use matchers::TextMatch;
pub use samples::{SampleLoader, Samples, SAMPLE_FILES};
