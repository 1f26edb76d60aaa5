//! AST Selection: map a text selection onto the syntax subtrees it covers.
//!
//! Given a parsed syntax tree and a `[start, end]` byte range into its
//! source, the engine finds the minimal run of sibling subtrees covering the
//! range, tallies declarations, references and exception-raising statements
//! over that run, and renders it as an indented `text : kind` listing.
//!
//! # Architecture
//!
//! - [`tree`]: read-only arena model ([`SyntaxTree`], [`NodeId`]) and its
//!   [`TreeBuilder`]. Node kinds are classified into a [`Category`] when the
//!   tree is built.
//! - [`analysis`]: depth-first interval labels, O(1) ancestor tests, LCA,
//!   offset resolution, sibling-run extraction, statistics and printing.
//! - [`ts`]: tree-sitter front end for Java and Rust source.
//! - [`config`]: TOML configuration for the CLI.
//!
//! All traversals use explicit stacks, so arbitrarily deep trees cannot
//! exhaust the call stack.
//!
//! # Example
//!
//! ```
//! use ast_selection::analysis::{analyze, SelectionRange};
//! use ast_selection::tree::{KindTable, TreeBuilder};
//!
//! let mut b = TreeBuilder::new("FILE", KindTable::psi());
//! b.start_node("LOCAL_VARIABLE");
//! b.token("TYPE", "int");
//! b.token("WHITE_SPACE", " ");
//! b.token("IDENTIFIER", "x");
//! b.finish_node()?;
//! b.token("SEMICOLON", ";");
//! let tree = b.finish()?;
//!
//! let analysis = analyze(&tree, SelectionRange::new(0, 6))?;
//! assert_eq!(analysis.run.len(), 2);
//! assert_eq!(analysis.stats.declarations, 1);
//! print!("{}", analysis.report(&tree));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod cache;
pub mod config;
pub mod pool;
pub mod tree;
pub mod ts;

// Re-exports
pub use analysis::{
    analyze, Analysis, AnalysisError, Analyzer, AncestryOracle, IntervalLabels, OffsetResolver,
    SelectionRange, StatTriple, SubtreeRun,
};
pub use config::{load_from_path, load_from_str, ConfigError, InspectConfig};
pub use tree::{Category, KindTable, NodeId, Span, SyntaxTree, TreeBuilder, TreeError};
pub use ts::{Language, SourceParser, TreeSitterError};
