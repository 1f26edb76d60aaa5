//! Selection analysis over a [`SyntaxTree`](crate::tree::SyntaxTree).
//!
//! Pipeline: label the tree once ([`IntervalLabels`]), resolve both selection
//! boundaries to nodes ([`OffsetResolver`]), take their LCA
//! ([`AncestryOracle`]), lift the boundaries to the LCA's children and cut the
//! sibling run between them ([`extract`]), then tally ([`collect`]) and print
//! ([`render`]) that run. [`Analyzer`] drives the whole pipeline.

pub mod ancestry;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod labels;
pub mod offsets;
pub mod printer;
pub mod stats;

pub use ancestry::AncestryOracle;
pub use engine::{analyze, Analysis, Analyzer, RunNode, SelectionRange};
pub use errors::AnalysisError;
pub use extract::{child_set_containing, extract, SubtreeRun};
pub use labels::{Interval, IntervalLabels};
pub use offsets::{trim_selection_end, OffsetResolver};
pub use printer::{render, INDENT_STEP};
pub use stats::{collect, StatTriple};
