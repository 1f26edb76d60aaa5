//! Tree-sitter front end.
//!
//! Parses Java or Rust source with the grammars bundled by
//! ast-grep-language and lowers the CST into a [`SyntaxTree`](crate::tree::SyntaxTree)
//! whose node kinds are classified once, at lowering time.

pub mod errors;
pub mod language;
pub mod parser;

pub use errors::TreeSitterError;
pub use language::Language;
pub use parser::{lower, SourceParser, GAP_KIND};
