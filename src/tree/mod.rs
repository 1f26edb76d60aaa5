//! Read-only syntax tree model.
//!
//! Trees are arenas of [`SyntaxNode`] entries addressed by [`NodeId`]. A parent
//! owns its children through the arena; the child's `parent` link is a plain
//! index used for upward walks only. Trees are produced either by the
//! tree-sitter adapter in [`crate::ts`] or directly through [`TreeBuilder`].

pub mod builder;
pub mod errors;
pub mod kind;
pub mod node;

pub use builder::TreeBuilder;
pub use errors::TreeError;
pub use kind::{Category, KindTable};
pub use node::{NodeId, Span, SyntaxNode, SyntaxTree, TreeId};
