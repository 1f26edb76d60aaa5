//! Mapping text offsets onto tree nodes.
//!
//! Offsets are byte offsets into the tree's source. A selection boundary sits
//! between two characters, so the start of a selection resolves through the
//! character just before it, and the end is trimmed back over trailing spaces
//! and newlines to the last meaningful character.

use crate::analysis::errors::AnalysisError;
use crate::tree::{NodeId, Span, SyntaxTree};

pub struct OffsetResolver<'a> {
    tree: &'a SyntaxTree,
}

impl<'a> OffsetResolver<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self { tree }
    }

    /// Total span of the root forest.
    pub fn total_span(&self) -> Span {
        let roots = self.tree.roots();
        match (roots.first(), roots.last()) {
            (Some(&first), Some(&last)) => {
                Span::new(self.tree.span(first).start, self.tree.span(last).end)
            }
            _ => Span::default(),
        }
    }

    /// Deepest node whose span contains `offset`.
    ///
    /// Descent stops at a leaf, or at a node whose children leave `offset`
    /// uncovered (text held by the node itself).
    pub fn leaf_at(&self, offset: usize) -> Result<NodeId, AnalysisError> {
        let mut current = self
            .child_containing(self.tree.roots(), offset)
            .ok_or_else(|| {
                let total = self.total_span();
                AnalysisError::OutOfRange {
                    offset,
                    start: total.start,
                    end: total.end,
                }
            })?;

        while let Some(child) = self.child_containing(self.tree.children(current), offset) {
            current = child;
        }
        Ok(current)
    }

    fn child_containing(&self, siblings: &[NodeId], offset: usize) -> Option<NodeId> {
        // Siblings are ordered and disjoint: skip every one ending at or
        // before `offset`, then check the next.
        let idx = siblings.partition_point(|&id| self.tree.span(id).end <= offset);
        siblings
            .get(idx)
            .copied()
            .filter(|&id| self.tree.span(id).contains(offset))
    }

    /// Node selected by a selection starting at `start`.
    pub fn start_leaf(&self, start: usize) -> Result<NodeId, AnalysisError> {
        self.leaf_at(start.saturating_sub(1))
    }

    /// Node selected by a selection ending at `raw_end`, after trimming.
    pub fn end_leaf(&self, raw_end: usize) -> Result<NodeId, AnalysisError> {
        let end = trim_selection_end(self.tree.source(), raw_end)?;
        self.leaf_at(end)
    }
}

/// Move a raw selection end back onto the last non-whitespace character.
///
/// A `raw_end` equal to the text length first steps onto the last character.
/// Then spaces and newlines are skipped backwards.
pub fn trim_selection_end(text: &str, raw_end: usize) -> Result<usize, AnalysisError> {
    let bytes = text.as_bytes();
    if raw_end > bytes.len() {
        return Err(AnalysisError::OutOfRange {
            offset: raw_end,
            start: 0,
            end: bytes.len(),
        });
    }

    let empty = AnalysisError::EmptySelection { raw_end };
    let mut i = if raw_end == bytes.len() {
        raw_end.checked_sub(1).ok_or_else(|| empty.clone())?
    } else {
        raw_end
    };

    while matches!(bytes[i], b' ' | b'\n') {
        i = i.checked_sub(1).ok_or_else(|| empty.clone())?;
    }
    Ok(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{KindTable, TreeBuilder};

    #[test]
    fn trims_trailing_spaces_and_newlines() {
        let text = "foo   \n";
        assert_eq!(trim_selection_end(text, text.len()), Ok(2));
    }

    #[test]
    fn trim_starts_at_raw_end_inside_text() {
        // The character at `raw_end` itself is inspected first.
        assert_eq!(trim_selection_end("ab cd", 2), Ok(1));
        assert_eq!(trim_selection_end("ab cd", 3), Ok(3));
    }

    #[test]
    fn tabs_are_not_trimmed() {
        assert_eq!(trim_selection_end("a\t\n", 3), Ok(1));
    }

    #[test]
    fn whitespace_only_selection_is_empty() {
        assert_eq!(
            trim_selection_end("  \n ", 4),
            Err(AnalysisError::EmptySelection { raw_end: 4 })
        );
        assert_eq!(
            trim_selection_end("", 0),
            Err(AnalysisError::EmptySelection { raw_end: 0 })
        );
    }

    #[test]
    fn trim_rejects_offsets_past_the_text() {
        assert!(matches!(
            trim_selection_end("abc", 4),
            Err(AnalysisError::OutOfRange { offset: 4, .. })
        ));
    }

    fn sample() -> SyntaxTree {
        // "int x = y;" with a LOCAL_VARIABLE node around everything
        let mut b = TreeBuilder::new("FILE", KindTable::psi());
        b.start_node("LOCAL_VARIABLE");
        b.token("TYPE", "int");
        b.token("WHITE_SPACE", " ");
        b.token("IDENTIFIER", "x");
        b.token("WHITE_SPACE", " ");
        b.token("EQ", "=");
        b.token("WHITE_SPACE", " ");
        b.start_node("REFERENCE_EXPRESSION");
        b.token("IDENTIFIER", "y");
        b.finish_node().unwrap();
        b.token("SEMICOLON", ";");
        b.finish_node().unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn leaf_at_descends_to_tokens() {
        let tree = sample();
        let resolver = OffsetResolver::new(&tree);
        assert_eq!(tree.text(resolver.leaf_at(0).unwrap()), "int");
        assert_eq!(tree.text(resolver.leaf_at(2).unwrap()), "int");
        assert_eq!(tree.text(resolver.leaf_at(3).unwrap()), " ");
        let y = resolver.leaf_at(8).unwrap();
        assert_eq!(tree.text(y), "y");
        assert_eq!(tree.kind(y), "IDENTIFIER");
        assert_eq!(tree.text(resolver.leaf_at(9).unwrap()), ";");
    }

    #[test]
    fn leaf_at_rejects_offsets_outside_the_tree() {
        let tree = sample();
        let resolver = OffsetResolver::new(&tree);
        assert_eq!(
            resolver.leaf_at(10),
            Err(AnalysisError::OutOfRange {
                offset: 10,
                start: 0,
                end: 10
            })
        );
    }

    #[test]
    fn zero_width_nodes_never_contain_offsets() {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        b.start_node("BLOCK");
        b.finish_node().unwrap();
        b.token("LEAF", "ab");
        let tree = b.finish().unwrap();
        let resolver = OffsetResolver::new(&tree);
        assert_eq!(tree.kind(resolver.leaf_at(0).unwrap()), "LEAF");
    }

    #[test]
    fn start_leaf_looks_one_character_back() {
        let tree = sample();
        let resolver = OffsetResolver::new(&tree);
        // Selection starting at "x" (offset 4) resolves through the space.
        assert_eq!(tree.text(resolver.start_leaf(4).unwrap()), " ");
        assert_eq!(tree.text(resolver.start_leaf(0).unwrap()), "int");
    }

    #[test]
    fn end_leaf_trims_before_resolving() {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        b.token("WORD", "foo");
        b.token("WHITE_SPACE", "   \n");
        let tree = b.finish().unwrap();
        let resolver = OffsetResolver::new(&tree);
        assert_eq!(tree.text(resolver.end_leaf(7).unwrap()), "foo");
    }
}
