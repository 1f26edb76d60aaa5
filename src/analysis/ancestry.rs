use crate::analysis::errors::AnalysisError;
use crate::analysis::labels::IntervalLabels;
use crate::tree::{NodeId, SyntaxTree};

/// Ancestor tests and lowest-common-ancestor queries over labeled nodes.
pub struct AncestryOracle<'a> {
    tree: &'a SyntaxTree,
    labels: &'a IntervalLabels,
}

impl<'a> AncestryOracle<'a> {
    pub fn new(tree: &'a SyntaxTree, labels: &'a IntervalLabels) -> Self {
        Self { tree, labels }
    }

    /// `a` is a strict ancestor of `b`. Never true for `a == b`; false for
    /// nodes outside the labeled forest.
    pub fn is_ancestor(&self, a: NodeId, b: NodeId) -> bool {
        match (self.labels.get(a), self.labels.get(b)) {
            (Some(a), Some(b)) => a.encloses(&b),
            _ => false,
        }
    }

    /// Lowest common ancestor of `a` and `b`.
    ///
    /// Walks `a` upward until it encloses `b`, or until `b` turns out to
    /// enclose it. For `a == b` this is the parent of `a` (or `a` itself at
    /// the root). Costs O(depth).
    pub fn lca(&self, a: NodeId, b: NodeId) -> Result<NodeId, AnalysisError> {
        let mut current = a;
        loop {
            if self.is_ancestor(current, b) {
                return Ok(current);
            }
            if self.is_ancestor(b, current) {
                return Ok(b);
            }
            match self.tree.parent(current) {
                Some(parent) => current = parent,
                None if current == b => return Ok(current),
                None => {
                    return Err(AnalysisError::internal(format!(
                        "nodes {a} and {b} do not share a labeled root"
                    )))
                }
            }
        }
    }
}
