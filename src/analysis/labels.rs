//! Depth-first entry/exit labeling.
//!
//! One walk over a forest gives every node an `(tin, tout)` pair drawn from a
//! single counter that ticks on each enter and each exit event. Afterwards
//! "is A a strict ancestor of B" is two integer comparisons.

use crate::tree::{NodeId, SyntaxTree, TreeId};

/// Entry/exit counters of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub tin: usize,
    pub tout: usize,
}

impl Interval {
    /// Strict nesting: `self` opens before and closes after `other`.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.tin < other.tin && self.tout > other.tout
    }
}

/// Labels for every node reachable from the labeled forest, keyed by node.
///
/// Tied to the tree they were computed from; a rebuilt tree needs a fresh
/// labeling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalLabels {
    tree: TreeId,
    intervals: Vec<Option<Interval>>,
    labeled: usize,
}

enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

impl IntervalLabels {
    /// Label the forest `roots` of `tree` in source order.
    pub fn label(tree: &SyntaxTree, roots: &[NodeId]) -> Self {
        let mut intervals = vec![None; tree.len()];
        let mut stack: Vec<Visit> = roots.iter().rev().map(|&id| Visit::Enter(id)).collect();
        let mut time = 0usize;
        let mut labeled = 0usize;

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    intervals[id.index()] = Some(Interval { tin: time, tout: time });
                    time += 1;
                    labeled += 1;
                    stack.push(Visit::Exit(id));
                    stack.extend(tree.children(id).iter().rev().map(|&c| Visit::Enter(c)));
                }
                Visit::Exit(id) => {
                    if let Some(interval) = intervals[id.index()].as_mut() {
                        interval.tout = time;
                    }
                    time += 1;
                }
            }
        }

        tracing::trace!(nodes = labeled, ticks = time, "labeled syntax tree");
        Self {
            tree: tree.id(),
            intervals,
            labeled,
        }
    }

    /// Label the whole tree from its root.
    pub fn for_tree(tree: &SyntaxTree) -> Self {
        Self::label(tree, tree.roots())
    }

    pub fn get(&self, id: NodeId) -> Option<Interval> {
        self.intervals.get(id.index()).copied().flatten()
    }

    /// Identity of the tree these labels belong to.
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    /// Whether these labels were computed for `tree` as it is now.
    pub fn is_valid_for(&self, tree: &SyntaxTree) -> bool {
        self.tree == tree.id()
    }

    /// Number of labeled nodes.
    pub fn len(&self) -> usize {
        self.labeled
    }

    pub fn is_empty(&self) -> bool {
        self.labeled == 0
    }
}
