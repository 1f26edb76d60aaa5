use crate::tree::{Category, NodeId, SyntaxTree};
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Declaration, reference and exception-statement tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct StatTriple {
    pub declarations: usize,
    pub references: usize,
    pub exceptions: usize,
}

impl StatTriple {
    pub fn new(declarations: usize, references: usize, exceptions: usize) -> Self {
        Self {
            declarations,
            references,
            exceptions,
        }
    }

    fn count(&mut self, category: Category) {
        match category {
            Category::Declaration => self.declarations += 1,
            Category::Reference => self.references += 1,
            Category::Exception => self.exceptions += 1,
            Category::Other => {}
        }
    }
}

impl Add for StatTriple {
    type Output = StatTriple;

    fn add(self, rhs: StatTriple) -> StatTriple {
        StatTriple {
            declarations: self.declarations + rhs.declarations,
            references: self.references + rhs.references,
            exceptions: self.exceptions + rhs.exceptions,
        }
    }
}

impl AddAssign for StatTriple {
    fn add_assign(&mut self, rhs: StatTriple) {
        *self = *self + rhs;
    }
}

impl Sum for StatTriple {
    fn sum<I: Iterator<Item = StatTriple>>(iter: I) -> StatTriple {
        iter.fold(StatTriple::default(), Add::add)
    }
}

impl fmt::Display for StatTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variables count: {}", self.declarations)?;
        writeln!(f, "References count: {}", self.references)?;
        writeln!(f, "Exceptions count: {}", self.exceptions)
    }
}

/// Tally every node in the subtrees rooted at `nodes`.
pub fn collect(tree: &SyntaxTree, nodes: &[NodeId]) -> StatTriple {
    nodes
        .iter()
        .map(|&root| {
            let mut stats = StatTriple::default();
            for id in tree.descendants(root) {
                stats.count(tree.category(id));
            }
            stats
        })
        .sum()
}
