use crate::analysis::ancestry::AncestryOracle;
use crate::analysis::errors::AnalysisError;
use crate::analysis::extract::{extract, SubtreeRun};
use crate::analysis::labels::IntervalLabels;
use crate::analysis::offsets::OffsetResolver;
use crate::analysis::printer;
use crate::analysis::stats::{collect, StatTriple};
use crate::cache;
use crate::tree::{Category, NodeId, SyntaxTree};
use serde::Serialize;
use std::rc::Rc;

/// A `[start, end]` pair of byte offsets into the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Outcome of one selection analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub selection: SelectionRange,
    /// Node resolved for the selection start
    pub first: NodeId,
    /// Node resolved for the trimmed selection end
    pub second: NodeId,
    pub lca: NodeId,
    pub run: SubtreeRun,
    pub stats: StatTriple,
}

impl Analysis {
    /// Indented dump of the covered subtrees.
    pub fn render(&self, tree: &SyntaxTree) -> String {
        printer::render(tree, &self.run, 0)
    }

    /// Statistics block, a blank line, then the tree dump.
    pub fn report(&self, tree: &SyntaxTree) -> String {
        format!("{}\n{}", self.stats, self.render(tree))
    }

    /// Covered subtrees as owned nested nodes, for JSON export.
    pub fn nodes(&self, tree: &SyntaxTree) -> Vec<RunNode> {
        struct Frame {
            id: NodeId,
            next: usize,
            children: Vec<RunNode>,
        }

        let mut out = Vec::with_capacity(self.run.len());
        let mut frames: Vec<Frame> = Vec::new();
        for &top in &self.run {
            frames.push(Frame {
                id: top,
                next: 0,
                children: Vec::new(),
            });
            while let Some(frame) = frames.last_mut() {
                // Descend into the next unvisited child, if any.
                if let Some(&child) = tree.children(frame.id).get(frame.next) {
                    frame.next += 1;
                    frames.push(Frame {
                        id: child,
                        next: 0,
                        children: Vec::new(),
                    });
                    continue;
                }
                let Some(done) = frames.pop() else { break };
                let node = RunNode::new(tree, done.id, done.children);
                match frames.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => out.push(node),
                }
            }
        }
        out
    }
}

/// One covered node with its subtree, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunNode {
    pub id: NodeId,
    pub kind: String,
    pub category: Category,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<RunNode>,
}

impl RunNode {
    fn new(tree: &SyntaxTree, id: NodeId, children: Vec<RunNode>) -> Self {
        let span = tree.span(id);
        Self {
            id,
            kind: tree.kind(id).to_string(),
            category: tree.category(id),
            text: tree.text(id).to_string(),
            start: span.start,
            end: span.end,
            children,
        }
    }
}

/// Runs selection analyses, optionally reusing labels per tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    cache_labels: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse interval labels across calls on the same tree.
    pub fn with_label_cache(mut self, enabled: bool) -> Self {
        self.cache_labels = enabled;
        self
    }

    fn labels(&self, tree: &SyntaxTree) -> Rc<IntervalLabels> {
        if self.cache_labels {
            cache::labels_for(tree)
        } else {
            Rc::new(IntervalLabels::for_tree(tree))
        }
    }

    /// Resolve `selection` onto `tree` and summarize what it covers.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        selection: SelectionRange,
    ) -> Result<Analysis, AnalysisError> {
        let len = tree.source().len();
        if selection.start > selection.end {
            return Err(AnalysisError::InvertedSelection {
                start: selection.start,
                end: selection.end,
            });
        }
        if selection.end > len {
            return Err(AnalysisError::OutOfRange {
                offset: selection.end,
                start: 0,
                end: len,
            });
        }

        let labels = self.labels(tree);
        let resolver = OffsetResolver::new(tree);
        let start_node = resolver.start_leaf(selection.start)?;
        let end_node = resolver.end_leaf(selection.end)?;

        // Keep the boundaries in source order for the sibling scan.
        let (first, second) = match (labels.get(start_node), labels.get(end_node)) {
            (Some(a), Some(b)) if b.tin < a.tin => (end_node, start_node),
            _ => (start_node, end_node),
        };

        let oracle = AncestryOracle::new(tree, &labels);
        let lca = oracle.lca(first, second)?;
        tracing::debug!(
            start = selection.start,
            end = selection.end,
            first = %first,
            second = %second,
            lca = %lca,
            lca_kind = tree.kind(lca),
            "resolved selection boundaries"
        );

        let run = extract(tree, first, second, lca, tree.roots())?;
        let stats = collect(tree, &run);
        tracing::debug!(nodes = run.len(), ?stats, "extracted subtree run");

        Ok(Analysis {
            selection,
            first,
            second,
            lca,
            run,
            stats,
        })
    }
}

/// Analyze with a fresh labeling.
pub fn analyze(tree: &SyntaxTree, selection: SelectionRange) -> Result<Analysis, AnalysisError> {
    Analyzer::new().analyze(tree, selection)
}
