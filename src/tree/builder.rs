//! Event-driven construction of [`SyntaxTree`]s.
//!
//! The builder mirrors a parser's event stream: open a node, push tokens,
//! close the node. Source text is the concatenation of token texts, so spans
//! are contiguous and properly nested by construction.

use crate::tree::errors::TreeError;
use crate::tree::kind::KindTable;
use crate::tree::node::{NodeId, Span, SyntaxNode, SyntaxTree};

pub struct TreeBuilder {
    table: KindTable,
    source: String,
    nodes: Vec<SyntaxNode>,
    /// Open nodes, innermost last. Index 0 is the root.
    open: Vec<NodeId>,
    unmatched_finish: bool,
}

impl TreeBuilder {
    /// Start a tree whose root node has kind `root_kind`. Every node kind is
    /// classified through `table` as it is created.
    pub fn new(root_kind: &str, table: KindTable) -> Self {
        let mut builder = Self {
            table,
            source: String::new(),
            nodes: Vec::new(),
            open: Vec::new(),
            unmatched_finish: false,
        };
        let root = builder.alloc(root_kind, None);
        builder.open.push(root);
        builder
    }

    fn alloc(&mut self, kind: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let offset = self.source.len();
        self.nodes.push(SyntaxNode {
            kind: kind.to_string(),
            category: self.table.classify(kind),
            span: Span::new(offset, offset),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    /// Open a child node of the current node.
    pub fn start_node(&mut self, kind: &str) -> &mut Self {
        let parent = self.current();
        let id = self.alloc(kind, parent);
        self.open.push(id);
        self
    }

    /// Append a leaf with the given text under the current node.
    pub fn token(&mut self, kind: &str, text: &str) -> &mut Self {
        let parent = self.current();
        let id = self.alloc(kind, parent);
        self.source.push_str(text);
        self.nodes[id.index()].span.end = self.source.len();
        self
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self) -> Result<&mut Self, TreeError> {
        // The root stays open until `finish`.
        if self.open.len() <= 1 {
            self.unmatched_finish = true;
            return Err(TreeError::NoOpenNode);
        }
        if let Some(id) = self.open.pop() {
            self.nodes[id.index()].span.end = self.source.len();
        }
        Ok(self)
    }

    /// Close the root and hand out the finished tree.
    pub fn finish(mut self) -> Result<SyntaxTree, TreeError> {
        if self.unmatched_finish {
            return Err(TreeError::NoOpenNode);
        }
        if self.open.len() != 1 {
            return Err(TreeError::Unbalanced {
                open: self.open.len() - 1,
            });
        }
        let root = NodeId::from_index(0);
        self.nodes[0].span = Span::new(0, self.source.len());
        if self.nodes.iter().any(|n| n.kind.is_empty()) {
            return Err(TreeError::EmptyKind);
        }
        Ok(SyntaxTree::from_parts(self.source, self.nodes, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Category;

    #[test]
    fn builds_nested_spans() {
        let mut b = TreeBuilder::new("FILE", KindTable::psi());
        b.start_node("LOCAL_VARIABLE");
        b.token("TYPE", "int");
        b.token("WHITE_SPACE", " ");
        b.token("IDENTIFIER", "x");
        b.finish_node().unwrap();
        b.token("SEMICOLON", ";");
        let tree = b.finish().unwrap();

        assert_eq!(tree.source(), "int x;");
        let var = tree.children(tree.root())[0];
        assert_eq!(tree.span(var), Span::new(0, 5));
        assert_eq!(tree.category(var), Category::Declaration);
        assert_eq!(tree.span(tree.root()), Span::new(0, 6));
    }

    #[test]
    fn unclosed_node_is_rejected() {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        b.start_node("BLOCK");
        b.token("LBRACE", "{");
        assert_eq!(b.finish().unwrap_err(), TreeError::Unbalanced { open: 1 });
    }

    #[test]
    fn closing_the_root_is_rejected() {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        assert_eq!(b.finish_node().err(), Some(TreeError::NoOpenNode));
        assert_eq!(b.finish().unwrap_err(), TreeError::NoOpenNode);
    }

    #[test]
    fn empty_kind_is_rejected() {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        b.token("", "x");
        assert_eq!(b.finish().unwrap_err(), TreeError::EmptyKind);
    }
}
