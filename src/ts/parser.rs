use crate::tree::{Category, KindTable, NodeId, Span, SyntaxNode, SyntaxTree};
use crate::ts::errors::TreeSitterError;
use crate::ts::language::Language;
use ast_grep_language::LanguageExt;
use std::path::Path;
use tree_sitter::{Parser, Tree};

/// Fields in which an identifier introduces a name instead of using one.
const BINDING_FIELDS: &[&str] = &["name", "pattern"];

/// Kind of the leaves `lower` inserts for text between tree-sitter nodes.
pub const GAP_KIND: &str = "whitespace";

/// Tree-sitter parser wrapper producing [`SyntaxTree`]s.
pub struct SourceParser {
    parser: Parser,
    language: Language,
}

impl SourceParser {
    pub fn new(language: Language) -> Result<Self, TreeSitterError> {
        let mut parser = Parser::new();
        // Get the tree-sitter Language from ast-grep-language
        let ts_lang = language.support_lang().get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| TreeSitterError::LanguageSet { language })?;

        Ok(Self { parser, language })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse source code into a raw tree-sitter Tree.
    pub fn parse_raw(&mut self, source: &str) -> Result<Tree, TreeSitterError> {
        self.parser
            .parse(source, None)
            .ok_or(TreeSitterError::ParseFailed {
                language: self.language,
            })
    }

    /// Parse with the language's default kind table.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, TreeSitterError> {
        let table = self.language.kind_table();
        self.parse_with_table(source, &table)
    }

    /// Parse and classify node kinds through `table`.
    pub fn parse_with_table(
        &mut self,
        source: &str,
        table: &KindTable,
    ) -> Result<SyntaxTree, TreeSitterError> {
        let raw = self.parse_raw(source)?;
        let tree = lower(&raw, source, table);
        tracing::debug!(
            language = %self.language,
            nodes = tree.len(),
            bytes = source.len(),
            "parsed source"
        );
        Ok(tree)
    }

    /// Read and parse a file.
    pub fn parse_file(
        &mut self,
        path: &Path,
        table: &KindTable,
    ) -> Result<SyntaxTree, TreeSitterError> {
        let source = std::fs::read_to_string(path).map_err(|e| TreeSitterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_with_table(&source, table)
    }
}

fn classify(table: &KindTable, kind: &str, field: Option<&str>) -> Category {
    match table.classify(kind) {
        Category::Reference if field.is_some_and(|f| BINDING_FIELDS.contains(&f)) => {
            Category::Other
        }
        category => category,
    }
}

/// Copy a tree-sitter CST into an arena tree, keeping every node (named and
/// anonymous) in source order.
///
/// Tree-sitter leaves whitespace out of the tree. Every byte range between
/// siblings, or between a node's edge and its first or last child, becomes a
/// [`GAP_KIND`] leaf, so a node's children always tile its span. The root is
/// widened to the whole text, so leading and trailing whitespace become gap
/// leaves under it.
pub fn lower(raw: &Tree, source: &str, table: &KindTable) -> SyntaxTree {
    let root = raw.root_node();
    let mut nodes = vec![SyntaxNode {
        kind: root.kind().to_string(),
        category: table.classify(root.kind()),
        span: Span::new(0, source.len()),
        parent: None,
        children: Vec::new(),
    }];
    let root_id = NodeId::from_index(0);
    let mut errors = 0usize;

    let mut cursor = root.walk();
    // Arena ids of the ancestors of the cursor's current node.
    let mut parents = vec![root_id];

    if cursor.goto_first_child() {
        'walk: loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                errors += 1;
            }
            let Some(&parent) = parents.last() else {
                break;
            };
            push_gap(&mut nodes, parent, node.start_byte());
            let id = NodeId::from_index(nodes.len());
            nodes.push(SyntaxNode {
                kind: node.kind().to_string(),
                category: classify(table, node.kind(), cursor.field_name()),
                span: Span::new(node.start_byte(), node.end_byte()),
                parent: Some(parent),
                children: Vec::new(),
            });
            nodes[parent.index()].children.push(id);

            if cursor.goto_first_child() {
                parents.push(id);
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
                let Some(done) = parents.pop() else {
                    break 'walk;
                };
                let end = nodes[done.index()].span.end;
                push_gap(&mut nodes, done, end);
                if parents.is_empty() {
                    break 'walk;
                }
            }
        }
    }

    if errors > 0 {
        tracing::warn!(errors, "source contains syntax errors; tree includes ERROR nodes");
    }
    SyntaxTree::from_parts(source.to_string(), nodes, root_id)
}

/// Append a gap leaf to `parent` covering the text between its last child
/// (or its own start) and `end`, if there is any.
fn push_gap(nodes: &mut Vec<SyntaxNode>, parent: NodeId, end: usize) {
    let holder = &nodes[parent.index()];
    let start = holder
        .children
        .last()
        .map_or(holder.span.start, |&last| nodes[last.index()].span.end);
    if start >= end {
        return;
    }
    let id = NodeId::from_index(nodes.len());
    nodes.push(SyntaxNode {
        kind: GAP_KIND.to_string(),
        category: Category::Other,
        span: Span::new(start, end),
        parent: Some(parent),
        children: Vec::new(),
    });
    nodes[parent.index()].children.push(id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_java_class() {
        let mut parser = SourceParser::new(Language::Java).unwrap();
        let source = "class A { int f; }";
        let tree = parser.parse(source).unwrap();
        assert_eq!(tree.kind(tree.root()), "program");
        assert_eq!(tree.text(tree.root()), source);
        let decls: Vec<_> = tree
            .descendants(tree.root())
            .filter(|&id| tree.category(id) == Category::Declaration)
            .map(|id| tree.text(id))
            .collect();
        assert_eq!(decls, ["int f;"]);
    }

    #[test]
    fn children_are_ordered_and_nested() {
        let mut parser = SourceParser::new(Language::Rust).unwrap();
        let tree = parser
            .parse("fn main() { let x = y + 1; }\n")
            .unwrap();
        for id in tree.node_ids() {
            let span = tree.span(id);
            let mut last_end = span.start;
            for &child in tree.children(id) {
                let c = tree.span(child);
                assert!(c.start >= last_end, "siblings overlap under {}", tree.kind(id));
                assert!(c.end <= span.end, "child escapes parent {}", tree.kind(id));
                assert_eq!(tree.parent(child), Some(id));
                last_end = c.end;
            }
        }
    }

    #[test]
    fn binding_identifiers_are_not_references() {
        let mut parser = SourceParser::new(Language::Rust).unwrap();
        let tree = parser.parse("fn f() { let x = y; }").unwrap();
        let refs: Vec<_> = tree
            .descendants(tree.root())
            .filter(|&id| tree.category(id) == Category::Reference)
            .map(|id| tree.text(id))
            .collect();
        assert_eq!(refs, ["y"]);
    }

    #[test]
    fn root_covers_surrounding_whitespace() {
        let mut parser = SourceParser::new(Language::Java).unwrap();
        let source = "\n\nclass A {}\n\n";
        let tree = parser.parse(source).unwrap();
        assert_eq!(tree.span(tree.root()), Span::new(0, source.len()));
    }

    #[test]
    fn gap_leaves_tile_every_parent() {
        let mut parser = SourceParser::new(Language::Java).unwrap();
        let source = "\n  class A {\n    int f;  \n}\n";
        let tree = parser.parse(source).unwrap();
        for id in tree.node_ids() {
            let children = tree.children(id);
            let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
                continue;
            };
            assert_eq!(tree.span(first).start, tree.span(id).start);
            assert_eq!(tree.span(last).end, tree.span(id).end);
            for pair in children.windows(2) {
                assert_eq!(tree.span(pair[0]).end, tree.span(pair[1]).start);
            }
        }

        let root_kids: Vec<_> = tree.children(tree.root()).iter().map(|&id| tree.kind(id)).collect();
        assert_eq!(root_kids, [GAP_KIND, "class_declaration", GAP_KIND]);

        let indent = tree
            .node_ids()
            .find(|&id| tree.kind(id) == GAP_KIND && tree.text(id) == "\n    ")
            .unwrap();
        assert_eq!(tree.category(indent), Category::Other);
        assert!(tree.children(indent).is_empty());
        assert_eq!(tree.parent(indent).map(|p| tree.kind(p)), Some("class_body"));
    }

    #[test]
    fn syntax_errors_still_lower() {
        let mut parser = SourceParser::new(Language::Java).unwrap();
        let tree = parser.parse("class A { int }").unwrap();
        assert!(tree.len() > 1);
    }
}
