use crate::tree::{NodeId, SyntaxTree};

/// Columns added per tree level.
pub const INDENT_STEP: usize = 8;

/// Render the subtrees rooted at `nodes` as `text : kind` lines, children
/// indented [`INDENT_STEP`] further than their parent.
///
/// Nodes whose text is exactly one space get no line of their own.
pub fn render(tree: &SyntaxTree, nodes: &[NodeId], indent: usize) -> String {
    let mut out = String::new();
    let mut stack: Vec<(NodeId, usize)> = nodes.iter().rev().map(|&id| (id, indent)).collect();

    while let Some((id, indent)) = stack.pop() {
        let text = tree.text(id);
        if text != " " {
            out.push_str(&format!("{:indent$}{} : {}\n", "", text, tree.kind(id)));
        }
        stack.extend(
            tree.children(id)
                .iter()
                .rev()
                .map(|&child| (child, indent + INDENT_STEP)),
        );
    }
    out
}
