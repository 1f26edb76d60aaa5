//! Sibling-run extraction.
//!
//! Given the two boundary nodes of a selection and their LCA, lift each
//! boundary to the LCA's direct child that contains it, then take the run of
//! LCA children between those two, inclusive. Children lying between the
//! boundaries are part of the run even if the selection never touches them.

use crate::analysis::errors::AnalysisError;
use crate::tree::{NodeId, SyntaxTree};

/// Ordered siblings covered by a selection.
pub type SubtreeRun = Vec<NodeId>;

/// Find the sibling sequence `target` belongs to, searching `forest` and all
/// of its descendants.
pub fn child_set_containing<'t>(
    tree: &'t SyntaxTree,
    forest: &'t [NodeId],
    target: NodeId,
) -> Option<&'t [NodeId]> {
    let mut stack: Vec<&'t [NodeId]> = vec![forest];
    while let Some(siblings) = stack.pop() {
        if siblings.contains(&target) {
            return Some(siblings);
        }
        stack.extend(
            siblings
                .iter()
                .rev()
                .map(|&id| tree.children(id))
                .filter(|children| !children.is_empty()),
        );
    }
    None
}

/// Walk `node` upward to the child of `lca` that contains it.
fn lift_to_child_of(tree: &SyntaxTree, node: NodeId, lca: NodeId) -> Result<NodeId, AnalysisError> {
    let mut current = node;
    loop {
        match tree.parent(current) {
            Some(parent) if parent == lca => return Ok(current),
            Some(parent) => current = parent,
            None => {
                return Err(AnalysisError::internal(format!(
                    "node {node} is not a descendant of its lca {lca}"
                )))
            }
        }
    }
}

/// Extract the run of `lca` children spanning `first` through `second`.
///
/// `first` must precede `second` in source order. A boundary that is the LCA
/// itself (the other boundary lies inside it) yields `[lca]`.
pub fn extract(
    tree: &SyntaxTree,
    first: NodeId,
    second: NodeId,
    lca: NodeId,
    roots: &[NodeId],
) -> Result<SubtreeRun, AnalysisError> {
    if first == lca || second == lca {
        return Ok(vec![lca]);
    }

    let first_child = lift_to_child_of(tree, first, lca)?;
    let second_child = lift_to_child_of(tree, second, lca)?;

    let siblings = child_set_containing(tree, roots, first_child).ok_or_else(|| {
        AnalysisError::internal(format!("no sibling set holds {first_child}"))
    })?;

    let start = siblings
        .iter()
        .position(|&id| id == first_child)
        .ok_or_else(|| AnalysisError::internal(format!("{first_child} missing from its siblings")))?;
    let len = siblings[start..]
        .iter()
        .position(|&id| id == second_child)
        .ok_or_else(|| {
            AnalysisError::internal(format!(
                "{second_child} does not follow {first_child} among the lca children"
            ))
        })?;

    Ok(siblings[start..=start + len].to_vec())
}
