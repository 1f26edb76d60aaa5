//! Thread-local interval-label cache keyed by tree identity.
//!
//! Repeated selections on the same tree (one per keystroke in an editor) can
//! share one labeling. Keys are [`TreeId`]s, and every tree construction mints
//! a new id, so a rebuilt tree never sees labels from its predecessor.
//! Cache is capped at 64 entries; it is cleared wholesale when full.

use crate::analysis::IntervalLabels;
use crate::tree::{SyntaxTree, TreeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const MAX_CACHE_ENTRIES: usize = 64;

thread_local! {
    static LABEL_CACHE: RefCell<HashMap<TreeId, Rc<IntervalLabels>>> =
        RefCell::new(HashMap::new());
}

/// Get the labels for `tree` from cache, or compute and cache them.
pub fn labels_for(tree: &SyntaxTree) -> Rc<IntervalLabels> {
    LABEL_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(labels) = cache.get(&tree.id()) {
            tracing::trace!(tree = ?tree.id(), "label cache hit");
            return Rc::clone(labels);
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        let labels = Rc::new(IntervalLabels::for_tree(tree));
        cache.insert(tree.id(), Rc::clone(&labels));
        labels
    })
}

/// Drop the labels of one tree, e.g. when the host discards it.
pub fn invalidate(tree: TreeId) {
    LABEL_CACHE.with(|cache| {
        cache.borrow_mut().remove(&tree);
    });
}

/// Clear the label cache (mainly for testing).
pub fn clear_cache() {
    LABEL_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of cached labelings.
pub fn cache_size() -> usize {
    LABEL_CACHE.with(|cache| cache.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{KindTable, TreeBuilder};

    fn tree() -> SyntaxTree {
        let mut b = TreeBuilder::new("FILE", KindTable::empty());
        b.token("LEAF", "x");
        b.finish().unwrap()
    }

    #[test]
    fn hit_returns_the_same_labels() {
        clear_cache();
        let t = tree();
        let a = labels_for(&t);
        let b = labels_for(&t);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache_size(), 1);
    }

    #[test]
    fn rebuilt_tree_gets_fresh_labels() {
        clear_cache();
        let first = tree();
        let second = tree();
        let a = labels_for(&first);
        let b = labels_for(&second);
        assert!(!Rc::ptr_eq(&a, &b));
        assert!(b.is_valid_for(&second));
        invalidate(first.id());
        assert_eq!(cache_size(), 1);
    }

    #[test]
    fn cache_is_capped() {
        clear_cache();
        let trees: Vec<_> = (0..MAX_CACHE_ENTRIES + 1).map(|_| tree()).collect();
        for t in &trees {
            labels_for(t);
        }
        assert!(cache_size() <= MAX_CACHE_ENTRIES);
    }
}
