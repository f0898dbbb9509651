//! Bottom-up recomputation of checked and indeterminate keys.
//!
//! Levels are swept from the deepest to the root. Each enabled, loaded,
//! internal node looks at its enabled children only:
//!
//! ```text
//! child checked        -> partial
//! child indeterminate  -> partial, not full, stop scanning
//! child unchecked      -> not full, stop scanning if already partial
//! ```
//!
//! Nodes that are not shallow-loaded contribute nothing upwards: keys inside
//! a not-loaded subtree are assumed unchecked, so their ancestors cannot be
//! computed precisely.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::{CheckStrategy, TreeIndex, TreeKey};

/// Result of one cascade sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeResult<K: TreeKey> {
    pub checked: HashSet<K>,
    pub indeterminate: HashSet<K>,
}

/// Derives the checked and indeterminate sets from an expanded base set.
#[instrument(level = "debug", skip(index, base), fields(base = base.len()))]
pub fn cascade<K: TreeKey>(
    index: &TreeIndex<K>,
    base: HashSet<K>,
    check_strategy: CheckStrategy,
    leaf_only: bool,
) -> CascadeResult<K> {
    let mut checked = base;
    let mut indeterminate: HashSet<K> = HashSet::new();
    let drop_internal = check_strategy == CheckStrategy::Child || leaf_only;

    for level in index.levels().iter().rev() {
        for node in level.iter().filter_map(|&idx| index.node(idx)) {
            if node.disabled || !node.shallow_loaded || node.is_leaf {
                continue;
            }

            let mut fully_checked = true;
            let mut partial_checked = false;
            for child in index.children(node) {
                if child.disabled {
                    continue;
                }
                if checked.contains(&child.key) {
                    partial_checked = true;
                } else if indeterminate.contains(&child.key) {
                    partial_checked = true;
                    fully_checked = false;
                    break;
                } else {
                    fully_checked = false;
                    if partial_checked {
                        break;
                    }
                }
            }

            if fully_checked {
                if check_strategy == CheckStrategy::Parent {
                    for child in index.children(node) {
                        checked.remove(&child.key);
                    }
                }
                trace!(key = ?node.key, "fully checked");
                checked.insert(node.key.clone());
            } else if partial_checked {
                trace!(key = ?node.key, "indeterminate");
                indeterminate.insert(node.key.clone());
            }
            if drop_internal {
                checked.remove(&node.key);
            }
        }
    }

    debug!(
        checked = checked.len(),
        indeterminate = indeterminate.len(),
        "cascade complete"
    );
    CascadeResult {
        checked,
        indeterminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawNode, TreeIndexBuilder};

    // 0
    // ├── 0-0
    // │   ├── 0-0-0
    // │   └── 0-0-1
    // └── 0-1
    fn sample() -> TreeIndex<&'static str> {
        TreeIndexBuilder::new()
            .build(vec![RawNode::branch(
                "0",
                vec![
                    RawNode::branch("0-0", vec![RawNode::leaf("0-0-0"), RawNode::leaf("0-0-1")]),
                    RawNode::leaf("0-1"),
                ],
            )])
            .unwrap()
    }

    fn set(keys: &[&'static str]) -> HashSet<&'static str> {
        keys.iter().copied().collect()
    }

    #[test]
    fn given_all_leaves_checked_when_cascading_then_bubbles_to_root() {
        let index = sample();
        let result = cascade(&index, set(&["0-0-0", "0-0-1", "0-1"]), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["0", "0-0", "0-0-0", "0-0-1", "0-1"]));
        assert!(result.indeterminate.is_empty());
    }

    #[test]
    fn given_one_leaf_checked_when_cascading_then_ancestors_indeterminate() {
        let index = sample();
        let result = cascade(&index, set(&["0-0-1"]), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["0-0-1"]));
        assert_eq!(result.indeterminate, set(&["0", "0-0"]));
    }

    #[test]
    fn given_parent_strategy_when_subtree_full_then_keeps_highest_ancestor() {
        let index = sample();
        let result = cascade(&index, set(&["0-0-0", "0-0-1"]), CheckStrategy::Parent, false);
        assert_eq!(result.checked, set(&["0-0"]));
        assert_eq!(result.indeterminate, set(&["0"]));
    }

    #[test]
    fn given_child_strategy_when_cascading_then_drops_internal_nodes() {
        let index = sample();
        let result = cascade(&index, set(&["0-0", "0-0-0", "0-0-1"]), CheckStrategy::Child, false);
        assert_eq!(result.checked, set(&["0-0-0", "0-0-1"]));
        // 0-0 is gone from the working set by the time 0 is scanned
        assert!(result.indeterminate.is_empty());
    }

    #[test]
    fn given_indeterminate_child_when_cascading_then_parent_not_full() {
        let index = TreeIndexBuilder::new()
            .build(vec![RawNode::branch(
                "r",
                vec![
                    RawNode::branch("a", vec![RawNode::leaf("a-0"), RawNode::leaf("a-1")]),
                    RawNode::leaf("b"),
                ],
            )])
            .unwrap();
        let result = cascade(&index, set(&["b", "a-0"]), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["b", "a-0"]));
        assert_eq!(result.indeterminate, set(&["r", "a"]));
    }

    #[test]
    fn given_only_disabled_children_when_cascading_then_parent_vacuously_checked() {
        let index = TreeIndexBuilder::new()
            .build(vec![RawNode::branch("r", vec![RawNode::leaf("x").disabled()])])
            .unwrap();
        let result = cascade(&index, HashSet::new(), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["r"]));
    }

    #[test]
    fn given_seed_above_not_loaded_child_when_cascading_then_both_checked_and_partial() {
        let index = TreeIndexBuilder::new()
            .build(vec![RawNode::branch(
                "r",
                vec![RawNode::leaf("a"), RawNode::not_loaded("b")],
            )])
            .unwrap();
        // the sweep itself keeps seeds; callers skipping b resolve the overlap
        let result = cascade(&index, set(&["r", "a"]), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["r", "a"]));
        assert_eq!(result.indeterminate, set(&["r"]));
    }

    #[test]
    fn given_not_loaded_child_when_cascading_then_counts_as_unchecked() {
        let index = TreeIndexBuilder::new()
            .build(vec![RawNode::branch(
                "r",
                vec![RawNode::leaf("a"), RawNode::not_loaded("b")],
            )])
            .unwrap();
        let result = cascade(&index, set(&["a"]), CheckStrategy::All, false);
        assert_eq!(result.checked, set(&["a"]));
        assert_eq!(result.indeterminate, set(&["r"]));
    }
}
