//! Key set expansion: available descendants and available ancestors.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::{DomainError, DomainResult, TreeIndex, TreeKey, TreeNode};

/// Expands `keys` into themselves plus every descendant reachable without
/// crossing a disabled node.
///
/// Seeds are always part of the result, including disabled seeds and keys
/// the index does not know. Fails with [`DomainError::SubtreeNotLoaded`]
/// when traversal reaches a node with unknown subtree extent.
pub fn extended_checked_key_set<K: TreeKey>(keys: &[K], index: &TreeIndex<K>) -> DomainResult<HashSet<K>> {
    extend_key_set(keys, index, false)
}

/// Like [`extended_checked_key_set`], but not-loaded nodes are skipped when
/// `allow_not_loaded` is set.
#[instrument(level = "debug", skip(keys, index), fields(seeds = keys.len()))]
pub fn extend_key_set<K: TreeKey>(
    keys: &[K],
    index: &TreeIndex<K>,
    allow_not_loaded: bool,
) -> DomainResult<HashSet<K>> {
    let mut visited: HashSet<&K> = HashSet::new();
    let mut extended: HashSet<K> = keys.iter().cloned().collect();

    for key in keys {
        let Some(seed) = index.get_node(key) else {
            continue;
        };
        let mut stack: Vec<&TreeNode<K>> = vec![seed];
        while let Some(node) = stack.pop() {
            if node.disabled {
                continue;
            }
            if !visited.insert(&node.key) {
                continue;
            }
            if node.not_loaded {
                if allow_not_loaded {
                    trace!(key = ?node.key, "skipping not loaded subtree");
                    continue;
                }
                debug!(key = ?node.key, "subtree not loaded");
                return Err(DomainError::SubtreeNotLoaded);
            }
            extended.insert(node.key.clone());
            let children: Vec<_> = index.children(node).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    Ok(extended)
}

/// Collects the ancestors of `keys` up to (excluding) the first disabled one.
///
/// A walk also stops at an ancestor already collected for another key.
#[instrument(level = "debug", skip(keys, index), fields(seeds = keys.len()))]
pub fn available_ascendant_key_set<K: TreeKey>(keys: &[K], index: &TreeIndex<K>) -> HashSet<K> {
    let mut visited: HashSet<K> = HashSet::new();

    for key in keys {
        let Some(node) = index.get_node(key) else {
            continue;
        };
        let mut cursor = index.parent(node);
        while let Some(ancestor) = cursor {
            if ancestor.disabled || !visited.insert(ancestor.key.clone()) {
                break;
            }
            cursor = index.parent(ancestor);
        }
    }

    visited
}
