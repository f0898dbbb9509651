//! Tree index builder for raw hierarchical input.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeIndex;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{NodeType, RawNode, TreeKey, TreeNode};

/// Constructs a [`TreeIndex`] from raw nodes.
pub struct TreeIndexBuilder<K> {
    visited_keys: HashSet<K>,
}

impl<K: TreeKey> Default for TreeIndexBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TreeKey> TreeIndexBuilder<K> {
    pub fn new() -> Self {
        Self {
            visited_keys: HashSet::new(),
        }
    }

    /// Build the index for a forest of raw nodes.
    ///
    /// Nodes are inserted in pre-order so that level buckets and children
    /// lists keep the input order.
    #[instrument(level = "debug", skip_all, fields(roots = raw_nodes.len()))]
    pub fn build(&mut self, raw_nodes: Vec<RawNode<K>>) -> DomainResult<TreeIndex<K>> {
        self.visited_keys.clear();
        let mut index = TreeIndex::new();
        let mut stack: Vec<(RawNode<K>, Option<Index>)> =
            raw_nodes.into_iter().rev().map(|raw| (raw, None)).collect();

        while let Some((mut raw, parent_idx)) = stack.pop() {
            if !self.visited_keys.insert(raw.key.clone()) {
                return Err(DomainError::DuplicateKey(format!("{:?}", raw.key)));
            }

            let children = raw.children.take();
            let is_leaf = raw.is_leaf.unwrap_or(children.is_none());
            let not_loaded = raw.is_leaf == Some(false) && children.is_none();
            let node = TreeNode {
                key: raw.key,
                parent: None,
                children: None,
                disabled: raw.disabled,
                is_leaf,
                is_group: raw.node_type == NodeType::Group,
                is_ghost: raw.node_type == NodeType::Ghost,
                shallow_loaded: !not_loaded,
                not_loaded,
                level: 0,
            };
            let current_idx = index.insert_node(node, parent_idx);

            if let Some(children) = children {
                if children.is_empty() {
                    // keep "loaded, but empty" distinguishable from "not loaded"
                    if let Some(node) = index.node_mut(current_idx) {
                        node.children = Some(Vec::new());
                    }
                }
                stack.extend(children.into_iter().rev().map(|child| (child, Some(current_idx))));
            }
        }

        debug!(nodes = index.len(), depth = index.depth(), "tree index built");
        Ok(index)
    }
}
