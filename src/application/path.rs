//! Root-to-node path resolution.

use tracing::instrument;

use crate::domain::{TreeIndex, TreeKey, TreeNode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Keep group nodes in the path
    pub include_group: bool,
}

/// Ancestor chain of a node, root first.
#[derive(Debug, Clone)]
pub struct MergedPath<'a, K> {
    pub key_path: Vec<K>,
    pub tree_node_path: Vec<&'a TreeNode<K>>,
    /// The resolved node; None for unknown keys and ghosts
    pub tree_node: Option<&'a TreeNode<K>>,
}

impl<K> Default for MergedPath<'_, K> {
    fn default() -> Self {
        Self {
            key_path: Vec::new(),
            tree_node_path: Vec::new(),
            tree_node: None,
        }
    }
}

/// Resolves the path from the root down to `key`, the node itself included.
///
/// Ghost nodes are never part of a path; resolving a ghost yields an empty
/// path. Group nodes appear only with [`PathOptions::include_group`].
#[instrument(level = "debug", skip(index))]
pub fn get_path<'a, K: TreeKey>(
    key: Option<&K>,
    options: PathOptions,
    index: &'a TreeIndex<K>,
) -> MergedPath<'a, K> {
    let Some(tree_node) = key.and_then(|key| index.get_node(key)) else {
        return MergedPath::default();
    };
    if tree_node.is_ghost {
        return MergedPath::default();
    }

    let mut tree_node_path = Vec::new();
    let mut cursor = Some(tree_node);
    while let Some(node) = cursor {
        if !node.is_ghost && (options.include_group || !node.is_group) {
            tree_node_path.push(node);
        }
        cursor = index.parent(node);
    }
    tree_node_path.reverse();

    MergedPath {
        key_path: tree_node_path.iter().map(|node| node.key.clone()).collect(),
        tree_node_path,
        tree_node: Some(tree_node),
    }
}
