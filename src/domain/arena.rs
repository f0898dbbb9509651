use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::node::{TreeKey, TreeNode};

/// Arena-based index over one tree snapshot.
///
/// Nodes are owned by the arena and addressed by key; parent and child links
/// are arena indices. Roots form a forest, each level bucket keeps nodes in
/// pre-order.
#[derive(Debug)]
pub struct TreeIndex<K> {
    arena: Arena<TreeNode<K>>,
    key_map: HashMap<K, Index>,
    levels: Vec<Vec<Index>>,
    roots: Vec<Index>,
}

impl<K: TreeKey> Default for TreeIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TreeKey> TreeIndex<K> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            key_map: HashMap::new(),
            levels: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Inserts a node below `parent` (or as a new root) and returns its index.
    ///
    /// Level and the parent's children list are maintained here; the caller
    /// guarantees key uniqueness.
    #[instrument(level = "trace", skip(self, node))]
    pub(crate) fn insert_node(&mut self, mut node: TreeNode<K>, parent: Option<Index>) -> Index {
        node.parent = parent;
        node.level = parent
            .and_then(|p| self.arena.get(p))
            .map_or(0, |p| p.level + 1);
        let level = node.level;
        let key = node.key.clone();
        let node_idx = self.arena.insert(node);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.get_or_insert_with(Vec::new).push(node_idx),
            None => self.roots.push(node_idx),
        }
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, Vec::new);
        }
        self.levels[level].push(node_idx);
        self.key_map.insert(key, node_idx);

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, key: &K) -> Option<&TreeNode<K>> {
        self.key_map.get(key).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.key_map.contains_key(key)
    }

    pub fn node(&self, idx: Index) -> Option<&TreeNode<K>> {
        self.arena.get(idx)
    }

    pub(crate) fn node_mut(&mut self, idx: Index) -> Option<&mut TreeNode<K>> {
        self.arena.get_mut(idx)
    }

    pub fn parent(&self, node: &TreeNode<K>) -> Option<&TreeNode<K>> {
        node.parent.and_then(|p| self.arena.get(p))
    }

    /// Loaded children of `node`, in order.
    pub fn children<'a>(&'a self, node: &'a TreeNode<K>) -> impl Iterator<Item = &'a TreeNode<K>> + 'a {
        node.children
            .iter()
            .flatten()
            .filter_map(move |&idx| self.arena.get(idx))
    }

    pub fn roots(&self) -> impl Iterator<Item = &TreeNode<K>> {
        self.roots.iter().filter_map(move |&idx| self.arena.get(idx))
    }

    /// Level buckets, shallowest first.
    pub fn levels(&self) -> &[Vec<Index>] {
        &self.levels
    }

    pub fn max_level(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    /// Number of levels; 0 for an empty index.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal over the whole forest.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_, K> {
        TreeIterator::new(self)
    }

    /// Keys of all leaf nodes in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_keys(&self) -> Vec<K> {
        self.iter()
            .filter(|node| node.is_leaf)
            .map(|node| node.key.clone())
            .collect()
    }
}

pub struct TreeIterator<'a, K> {
    index: &'a TreeIndex<K>,
    stack: Vec<Index>,
}

impl<'a, K: TreeKey> TreeIterator<'a, K> {
    fn new(index: &'a TreeIndex<K>) -> Self {
        let stack = index.roots.iter().rev().copied().collect();
        Self { index, stack }
    }
}

impl<'a, K: TreeKey> Iterator for TreeIterator<'a, K> {
    type Item = &'a TreeNode<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.index.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                if let Some(children) = &node.children {
                    self.stack.extend(children.iter().rev());
                }
                return Some(node);
            }
        }
        None
    }
}
