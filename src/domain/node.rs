//! Node types: raw input records and the indexed nodes built from them.

use std::fmt;
use std::hash::Hash;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Anything usable as a node key.
pub trait TreeKey: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> TreeKey for T {}

/// Structural classification of a raw node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Normal,
    /// Organizational node, optionally included in paths
    Group,
    /// Structural placeholder, never part of a path
    Ghost,
}

/// Hierarchical input record as handed over by the data owner.
///
/// `children: None` with `is_leaf: Some(false)` marks a node whose subtree
/// has not been loaded yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode<K> {
    pub key: K,
    #[serde(default)]
    pub children: Option<Vec<RawNode<K>>>,
    #[serde(default)]
    pub is_leaf: Option<bool>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, rename = "type")]
    pub node_type: NodeType,
}

impl<K> RawNode<K> {
    pub fn leaf(key: K) -> Self {
        Self {
            key,
            children: None,
            is_leaf: None,
            disabled: false,
            node_type: NodeType::Normal,
        }
    }

    pub fn branch(key: K, children: Vec<RawNode<K>>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(key)
        }
    }

    /// Internal node whose children are not known yet.
    pub fn not_loaded(key: K) -> Self {
        Self {
            is_leaf: Some(false),
            ..Self::leaf(key)
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn group(mut self) -> Self {
        self.node_type = NodeType::Group;
        self
    }

    pub fn ghost(mut self) -> Self {
        self.node_type = NodeType::Ghost;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf.unwrap_or(self.children.is_none())
    }

    /// Declared internal but carrying no children list.
    pub fn is_explicitly_not_loaded(&self) -> bool {
        self.is_leaf == Some(false) && self.children.is_none()
    }
}

/// Node stored in a [`TreeIndex`](crate::domain::TreeIndex).
#[derive(Debug, Clone)]
pub struct TreeNode<K> {
    pub key: K,
    /// Arena index of the parent, None for roots
    pub parent: Option<Index>,
    /// Arena indices of the children, None when not shallow-loaded
    pub children: Option<Vec<Index>>,
    pub disabled: bool,
    pub is_leaf: bool,
    pub is_group: bool,
    pub is_ghost: bool,
    pub shallow_loaded: bool,
    /// The payload declared an unknown subtree extent
    pub not_loaded: bool,
    /// Depth from the root (root = 0)
    pub level: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_raw_node_without_children_when_classified_then_is_leaf() {
        let node = RawNode::leaf("a");
        assert!(node.is_leaf());
        assert!(!node.is_explicitly_not_loaded());
    }

    #[test]
    fn given_internal_node_without_children_when_classified_then_not_loaded() {
        let node = RawNode::not_loaded("a");
        assert!(!node.is_leaf());
        assert!(node.is_explicitly_not_loaded());
    }

    #[test]
    fn given_empty_children_when_classified_then_is_internal() {
        let node = RawNode::branch("a", vec![]);
        assert!(!node.is_leaf());
        assert!(!node.is_explicitly_not_loaded());
    }

    #[test]
    fn given_toml_record_when_deserialized_then_reads_flags() {
        let raw: RawNode<String> = toml::from_str(
            r#"
key = "root"
type = "group"

[[children]]
key = "a"
disabled = true

[[children]]
key = "b"
is_leaf = false
"#,
        )
        .unwrap();
        assert_eq!(raw.node_type, NodeType::Group);
        let children = raw.children.unwrap();
        assert!(children[0].disabled);
        assert!(children[1].is_explicitly_not_loaded());
    }
}
