//! Depth-first linearization of tree nodes.

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::{TreeIndex, TreeKey, TreeNode};

/// Pre-order flatten of `nodes` and all of their loaded descendants.
///
/// Group and non-group subtrees are traversed the same way; leaves are never
/// descended into.
#[instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
pub fn flatten<'a, K: TreeKey>(nodes: &[&'a TreeNode<K>], index: &'a TreeIndex<K>) -> Vec<&'a TreeNode<K>> {
    flatten_with(nodes, index, |_| true)
}

/// Pre-order flatten that only descends into groups and expanded nodes.
#[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), expanded = expanded_keys.len()))]
pub fn flatten_expanded<'a, K: TreeKey>(
    nodes: &[&'a TreeNode<K>],
    expanded_keys: &HashSet<K>,
    index: &'a TreeIndex<K>,
) -> Vec<&'a TreeNode<K>> {
    flatten_with(nodes, index, |node| node.is_group || expanded_keys.contains(&node.key))
}

fn flatten_with<'a, K, F>(nodes: &[&'a TreeNode<K>], index: &'a TreeIndex<K>, descend: F) -> Vec<&'a TreeNode<K>>
where
    K: TreeKey,
    F: Fn(&TreeNode<K>) -> bool,
{
    let mut flattened = Vec::new();
    let mut stack: Vec<&TreeNode<K>> = nodes.iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        flattened.push(node);
        if node.is_leaf || !descend(node) {
            continue;
        }
        let children: Vec<_> = index.children(node).collect();
        stack.extend(children.into_iter().rev());
    }

    flattened
}

impl<K: TreeKey> TreeIndex<K> {
    /// Flattens the whole forest in pre-order.
    pub fn flatten(&self) -> Vec<&TreeNode<K>> {
        let roots: Vec<_> = self.roots().collect();
        flatten(&roots, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawNode, TreeIndexBuilder};

    // 0
    // ├── g (group)
    // │   ├── g-0
    // │   └── g-1
    // └── 1
    //     └── 1-0
    // 2 (not loaded)
    fn sample() -> TreeIndex<&'static str> {
        TreeIndexBuilder::new()
            .build(vec![
                RawNode::branch(
                    "0",
                    vec![
                        RawNode::branch("g", vec![RawNode::leaf("g-0"), RawNode::leaf("g-1")]).group(),
                        RawNode::branch("1", vec![RawNode::leaf("1-0")]),
                    ],
                ),
                RawNode::not_loaded("2"),
            ])
            .unwrap()
    }

    fn keys(nodes: Vec<&TreeNode<&'static str>>) -> Vec<&'static str> {
        nodes.into_iter().map(|n| n.key).collect()
    }

    #[test]
    fn given_forest_when_flattening_then_pre_order_through_groups() {
        let index = sample();
        assert_eq!(keys(index.flatten()), vec!["0", "g", "g-0", "g-1", "1", "1-0", "2"]);
    }

    #[test]
    fn given_subset_when_flattening_then_starts_at_given_nodes() {
        let index = sample();
        let start = vec![index.get_node(&"1").unwrap(), index.get_node(&"g-0").unwrap()];
        assert_eq!(keys(flatten(&start, &index)), vec!["1", "1-0", "g-0"]);
    }

    #[test]
    fn given_expanded_keys_when_flattening_then_only_opens_expanded_and_groups() {
        let index = sample();
        let roots: Vec<_> = index.roots().collect();
        let expanded: HashSet<_> = ["0"].into_iter().collect();
        assert_eq!(
            keys(flatten_expanded(&roots, &expanded, &index)),
            vec!["0", "g", "g-0", "g-1", "1", "2"]
        );
        let collapsed = HashSet::new();
        assert_eq!(keys(flatten_expanded(&roots, &collapsed, &index)), vec!["0", "2"]);
    }
}
