use rstest::{fixture, rstest};

use treecheck::{get_path, DomainError, PathOptions, RawNode, TreeIndex, TreeIndexBuilder};

/// docs (group)
/// ├── guide
/// │   ├── intro
/// │   └── setup
/// └── api (not loaded)
/// notes
#[fixture]
fn forest() -> TreeIndex<&'static str> {
    TreeIndexBuilder::new()
        .build(vec![
            RawNode::branch(
                "docs",
                vec![
                    RawNode::branch("guide", vec![RawNode::leaf("intro"), RawNode::leaf("setup")]),
                    RawNode::not_loaded("api"),
                ],
            )
            .group(),
            RawNode::leaf("notes"),
        ])
        .unwrap()
}

#[rstest]
fn given_forest_when_built_then_indexes_every_node(forest: TreeIndex<&'static str>) {
    assert_eq!(forest.len(), 6);
    assert_eq!(forest.depth(), 3);
    assert_eq!(forest.roots().map(|n| n.key).collect::<Vec<_>>(), vec!["docs", "notes"]);
    assert_eq!(
        forest.iter().map(|n| n.key).collect::<Vec<_>>(),
        vec!["docs", "guide", "intro", "setup", "api", "notes"]
    );
}

#[rstest]
#[case("docs", 0, false, true)]
#[case("guide", 1, false, true)]
#[case("intro", 2, true, true)]
#[case("api", 1, false, false)]
#[case("notes", 0, true, true)]
fn given_forest_when_inspecting_node_then_flags_derived(
    forest: TreeIndex<&'static str>,
    #[case] key: &'static str,
    #[case] level: usize,
    #[case] is_leaf: bool,
    #[case] shallow_loaded: bool,
) {
    let node = forest.get_node(&key).unwrap();
    assert_eq!(node.level, level);
    assert_eq!(node.is_leaf, is_leaf);
    assert_eq!(node.shallow_loaded, shallow_loaded);
}

#[rstest]
fn given_forest_when_listing_leaves_then_pre_order(forest: TreeIndex<&'static str>) {
    assert_eq!(forest.leaf_keys(), vec!["intro", "setup", "notes"]);
}

#[rstest]
fn given_forest_when_flattening_then_visits_all(forest: TreeIndex<&'static str>) {
    let keys: Vec<_> = forest.flatten().into_iter().map(|n| n.key).collect();
    assert_eq!(keys, vec!["docs", "guide", "intro", "setup", "api", "notes"]);
}

#[rstest]
fn given_grouped_key_when_resolving_path_then_group_optional(forest: TreeIndex<&'static str>) {
    let path = get_path(Some(&"setup"), PathOptions::default(), &forest);
    assert_eq!(path.key_path, vec!["guide", "setup"]);

    let path = get_path(Some(&"setup"), PathOptions { include_group: true }, &forest);
    assert_eq!(path.key_path, vec!["docs", "guide", "setup"]);
}

#[test]
fn given_duplicate_key_when_building_then_fails() {
    let result = TreeIndexBuilder::new().build(vec![
        RawNode::branch("a", vec![RawNode::leaf("b")]),
        RawNode::leaf("b"),
    ]);
    assert!(matches!(result, Err(DomainError::DuplicateKey(_))));
}

#[test]
fn given_empty_input_when_building_then_empty_index() {
    let index: TreeIndex<u32> = TreeIndexBuilder::new().build(Vec::new()).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.depth(), 0);
    assert!(index.flatten().is_empty());
}
