//! Tests for the layout tree.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Root split (horizontal) with leaves for tabs a, b, c.
fn three_leaves() -> (LayoutTree, Vec<NodeId>) {
    let mut tree = LayoutTree::new();
    let a = tree.attach_root("a").unwrap();
    let b = tree
        .split_leaf(&a, Direction::Horizontal, "b", Position::After)
        .unwrap();
    let root = tree.root().cloned().unwrap();
    let c = tree.insert_leaf(&root, 2, "c", RatioPolicy::Equalize).unwrap();
    (tree, vec![a, b, c])
}

fn ratios_of(tree: &LayoutTree, split_id: &str) -> Vec<f64> {
    match tree.node(split_id) {
        Some(LayoutNode::Split { ratios, .. }) => ratios.clone(),
        other => panic!("expected split, got {other:?}"),
    }
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
    }
}

#[test]
fn empty_tree_is_valid() {
    let tree = LayoutTree::new();
    assert!(tree.is_empty());
    assert!(tree.leaves().is_empty());
    assert!(tree.validate().is_ok());
}

#[test]
fn attach_root_only_on_empty_tree() {
    let mut tree = LayoutTree::new();
    let leaf = tree.attach_root("a").unwrap();
    assert_eq!(tree.root(), Some(&leaf));
    assert!(leaf.starts_with("pane-"));
    assert_eq!(tree.attach_root("b"), Err(LayoutError::NotEmpty));
}

#[test]
fn split_after_keeps_existing_first() {
    let mut tree = LayoutTree::new();
    let a = tree.attach_root("a").unwrap();
    let b = tree
        .split_leaf(&a, Direction::Vertical, "b", Position::After)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["a", "b"]);
    let root = tree.root().cloned().unwrap();
    assert!(root.starts_with("split-"));
    assert_eq!(tree.parent_of(&a), Some(&root));
    assert_eq!(tree.parent_of(&b), Some(&root));
    assert_close(&ratios_of(&tree, &root), &[0.5, 0.5]);
    tree.validate().unwrap();
}

#[test]
fn split_before_puts_new_leaf_first() {
    let mut tree = LayoutTree::new();
    let a = tree.attach_root("a").unwrap();
    tree.split_leaf(&a, Direction::Horizontal, "b", Position::Before)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["b", "a"]);
}

#[test]
fn split_nested_leaf_keeps_parent_slot() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    tree.resize(&root, &[0.2, 0.3, 0.5]).unwrap();
    let d = tree
        .split_leaf(&leaves[1], Direction::Vertical, "d", Position::After)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["a", "b", "d", "c"]);
    assert_close(&ratios_of(&tree, &root), &[0.2, 0.3, 0.5]);
    let inner = tree.parent_of(&d).cloned().unwrap();
    assert_eq!(tree.parent_of(&inner), Some(&root));
    tree.validate().unwrap();
}

#[test]
fn split_rejects_placed_tab_and_leaves_tree_unchanged() {
    let (mut tree, leaves) = three_leaves();
    let before = tree.clone();
    let err = tree
        .split_leaf(&leaves[0], Direction::Horizontal, "b", Position::After)
        .unwrap_err();
    assert_eq!(err, LayoutError::TabAlreadyPlaced("b".into()));
    assert_eq!(tree, before);
}

#[test]
fn split_rejects_non_leaf() {
    let (mut tree, _) = three_leaves();
    let root = tree.root().cloned().unwrap();
    let err = tree
        .split_leaf(&root, Direction::Horizontal, "z", Position::After)
        .unwrap_err();
    assert_eq!(err, LayoutError::NotALeaf(root));
    assert!(matches!(
        tree.split_leaf("nope", Direction::Horizontal, "z", Position::After),
        Err(LayoutError::NodeNotFound(_))
    ));
}

#[test]
fn removing_one_of_two_leaves_promotes_sibling_to_root() {
    let mut tree = LayoutTree::new();
    let a = tree.attach_root("a").unwrap();
    let b = tree
        .split_leaf(&a, Direction::Horizontal, "b", Position::After)
        .unwrap();
    assert_eq!(tree.remove_leaf(&a).unwrap(), "a");
    assert_eq!(tree.root(), Some(&b));
    assert_eq!(tree.node(&b), Some(&LayoutNode::Leaf { tab_id: "b".into() }));
    assert_eq!(tree.parent_of(&b), None);
    assert_eq!(tree.node_count(), 1);
    tree.validate().unwrap();
}

#[test]
fn removing_root_leaf_empties_tree() {
    let mut tree = LayoutTree::new();
    let a = tree.attach_root("a").unwrap();
    assert_eq!(tree.remove_leaf(&a).unwrap(), "a");
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
}

#[test]
fn remove_renormalizes_proportionally() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    tree.resize(&root, &[0.5, 0.3, 0.2]).unwrap();
    tree.remove_leaf(&leaves[0]).unwrap();
    assert_close(&ratios_of(&tree, &root), &[0.6, 0.4]);
    assert_eq!(tree.tab_ids(), vec!["b", "c"]);
}

#[test]
fn remove_collapses_nested_split_into_grandparent_slot() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    tree.resize(&root, &[0.2, 0.3, 0.5]).unwrap();
    let d = tree
        .split_leaf(&leaves[1], Direction::Vertical, "d", Position::After)
        .unwrap();
    tree.remove_leaf(&d).unwrap();
    assert_eq!(tree.tab_ids(), vec!["a", "b", "c"]);
    assert_eq!(tree.parent_of(&leaves[1]), Some(&root));
    assert_close(&ratios_of(&tree, &root), &[0.2, 0.3, 0.5]);
    assert_eq!(tree.node_count(), 4);
    tree.validate().unwrap();
}

#[test]
fn remove_rejects_split() {
    let (mut tree, _) = three_leaves();
    let root = tree.root().cloned().unwrap();
    assert_eq!(tree.remove_leaf(&root), Err(LayoutError::NotALeaf(root)));
}

#[test]
fn resize_with_wrong_length_is_rejected_and_unchanged() {
    let (mut tree, _) = three_leaves();
    let root = tree.root().cloned().unwrap();
    let before = ratios_of(&tree, &root);
    let err = tree.resize(&root, &[0.5, 0.3]).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidRatios(_)));
    assert_eq!(ratios_of(&tree, &root), before);
}

#[test]
fn resize_rejects_non_positive_and_bad_sums() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    for bad in [
        vec![0.5, 0.5, 0.0],
        vec![1.2, -0.1, -0.1],
        vec![0.3, 0.3, 0.3],
        vec![f64::NAN, 0.5, 0.5],
    ] {
        assert!(matches!(
            tree.resize(&root, &bad),
            Err(LayoutError::InvalidRatios(_))
        ));
    }
    assert!(matches!(
        tree.resize(&leaves[0], &[1.0]),
        Err(LayoutError::NotASplit(_))
    ));
}

#[test]
fn resize_normalizes_within_tolerance() {
    let (mut tree, _) = three_leaves();
    let root = tree.root().cloned().unwrap();
    tree.resize(&root, &[0.25, 0.25, 0.5000005]).unwrap();
    let sum: f64 = ratios_of(&tree, &root).iter().sum();
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn move_within_parent_reorders_in_place() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    tree.resize(&root, &[0.5, 0.3, 0.2]).unwrap();
    tree.move_leaf(&leaves[0], &root, 2, RatioPolicy::Preserve)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["b", "c", "a"]);
    assert_close(&ratios_of(&tree, &root), &[0.3, 0.2, 0.5]);

    tree.move_leaf(&leaves[0], &root, 0, RatioPolicy::Equalize)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["a", "b", "c"]);
    assert_close(&ratios_of(&tree, &root), &[1.0 / 3.0; 3]);
}

#[test]
fn move_into_other_split_preserves_shares() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    let d = tree
        .split_leaf(&leaves[2], Direction::Vertical, "d", Position::After)
        .unwrap();
    let inner = tree.parent_of(&d).cloned().unwrap();
    tree.move_leaf(&leaves[0], &inner, 1, RatioPolicy::Preserve)
        .unwrap();
    assert_eq!(tree.tab_ids(), vec!["b", "c", "a", "d"]);
    assert_close(&ratios_of(&tree, &inner), &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
    assert_close(&ratios_of(&tree, &root), &[0.5, 0.5]);
    tree.validate().unwrap();
}

#[test]
fn move_collapses_source_split() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    let d = tree
        .split_leaf(&leaves[0], Direction::Vertical, "d", Position::After)
        .unwrap();
    let inner = tree.parent_of(&d).cloned().unwrap();
    tree.move_leaf(&d, &root, 3, RatioPolicy::Equalize).unwrap();
    assert!(!tree.contains(&inner));
    assert_eq!(tree.parent_of(&leaves[0]), Some(&root));
    assert_eq!(tree.tab_ids(), vec!["a", "b", "c", "d"]);
    assert_close(&ratios_of(&tree, &root), &[0.25; 4]);
    tree.validate().unwrap();
}

#[test]
fn invalid_moves_leave_tree_unchanged() {
    let (mut tree, leaves) = three_leaves();
    let root = tree.root().cloned().unwrap();
    let before = tree.clone();

    assert!(matches!(
        tree.move_leaf(&leaves[0], &root, 3, RatioPolicy::Equalize),
        Err(LayoutError::InvalidMove(_))
    ));
    assert!(matches!(
        tree.move_leaf(&leaves[0], &leaves[1], 0, RatioPolicy::Equalize),
        Err(LayoutError::InvalidMove(_))
    ));
    assert!(matches!(
        tree.move_leaf(&leaves[0], "missing", 0, RatioPolicy::Equalize),
        Err(LayoutError::NodeNotFound(_))
    ));
    assert_eq!(tree, before);

    let mut single = LayoutTree::new();
    let only = single.attach_root("x").unwrap();
    let err = single
        .move_leaf(&only, &only, 0, RatioPolicy::Equalize)
        .unwrap_err();
    assert!(matches!(err, LayoutError::InvalidMove(_)));
}

#[test]
fn leaf_lookup_and_cyclic_neighbors() {
    let (tree, leaves) = three_leaves();
    assert_eq!(tree.leaf_for_tab("b"), Some(leaves[1].clone()));
    assert_eq!(tree.leaf_for_tab("zzz"), None);
    assert_eq!(tree.next_leaf(&leaves[2]), Some(leaves[0].clone()));
    assert_eq!(tree.prev_leaf(&leaves[0]), Some(leaves[2].clone()));
    assert_eq!(tree.leaf_count(), 3);

    let mut single = LayoutTree::new();
    let only = single.attach_root("x").unwrap();
    assert_eq!(single.next_leaf(&only), None);
}

#[test]
fn validate_catches_malformed_trees() {
    let lonely_split = LayoutTree::from_parts(
        Some("s".into()),
        vec![
            (
                "s".into(),
                LayoutNode::Split {
                    direction: Direction::Horizontal,
                    children: vec!["l".into()],
                    ratios: vec![1.0],
                },
                None,
            ),
            ("l".into(), LayoutNode::Leaf { tab_id: "t".into() }, Some("s".into())),
        ],
    )
    .unwrap();
    assert!(matches!(
        lonely_split.validate(),
        Err(LayoutError::Inconsistent(_))
    ));

    let twice = LayoutTree::from_parts(
        Some("s".into()),
        vec![
            (
                "s".into(),
                LayoutNode::Split {
                    direction: Direction::Horizontal,
                    children: vec!["l1".into(), "l2".into()],
                    ratios: vec![0.5, 0.5],
                },
                None,
            ),
            ("l1".into(), LayoutNode::Leaf { tab_id: "t".into() }, Some("s".into())),
            ("l2".into(), LayoutNode::Leaf { tab_id: "t".into() }, Some("s".into())),
        ],
    )
    .unwrap();
    assert_eq!(twice.validate(), Err(LayoutError::TabAlreadyPlaced("t".into())));

    let bad_ratios = LayoutTree::from_parts(
        Some("s".into()),
        vec![
            (
                "s".into(),
                LayoutNode::Split {
                    direction: Direction::Vertical,
                    children: vec!["l1".into(), "l2".into()],
                    ratios: vec![0.7, 0.7],
                },
                None,
            ),
            ("l1".into(), LayoutNode::Leaf { tab_id: "a".into() }, Some("s".into())),
            ("l2".into(), LayoutNode::Leaf { tab_id: "b".into() }, Some("s".into())),
        ],
    )
    .unwrap();
    assert!(matches!(
        bad_ratios.validate(),
        Err(LayoutError::InvalidRatios(_))
    ));

    let orphan = LayoutTree::from_parts(
        Some("l1".into()),
        vec![
            ("l1".into(), LayoutNode::Leaf { tab_id: "a".into() }, None),
            ("l2".into(), LayoutNode::Leaf { tab_id: "b".into() }, None),
        ],
    )
    .unwrap();
    assert!(matches!(orphan.validate(), Err(LayoutError::Inconsistent(_))));

    let dup = LayoutTree::from_parts(
        None,
        vec![
            ("x".into(), LayoutNode::Leaf { tab_id: "a".into() }, None),
            ("x".into(), LayoutNode::Leaf { tab_id: "b".into() }, None),
        ],
    );
    assert!(dup.is_err());
}

fn split_ids(tree: &LayoutTree) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = tree
        .nodes
        .iter()
        .filter(|(_, e)| !e.node.is_leaf())
        .map(|(id, _)| id.clone())
        .collect();
    ids.sort();
    ids
}

#[test]
fn random_operation_sequences_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x0a1);
    let mut tree = LayoutTree::new();
    let mut live: HashSet<TabId> = HashSet::new();
    let mut next_tab = 0u32;

    for _ in 0..3000 {
        let leaves = tree.leaves();
        if leaves.is_empty() {
            let tab = format!("t{next_tab}");
            next_tab += 1;
            tree.attach_root(tab.clone()).unwrap();
            live.insert(tab);
            continue;
        }
        let snapshot = tree.clone();
        let (leaf_id, _) = leaves[rng.gen_range(0..leaves.len())].clone();
        let splits = split_ids(&tree);

        let result = match rng.gen_range(0..5) {
            0 => {
                let tab = format!("t{next_tab}");
                next_tab += 1;
                let dir = if rng.gen_bool(0.5) {
                    Direction::Horizontal
                } else {
                    Direction::Vertical
                };
                let pos = if rng.gen_bool(0.5) {
                    Position::Before
                } else {
                    Position::After
                };
                tree.split_leaf(&leaf_id, dir, tab.clone(), pos).map(|_| {
                    live.insert(tab);
                })
            }
            1 => tree.remove_leaf(&leaf_id).map(|tab| {
                assert!(live.remove(&tab));
            }),
            2 if !splits.is_empty() => {
                let dest = &splits[rng.gen_range(0..splits.len())];
                let len = match tree.node(dest) {
                    Some(LayoutNode::Split { children, .. }) => children.len(),
                    _ => unreachable!(),
                };
                let index = rng.gen_range(0..=len + 1);
                let policy = if rng.gen_bool(0.5) {
                    RatioPolicy::Preserve
                } else {
                    RatioPolicy::Equalize
                };
                tree.move_leaf(&leaf_id, dest, index, policy)
            }
            3 if !splits.is_empty() => {
                let split = &splits[rng.gen_range(0..splits.len())];
                let len = match tree.node(split) {
                    Some(LayoutNode::Split { children, .. }) => children.len(),
                    _ => unreachable!(),
                };
                let raw: Vec<f64> = (0..len).map(|_| rng.gen_range(0.05..1.0)).collect();
                let sum: f64 = raw.iter().sum();
                let ratios: Vec<f64> = raw.iter().map(|r| r / sum).collect();
                tree.resize(split, &ratios)
            }
            _ if !splits.is_empty() => {
                let tab = format!("t{next_tab}");
                next_tab += 1;
                let split = &splits[rng.gen_range(0..splits.len())];
                let len = match tree.node(split) {
                    Some(LayoutNode::Split { children, .. }) => children.len(),
                    _ => unreachable!(),
                };
                tree.insert_leaf(split, rng.gen_range(0..=len), tab.clone(), RatioPolicy::Preserve)
                    .map(|_| {
                        live.insert(tab);
                    })
            }
            _ => Ok(()),
        };

        if result.is_err() {
            assert_eq!(tree, snapshot, "failed op mutated the tree: {result:?}");
        }
        tree.validate().unwrap();

        let placed: HashSet<TabId> = tree.tab_ids().into_iter().collect();
        assert_eq!(placed, live);
        for entry in tree.nodes.values() {
            if let LayoutNode::Split {
                children, ratios, ..
            } = &entry.node
            {
                assert!(children.len() >= 2);
                assert_eq!(children.len(), ratios.len());
                let sum: f64 = ratios.iter().sum();
                assert!((sum - 1.0).abs() <= 1e-9);
            }
        }
    }
}
