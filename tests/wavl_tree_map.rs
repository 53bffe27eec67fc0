use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wavl_tree::{Error, NodeRef, Position, WavlTreeMap};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys are drawn from a range smaller than `TEST_SIZE` so duplicates and misses are common.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Structural checks through the public node view ──────────────────────────

/// Checks the rank rule, subtree sizes, parent links and local key order below `node`,
/// and returns the subtree size.
fn check_subtree(node: NodeRef<'_, i64, i64>) -> usize {
    for diff in [node.left_rank_difference(), node.right_rank_difference()] {
        assert!(
            (1..=2).contains(&diff),
            "rank difference {diff} below key {} (rank {})",
            node.key(),
            node.rank()
        );
    }
    if node.is_leaf() {
        assert_eq!(node.rank(), 0, "leaf {} has non-zero rank", node.key());
    }

    let mut size = 1;
    if let Some(left) = node.left() {
        assert!(left.key() < node.key());
        assert_eq!(left.parent(), Some(node));
        size += check_subtree(left);
    }
    if let Some(right) = node.right() {
        assert!(right.key() > node.key());
        assert_eq!(right.parent(), Some(node));
        size += check_subtree(right);
    }
    assert_eq!(node.size(), size, "stored size of {} is stale", node.key());
    size
}

fn check_tree(map: &WavlTreeMap<i64, i64>) {
    match map.root() {
        None => assert!(map.is_empty()),
        Some(root) => {
            assert!(root.parent().is_none());
            assert_eq!(check_subtree(root), map.len());
        }
    }
    let bound = 2 * (map.len() + 1).ilog2() as usize + 1;
    assert!(map.height() <= bound, "height {} exceeds {bound} for {} keys", map.height(), map.len());
}

fn map_from(keys: &[i64]) -> WavlTreeMap<i64, i64> {
    let mut map = WavlTreeMap::new();
    for &key in keys {
        map.insert(key, key * 10).expect("keys are distinct");
    }
    map
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Delete(i64),
    Search(i64),
    ContainsKey(i64),
    Min,
    Max,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Delete),
        2 => key_strategy().prop_map(MapOp::Search),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both WavlTreeMap and BTreeMap and
    /// checks identical results and a valid tree at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut wavl: WavlTreeMap<i64, i64> = WavlTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    let result = wavl.insert(k, v);
                    if model.contains_key(&k) {
                        prop_assert_eq!(result, Err(Error::DuplicateKey));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(k, v);
                    }
                }
                MapOp::Delete(k) => {
                    let result = wavl.delete(&k);
                    if model.remove(&k).is_some() {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert_eq!(result, Err(Error::KeyNotFound));
                    }
                }
                MapOp::Search(k) => prop_assert_eq!(wavl.search(&k), model.get(&k)),
                MapOp::ContainsKey(k) => prop_assert_eq!(wavl.contains_key(&k), model.contains_key(&k)),
                MapOp::Min => prop_assert_eq!(wavl.min(), model.values().next()),
                MapOp::Max => prop_assert_eq!(wavl.max(), model.values().next_back()),
            }
            prop_assert_eq!(wavl.len(), model.len());
            prop_assert_eq!(wavl.is_empty(), model.is_empty());
            check_tree(&wavl);
        }

        prop_assert_eq!(wavl.keys_to_vec(), model.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(wavl.values_to_vec(), model.values().copied().collect::<Vec<_>>());
    }

    /// Every insert and delete reports a bounded amount of rebalancing work.
    #[test]
    fn rebalancing_counts_are_bounded(keys in proptest::collection::btree_set(key_strategy(), 1..500)) {
        let keys: Vec<i64> = keys.into_iter().collect();
        let mut map = WavlTreeMap::new();
        let height_bound = 2 * (keys.len() + 1).ilog2() as usize + 1;

        for &key in keys.iter().rev() {
            let ops = map.insert(key, key).expect("keys are distinct");
            // Promotions climb at most one path, then at most one double rotation.
            prop_assert!(ops <= height_bound + 5);
        }
        for key in &keys {
            let ops = map.delete(key).expect("present");
            prop_assert!(ops <= 2 * height_bound + 6);
        }
        prop_assert!(map.is_empty());
    }

    /// Inserting a fresh key and deleting it again leaves the same key set.
    #[test]
    fn insert_then_delete_round_trips(
        keys in proptest::collection::btree_set(key_strategy(), 0..300),
        extra in key_strategy(),
    ) {
        let keys: Vec<i64> = keys.into_iter().filter(|&k| k != extra).collect();
        let mut map = map_from(&keys);

        map.insert(extra, 0).expect("fresh key");
        map.delete(&extra).expect("present");

        check_tree(&map);
        prop_assert_eq!(map.keys_to_vec(), keys);
    }
}

// ─── Order-statistic operations (compared against Vec) ───────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn select_matches_sorted_vec(
        keys in proptest::collection::vec(key_strategy(), 0..500),
        deletes in proptest::collection::vec(key_strategy(), 0..200),
    ) {
        let mut map = WavlTreeMap::new();
        let mut model = BTreeMap::new();
        for key in keys {
            if map.insert(key, key * 10).is_ok() {
                model.insert(key, key * 10);
            }
        }
        for key in deletes {
            if map.delete(&key).is_ok() {
                model.remove(&key);
            }
        }

        let sorted: Vec<(i64, i64)> = model.into_iter().collect();
        for (i, (key, value)) in sorted.iter().enumerate() {
            prop_assert_eq!(map.select(i + 1), Some(value));
            prop_assert_eq!(map.select_key_value(i + 1), Some((key, value)));
            prop_assert_eq!(map.rank_of(key), Some(i + 1));
            prop_assert_eq!(map[Position(i + 1)], *value);
        }
        prop_assert_eq!(map.select(0), None);
        prop_assert_eq!(map.select(sorted.len() + 1), None);
    }
}

// ─── Usage scenarios ─────────────────────────────────────────────────────────

#[test]
fn three_inserts_then_delete_root_key() {
    let mut map = WavlTreeMap::new();
    map.insert(10, "a").unwrap();
    map.insert(5, "b").unwrap();
    map.insert(15, "c").unwrap();

    assert_eq!(map.keys_to_vec(), [5, 10, 15]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.min(), Some(&"b"));
    assert_eq!(map.max(), Some(&"c"));
    assert_eq!(map.select(2), Some(&"a"));

    map.delete(&10).unwrap();

    assert_eq!(map.keys_to_vec(), [5, 15]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.min(), Some(&"b"));
    assert_eq!(map.max(), Some(&"c"));
}

#[test]
fn deleting_only_key_empties_map() {
    let mut map = WavlTreeMap::new();
    map.insert(10, "a").unwrap();
    map.delete(&10).unwrap();

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert!(map.root().is_none());
    assert_eq!(map.min(), None);
    assert_eq!(map.max(), None);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut map = WavlTreeMap::new();
    assert_eq!(map.insert(5, "x"), Ok(0));
    assert_eq!(map.insert(5, "x"), Err(Error::DuplicateKey));
    assert_eq!(map.len(), 1);
    assert_eq!(map.search(&5), Some(&"x"));
}

#[test]
fn missing_delete_leaves_map_unchanged() {
    let mut map = map_from(&[40, 20, 60, 10, 30, 50, 70]);
    let before = format!("{map:?}");
    let height = map.height();

    assert_eq!(map.delete(&99), Err(Error::KeyNotFound));

    assert_eq!(format!("{map:?}"), before);
    assert_eq!(map.height(), height);
    assert_eq!(map.len(), 7);
    check_tree(&map);
}

// ─── Rebalancing counts ──────────────────────────────────────────────────────

#[test]
fn ascending_inserts_report_promotions_and_rotations() {
    let mut map = WavlTreeMap::new();
    let costs: Vec<usize> = (1..=5).map(|k| map.insert(k, k).unwrap()).collect();
    assert_eq!(costs, [0, 1, 3, 2, 3]);
    check_tree(&map);
}

#[test]
fn zig_zag_insert_reports_double_rotation() {
    let mut map = WavlTreeMap::new();
    let costs: Vec<usize> = [3, 1, 2].into_iter().map(|k| map.insert(k, k).unwrap()).collect();
    assert_eq!(costs, [0, 1, 6]);

    let root = map.root().unwrap();
    assert_eq!(*root.key(), 2);
    assert_eq!(root.rank(), 1);
    assert_eq!(root.size(), 3);
}

#[test]
fn delete_counts_follow_the_case() {
    // Single rotation.
    let mut map = map_from(&[1, 2, 3, 4, 5]);
    assert_eq!(map.delete(&1), Ok(3));
    check_tree(&map);

    // Double rotation.
    let mut map = map_from(&[2, 1, 4, 3]);
    assert_eq!(map.delete(&1), Ok(5));
    assert_eq!(map.root().map(|root| *root.key()), Some(3));
    check_tree(&map);

    // Splicing out a node with one child.
    let mut map = map_from(&[1, 2]);
    assert_eq!(map.delete(&1), Ok(1));
    check_tree(&map);
}

// ─── Shape ───────────────────────────────────────────────────────────────────

#[test]
fn sequential_inserts_stay_balanced() {
    let mut map = WavlTreeMap::with_capacity(4096);
    for key in 0..4096 {
        map.insert(key, key).unwrap();
    }
    check_tree(&map);
    assert!(map.height() <= 2 * 4097usize.ilog2() as usize + 1);

    for key in (0..4096).step_by(2) {
        map.delete(&key).unwrap();
    }
    check_tree(&map);
    assert_eq!(map.len(), 2048);
    assert_eq!(map.select(1), Some(&1));
    assert_eq!(map.rank_of(&4095), Some(2048));
}

#[test]
fn clone_and_clear_are_independent() {
    let mut map = map_from(&[3, 1, 2]);
    let copy = map.clone();
    map.clear();

    assert!(map.is_empty());
    assert_eq!(copy.keys_to_vec(), [1, 2, 3]);
    check_tree(&copy);
}

// ─── Out-of-bounds Position indexing panic tests ─────────────────────────────

#[test]
#[should_panic(expected = "position out of bounds")]
fn index_past_len_panics() {
    let map = map_from(&[1, 2, 3]);
    let _ = map[Position(4)];
}

#[test]
#[should_panic(expected = "position out of bounds")]
fn index_empty_map_panics() {
    let map: WavlTreeMap<i64, i64> = WavlTreeMap::new();
    let _ = map[Position(1)];
}
