use core::borrow::Borrow;

use super::RawWavlTree;
use crate::error::Error;
use crate::raw::handle::Handle;
use crate::raw::node::{LEAF_RANK, Link, Side};
use crate::tracing_helpers::{debug_log, trace_log};

// Operation counts reported by `remove`.
const SPLICE_COST: usize = 1;
const DEMOTE_COST: usize = 1;
const DOUBLE_DEMOTE_COST: usize = 2;
const ROTATION_COST: usize = 3;
const ROTATION_TO_LEAF_COST: usize = 4;
const DOUBLE_ROTATION_COST: usize = 5;

/// A removed entry together with the rebalancing work it caused.
#[derive(Debug)]
pub(crate) struct Removed<K, V> {
    pub(crate) entry: (K, V),
    pub(crate) ops: usize,
}

impl<K: Ord, V> RawWavlTree<K, V> {
    /// Removes `key` and rebalances.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<Removed<K, V>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(target) = self.search(key) else {
            debug_log!("remove: key not found");
            return Err(Error::KeyNotFound);
        };

        if self.min == Some(target) {
            self.min = self.successor(target);
        }
        if self.max == Some(target) {
            self.max = self.predecessor(target);
        }

        let (left, right, parent) = {
            let node = self.node(target);
            (node.left(), node.right(), node.parent())
        };

        let (cost, start) = match (left, right) {
            (Link::External, Link::External) => {
                self.replace_child(parent, target, Link::External);
                (0, parent)
            }
            (Link::Internal(child), Link::External) | (Link::External, Link::Internal(child)) => {
                self.replace_child(parent, target, Link::Internal(child));
                self.reset_leaf_rank(child);
                (SPLICE_COST, parent)
            }
            (Link::Internal(_), Link::Internal(right)) => {
                let successor = self.extreme(right, Side::Left);
                let successor_parent = self.node(successor).parent();
                self.relocate(target, successor);
                let start = if successor_parent == Some(target) {
                    Some(successor)
                } else {
                    successor_parent
                };
                (SPLICE_COST, start)
            }
        };

        if let Some(start) = start {
            self.update_sizes_to_root(start);
        }
        let ops = cost + self.rebalance_after_remove(start);

        let entry = self.nodes.take(target).into_entry();
        debug_log!(ops, "remove");
        Ok(Removed { entry, ops })
    }
}

impl<K, V> RawWavlTree<K, V> {
    /// Moves `successor` (the leftmost node of `target`'s right subtree) into `target`'s
    /// position. It inherits `target`'s rank and children; its own right child takes its
    /// old slot.
    fn relocate(&mut self, target: Handle, successor: Handle) {
        debug_assert!(self.node(successor).left().is_external());

        let successor_parent = self.node(successor).parent();
        let successor_right = self.node(successor).right();
        self.replace_child(successor_parent, successor, successor_right);

        // Read after the detach: when `successor` was `target`'s right child the slot now
        // holds `successor_right`.
        let (rank, left, right, parent) = {
            let node = self.node(target);
            (node.rank(), node.left(), node.right(), node.parent())
        };

        let node = self.node_mut(successor);
        node.set_rank(rank);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, right);
        for child in [left, right] {
            if let Link::Internal(child) = child {
                self.node_mut(child).set_parent(Some(successor));
            }
        }
        self.replace_child(parent, target, Link::Internal(successor));
        self.reset_leaf_rank(successor);
    }

    /// The side on which `handle` is a 3-child, if any.
    fn violating_side(&self, handle: Handle) -> Option<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| self.rank_diff(handle, side) == 3)
    }

    /// Demote/rotate cascade. `start` is the lowest node whose child subtree lost a rank.
    fn rebalance_after_remove(&mut self, start: Option<Handle>) -> usize {
        let mut ops = 0;
        let mut current = start;

        while let Some(node) = current {
            let parent = self.node(node).parent();

            // A leaf must be 1,1. It can only be off by one: 2,2.
            if self.node(node).is_leaf() {
                if self.node(node).rank() == LEAF_RANK {
                    break;
                }
                debug_assert_eq!(self.rank_diff(node, Side::Left), 2);
                self.node_mut(node).demote();
                trace_log!("remove: demote leaf");
                ops += DEMOTE_COST;
                current = parent;
                continue;
            }

            let Some(short) = self.violating_side(node) else {
                break;
            };
            let long = short.opposite();

            // 3,2: demote and move up.
            if self.rank_diff(node, long) == 2 {
                self.node_mut(node).demote();
                trace_log!(rank = self.node(node).rank(), "remove: demote");
                ops += DEMOTE_COST;
                current = parent;
                continue;
            }

            // 3,1: look at the sibling on the 1 side.
            let sibling = self
                .node(node)
                .child(long)
                .handle()
                .expect("remove: a 1-child of a 3,1 node is internal");

            if self.rank_diff(sibling, Side::Left) == 2 && self.rank_diff(sibling, Side::Right) == 2 {
                self.node_mut(sibling).demote();
                self.node_mut(node).demote();
                trace_log!(rank = self.node(node).rank(), "remove: double demote");
                ops += DOUBLE_DEMOTE_COST;
                current = parent;
                continue;
            }

            if self.rank_diff(sibling, long) == 1 {
                self.single_rotate(sibling);
                self.node_mut(sibling).promote();
                if self.node(node).is_leaf() {
                    self.node_mut(node).set_rank(LEAF_RANK);
                    return ops + ROTATION_TO_LEAF_COST;
                }
                return ops + ROTATION_COST;
            }

            // The sibling's 1-child is on the inside: lift it two levels. It ends with
            // `node`'s old rank and `node` drops two.
            let inner = self
                .node(sibling)
                .child(short)
                .handle()
                .expect("remove: the inner 1-child is internal");
            self.double_rotate(inner);
            self.node_mut(inner).promote();
            self.node_mut(node).demote();
            return ops + DOUBLE_ROTATION_COST;
        }

        ops
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::tests::tree_from;
    use crate::error::Error;

    #[test]
    fn removing_last_node_empties_tree() {
        let mut tree = tree_from(&[10]);
        let removed = tree.remove(&10).expect("present");
        assert_eq!(removed.entry, (10, 20));
        assert_eq!(removed.ops, 0);
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert!(tree.first_key_value().is_none());
    }

    #[test]
    fn missing_key_is_rejected_without_mutation() {
        let mut tree = tree_from(&[5, 3, 8]);
        assert_eq!(tree.remove(&99).map(|r| r.ops), Err(Error::KeyNotFound));
        tree.validate_invariants();
        assert_eq!(tree.keys_to_vec(), [3, 5, 8]);
    }

    #[test]
    fn leaf_under_1_2_parent_needs_no_work() {
        let mut tree = tree_from(&[1, 2, 3]);
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(0));
        tree.validate_invariants();
    }

    #[test]
    fn leaf_parent_left_2_2_is_demoted() {
        let mut tree = tree_from(&[1, 2, 3]);
        tree.remove(&1).expect("present");
        assert_eq!(tree.remove(&3).map(|r| r.ops), Ok(1));
        tree.validate_invariants();
        let root = tree.root().expect("non-empty");
        assert_eq!(tree.node(root).rank(), 0);
    }

    #[test]
    fn unary_node_is_spliced() {
        let mut tree = tree_from(&[1, 2]);
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(1));
        tree.validate_invariants();
        assert_eq!(tree.keys_to_vec(), [2]);
        assert_eq!(tree.first_key_value(), Some((&2, &4)));
    }

    #[test]
    fn binary_node_takes_adjacent_successor() {
        let mut tree = tree_from(&[1, 2, 3]);
        let successor = tree.search(&3).expect("present");

        assert_eq!(tree.remove(&2).map(|r| r.ops), Ok(1));

        tree.validate_invariants();
        // The successor node is reused in place rather than reallocated.
        assert_eq!(tree.root(), Some(successor));
        assert_eq!(tree.node(successor).rank(), 1);
    }

    #[test]
    fn binary_node_takes_deep_successor() {
        // 2 (rank 2) over 1 and 4; 4 over 3 and 5.
        let mut tree = tree_from(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.remove(&2).map(|r| r.ops), Ok(1));
        tree.validate_invariants();
        assert_eq!(tree.keys_to_vec(), [1, 3, 4, 5]);
        let root = tree.root().expect("non-empty");
        assert_eq!(*tree.node(root).key(), 3);
    }

    #[test]
    fn single_rotation_on_3_1_node() {
        let mut tree = tree_from(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(3));
        tree.validate_invariants();
        let root = tree.root().expect("non-empty");
        assert_eq!(*tree.node(root).key(), 4);
    }

    #[test]
    fn single_rotation_that_leaves_a_leaf() {
        // 2 (rank 2) over 1 and 3 (rank 1); 3 over nothing and 4.
        let mut tree = tree_from(&[2, 1, 3, 4]);
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(4));
        tree.validate_invariants();
        let two = tree.search(&2).expect("present");
        assert_eq!(tree.node(two).rank(), 0);
    }

    #[test]
    fn double_rotation_on_3_1_node() {
        // 2 (rank 2) over 1 and 4 (rank 1); 4 over 3 and nothing.
        let mut tree = tree_from(&[2, 1, 4, 3]);
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(5));
        tree.validate_invariants();
        let root = tree.root().expect("non-empty");
        assert_eq!(*tree.node(root).key(), 3);
        assert_eq!(tree.node(root).rank(), 2);
    }

    #[test]
    fn mirrored_double_rotation_costs_the_same() {
        // 3 (rank 2) over 1 (rank 1) and 4; 1 over nothing and 2.
        let mut tree = tree_from(&[3, 4, 1, 2]);
        assert_eq!(tree.remove(&4).map(|r| r.ops), Ok(5));
        tree.validate_invariants();
        let root = tree.root().expect("non-empty");
        assert_eq!(*tree.node(root).key(), 2);
    }

    #[test]
    fn double_demotion_propagates() {
        let mut tree = tree_from(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(tree.remove(&8).map(|r| r.ops), Ok(1));
        assert_eq!(tree.remove(&1).map(|r| r.ops), Ok(0));
        // 2 drops to a leaf, then 4 is 3,1 over a 2,2 sibling.
        assert_eq!(tree.remove(&3).map(|r| r.ops), Ok(3));
        tree.validate_invariants();
        let root = tree.root().expect("non-empty");
        assert_eq!(tree.node(root).rank(), 2);
    }

    #[test]
    fn extremes_follow_removals() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        tree.remove(&1).expect("present");
        tree.remove(&7).expect("present");
        assert_eq!(tree.first_key_value(), Some((&2, &4)));
        assert_eq!(tree.last_key_value(), Some((&6, &12)));
        tree.validate_invariants();
    }

    #[test]
    fn insert_then_remove_restores_keys() {
        let mut tree = tree_from(&[10, 20, 30, 40, 50]);
        let before = tree.keys_to_vec();
        tree.insert(35, 0).expect("new key");
        tree.remove(&35).expect("present");
        tree.validate_invariants();
        assert_eq!(tree.keys_to_vec(), before);
    }
}
