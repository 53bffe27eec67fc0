use core::cmp::Ordering;

use super::RawWavlTree;
use crate::error::Error;
use crate::raw::handle::Handle;
use crate::raw::node::{Link, Node, Side};
use crate::tracing_helpers::{debug_log, trace_log};

// Operation counts reported by `insert`.
const PROMOTE_COST: usize = 1;
const SINGLE_ROTATION_COST: usize = 2;
const DOUBLE_ROTATION_COST: usize = 5;

impl<K: Ord, V> RawWavlTree<K, V> {
    /// Inserts a new key-value pair and rebalances.
    ///
    /// Returns the number of rebalancing operations performed. An existing key is left
    /// untouched and `value` is dropped.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<usize, Error> {
        let Some(parent) = self.closest_key(&key) else {
            let root = self.nodes.alloc(Node::new(key, value));
            self.root = Some(root);
            self.min = Some(root);
            self.max = Some(root);
            debug_log!("insert: new root");
            return Ok(0);
        };

        let side = match key.cmp(self.node(parent).key()) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => {
                debug_log!("insert: duplicate key");
                return Err(Error::DuplicateKey);
            }
        };

        let mut node = Node::new(key, value);
        node.set_parent(Some(parent));
        let child = self.nodes.alloc(node);
        self.node_mut(parent).set_child(side, Link::Internal(child));

        // A new extreme can only hang directly off the old one.
        if side == Side::Left && self.min == Some(parent) {
            self.min = Some(child);
        }
        if side == Side::Right && self.max == Some(parent) {
            self.max = Some(child);
        }

        self.update_sizes_to_root(parent);

        let ops = self.rebalance_after_insert(child);
        debug_log!(ops, "insert");
        Ok(ops)
    }

    /// Promote/rotate cascade. `node` has just been attached or promoted and may now be a
    /// 0-child of its parent.
    fn rebalance_after_insert(&mut self, mut node: Handle) -> usize {
        let mut ops = 0;

        while let Some(parent) = self.node(node).parent() {
            if self.node(parent).rank() != self.node(node).rank() {
                break;
            }

            // The parent is 0,1 or 0,2; the sign tells which side `node` is on.
            let balance = self.balance(parent);
            if balance.abs() == 1 {
                self.node_mut(parent).promote();
                trace_log!(rank = self.node(parent).rank(), "insert: promote");
                ops += PROMOTE_COST;
                node = parent;
                continue;
            }
            debug_assert_eq!(balance.abs(), 2, "insert: parent of a 0-child is 0,1 or 0,2");

            // `node` is 1,2. If its 1-child is on the outside a single rotation suffices.
            if self.balance(node) == balance / 2 {
                self.single_rotate(node);
                return ops + SINGLE_ROTATION_COST;
            }

            let side = self.side_of(node).expect("insert: `node` has a parent");
            let inner = self
                .node(node)
                .child(side.opposite())
                .handle()
                .expect("insert: the inner 1-child is internal");
            self.double_rotate(inner);
            return ops + DOUBLE_ROTATION_COST;
        }

        ops
    }
}
