use super::RawWavlTree;
use crate::raw::handle::Handle;
use crate::raw::node::{Link, Side};
use crate::tracing_helpers::trace_log;

impl<K, V> RawWavlTree<K, V> {
    /// Rotates `node` over its parent, which is demoted by one.
    ///
    /// `node` takes the parent's position and the parent adopts `node`'s inner subtree.
    /// Sizes are recomputed for the parent, `node` and the grandparent.
    fn rotate_up(&mut self, node: Handle) {
        let side = self.side_of(node).expect("`rotate_up()` - `node` is the root!");
        let parent = self.node(node).parent().expect("`rotate_up()` - `node` is the root!");
        let grandparent = self.node(parent).parent();
        let inner = self.node(node).child(side.opposite());

        self.node_mut(parent).set_child(side, inner);
        if let Link::Internal(inner) = inner {
            self.node_mut(inner).set_parent(Some(parent));
        }
        self.replace_child(grandparent, parent, Link::Internal(node));
        self.node_mut(node).set_child(side.opposite(), Link::Internal(parent));
        self.node_mut(parent).set_parent(Some(node));

        self.update_size(parent);
        self.update_size(node);
        if let Some(grandparent) = grandparent {
            self.update_size(grandparent);
        }

        self.node_mut(parent).demote();
        trace_log!(?side, parent_rank = self.node(parent).rank(), "rotate");
    }

    /// Rotates a left child `node` clockwise over its parent.
    pub(super) fn rotate_right(&mut self, node: Handle) {
        debug_assert_eq!(self.side_of(node), Some(Side::Left));
        self.rotate_up(node);
    }

    /// Rotates a right child `node` counter-clockwise over its parent.
    pub(super) fn rotate_left(&mut self, node: Handle) {
        debug_assert_eq!(self.side_of(node), Some(Side::Right));
        self.rotate_up(node);
    }

    /// Single rotation of `node` over its parent, in whichever direction lifts it.
    pub(super) fn single_rotate(&mut self, node: Handle) {
        match self.side_of(node) {
            Some(Side::Left) => self.rotate_right(node),
            Some(Side::Right) => self.rotate_left(node),
            None => debug_assert!(false, "`single_rotate()` - `node` is the root!"),
        }
    }

    /// Lifts a left child of a right child two levels: right, then left. `node` is
    /// promoted once to make up for the second demotion it causes.
    pub(super) fn double_rotate_left(&mut self, node: Handle) {
        self.rotate_right(node);
        self.rotate_left(node);
        self.node_mut(node).promote();
    }

    /// Mirror of [`Self::double_rotate_left`] for a right child of a left child.
    pub(super) fn double_rotate_right(&mut self, node: Handle) {
        self.rotate_left(node);
        self.rotate_right(node);
        self.node_mut(node).promote();
    }

    /// Double rotation of `node` over its parent and grandparent.
    pub(super) fn double_rotate(&mut self, node: Handle) {
        match self.side_of(node) {
            Some(Side::Left) => self.double_rotate_left(node),
            Some(Side::Right) => self.double_rotate_right(node),
            None => debug_assert!(false, "`double_rotate()` - `node` is the root!"),
        }
    }
}
