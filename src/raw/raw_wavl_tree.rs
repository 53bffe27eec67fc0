use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{EXTERNAL_RANK, LEAF_RANK, Link, Node, Side};
use super::size::Size;

mod insert;
mod remove;
mod rotate;

/// Stack for iterative walks. Rank-balanced height stays below 66 for anything the arena
/// can address, so it never spills in practice.
type Stack<T> = SmallVec<[T; 64]>;

/// The weak AVL tree backing `WavlTreeMap`.
#[derive(Clone)]
pub(crate) struct RawWavlTree<K, V> {
    /// Arena storing all internal nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Node holding the smallest key.
    min: Option<Handle>,
    /// Node holding the largest key.
    max: Option<Handle>,
}

impl<K, V> RawWavlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.root.map_or(0, |root| self.node(root).size().to_usize())
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the entry with the smallest key.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        self.min.map(|h| self.entry(h))
    }

    /// Returns the entry with the largest key.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        self.max.map(|h| self.entry(h))
    }

    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (node.key(), node.value())
    }

    /// Rank of a child link; the sentinel ranks below every leaf.
    #[inline]
    pub(crate) fn link_rank(&self, link: Link) -> i32 {
        match link {
            Link::External => EXTERNAL_RANK,
            Link::Internal(h) => self.node(h).rank(),
        }
    }

    #[inline]
    pub(crate) fn link_size(&self, link: Link) -> Size {
        match link {
            Link::External => Size::ZERO,
            Link::Internal(h) => self.node(h).size(),
        }
    }

    /// Rank of `handle` minus the rank of its child on `side`.
    #[inline]
    pub(crate) fn rank_diff(&self, handle: Handle, side: Side) -> i32 {
        let node = self.node(handle);
        node.rank() - self.link_rank(node.child(side))
    }

    /// Left rank difference minus right rank difference.
    pub(crate) fn balance(&self, handle: Handle) -> i32 {
        self.rank_diff(handle, Side::Left) - self.rank_diff(handle, Side::Right)
    }

    /// Which child of its parent `handle` is, or `None` for the root.
    pub(crate) fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self.node(handle).parent()?;
        if self.node(parent).left() == Link::Internal(handle) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Points the slot that holds `old` (a child of `parent`, or the root) at `new`, and
    /// `new` back at `parent`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Link) {
        match parent {
            Some(p) => {
                let side = if self.node(p).left() == Link::Internal(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.node_mut(p).set_child(side, new);
            }
            None => self.root = new.handle(),
        }
        if let Link::Internal(h) = new {
            self.node_mut(h).set_parent(parent);
        }
    }

    /// Recomputes the size of `handle` from its children.
    fn update_size(&mut self, handle: Handle) {
        let node = self.node(handle);
        let size = Size::with_children(self.link_size(node.left()), self.link_size(node.right()));
        self.node_mut(handle).set_size(size);
    }

    /// Recomputes sizes from `handle` up to the root.
    fn update_sizes_to_root(&mut self, handle: Handle) {
        let mut current = Some(handle);
        while let Some(h) = current {
            self.update_size(h);
            current = self.node(h).parent();
        }
    }

    /// Leaves always carry rank 0.
    fn reset_leaf_rank(&mut self, handle: Handle) {
        let node = self.node_mut(handle);
        if node.is_leaf() {
            node.set_rank(LEAF_RANK);
        }
    }

    /// Follows `side` children from `handle` to the end of the spine.
    pub(crate) fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Link::Internal(next) = self.node(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// The in-order neighbor of `handle` in direction `side`.
    fn neighbor(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Link::Internal(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        // Climb until we arrive from the opposite side.
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            if self.node(parent).child(side) != Link::Internal(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// The node holding the next larger key.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.neighbor(handle, Side::Right)
    }

    /// The node holding the next smaller key.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.neighbor(handle, Side::Left)
    }

    /// Returns the node holding the `index`-th smallest key (1-indexed).
    pub(crate) fn select(&self, index: usize) -> Option<Handle> {
        if index == 0 || index > self.len() {
            return None;
        }

        // The subtrees along the left spine hold the smallest keys, so the lowest one
        // holding at least `index` nodes contains the answer.
        let mut current = self.min?;
        while self.node(current).size().to_usize() < index {
            match self.node(current).parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        let mut remaining = index;
        loop {
            let node = self.node(current);
            let position = self.link_size(node.left()).to_usize() + 1;
            current = match remaining.cmp(&position) {
                Ordering::Equal => return Some(current),
                Ordering::Less => node.left().handle()?,
                Ordering::Greater => {
                    remaining -= position;
                    node.right().handle()?
                }
            };
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Stack<(Handle, usize)> = SmallVec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((h, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(h);
            for child in [node.left(), node.right()] {
                if let Link::Internal(child) = child {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// Visits every node in key order.
    pub(crate) fn for_each_in_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Node<K, V>),
    {
        let mut stack: Stack<Handle> = SmallVec::new();
        let mut current = Link::from(self.root);
        loop {
            while let Link::Internal(h) = current {
                stack.push(h);
                current = self.node(h).left();
            }
            let Some(h) = stack.pop() else {
                break;
            };
            let node = self.node(h);
            f(node);
            current = node.right();
        }
    }

    /// Collects all keys in increasing order.
    pub(crate) fn keys_to_vec(&self) -> alloc::vec::Vec<K>
    where
        K: Clone,
    {
        let mut keys = alloc::vec::Vec::with_capacity(self.len());
        self.for_each_in_order(|node| keys.push(node.key().clone()));
        keys
    }

    /// Collects all values in key order.
    pub(crate) fn values_to_vec(&self) -> alloc::vec::Vec<V>
    where
        V: Clone,
    {
        let mut values = alloc::vec::Vec::with_capacity(self.len());
        self.for_each_in_order(|node| values.push(node.value().clone()));
        values
    }
}

impl<K: Ord, V> RawWavlTree<K, V> {
    /// Returns the node holding `key`, or the node that would become its parent.
    /// `None` only for an empty tree.
    pub(crate) fn closest_key<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        loop {
            let node = self.node(current);
            let side = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Link::Internal(child) => current = child,
                Link::External => return Some(current),
            }
        }
    }

    /// Returns the node holding exactly `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.closest_key(key).filter(|&h| key.cmp(self.node(h).key().borrow()).is_eq())
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| self.node(h).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.search(key)?;
        Some(self.node_mut(h).value_mut())
    }

    /// Returns the 1-indexed position of `key` in sorted order.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        let mut preceding = 0;
        loop {
            let node = self.node(current);
            let link = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(preceding + self.link_size(node.left()).to_usize() + 1),
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    preceding += self.link_size(node.left()).to_usize() + 1;
                    node.right()
                }
            };
            current = link.handle()?;
        }
    }
}
