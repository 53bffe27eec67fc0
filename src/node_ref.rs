use core::fmt;

use crate::raw::{Handle, Link, Node, RawWavlTree};

/// Read-only view of one node of a [`WavlTreeMap`](crate::WavlTreeMap).
///
/// Obtained from [`WavlTreeMap::root`](crate::WavlTreeMap::root) and navigated with
/// [`left`](Self::left), [`right`](Self::right) and [`parent`](Self::parent). Intended for
/// inspecting the tree's shape and ranks; missing children are `None` and rank -1.
///
/// # Examples
///
/// ```
/// use wavl_tree::WavlTreeMap;
///
/// let mut map = WavlTreeMap::new();
/// for key in 1..=3 {
///     map.insert(key, ()).unwrap();
/// }
///
/// let root = map.root().unwrap();
/// assert_eq!(*root.key(), 2);
/// assert_eq!(root.rank(), 1);
/// assert_eq!(root.size(), 3);
/// assert_eq!(root.left().map(|n| *n.key()), Some(1));
/// assert!(root.left().unwrap().is_leaf());
/// ```
pub struct NodeRef<'a, K, V> {
    tree: &'a RawWavlTree<K, V>,
    handle: Handle,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(tree: &'a RawWavlTree<K, V>, handle: Handle) -> Self {
        Self { tree, handle }
    }

    fn node(&self) -> &'a Node<K, V> {
        self.tree.node(self.handle)
    }

    fn link(&self, link: Link) -> Option<Self> {
        link.handle().map(|handle| Self::new(self.tree, handle))
    }

    /// Returns the node's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    /// Returns the node's value.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.node().value()
    }

    /// Returns the node's rank. Leaves have rank 0.
    #[must_use]
    pub fn rank(&self) -> i32 {
        self.node().rank()
    }

    /// Returns the number of nodes in the subtree rooted here, this one included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.node().size().to_usize()
    }

    /// Returns the left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.link(self.node().left())
    }

    /// Returns the right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.link(self.node().right())
    }

    /// Returns the parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent().map(|handle| Self::new(self.tree, handle))
    }

    /// Returns true if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Rank of this node minus the rank of its left child (-1 when missing).
    #[must_use]
    pub fn left_rank_difference(&self) -> i32 {
        self.rank() - self.tree.link_rank(self.node().left())
    }

    /// Rank of this node minus the rank of its right child (-1 when missing).
    #[must_use]
    pub fn right_rank_difference(&self) -> i32 {
        self.rank() - self.tree.link_rank(self.node().right())
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    /// Two views are equal when they refer to the same node of the same map.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("rank", &self.rank())
            .field("size", &self.size())
            .finish()
    }
}
