use super::handle::Handle;
use super::size::Size;

/// Rank of the external sentinel.
pub(crate) const EXTERNAL_RANK: i32 = -1;
/// Rank every leaf must have.
pub(crate) const LEAF_RANK: i32 = 0;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A child edge: either a real node or the shared external leaf.
///
/// `External` carries no data. Its rank (`EXTERNAL_RANK`) and size (zero) are
/// constants, so every childless slot in the tree refers to the same immutable
/// sentinel without aliasing any node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Link {
    External,
    Internal(Handle),
}

impl Link {
    #[inline]
    pub(crate) const fn handle(self) -> Option<Handle> {
        match self {
            Link::External => None,
            Link::Internal(handle) => Some(handle),
        }
    }

    #[inline]
    pub(crate) const fn is_external(self) -> bool {
        matches!(self, Link::External)
    }
}

impl From<Option<Handle>> for Link {
    fn from(handle: Option<Handle>) -> Self {
        handle.map_or(Link::External, Link::Internal)
    }
}

/// An internal node of the tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    rank: i32,
    // Number of internal nodes in the subtree rooted here, this one included.
    size: Size,
    children: [Link; 2],
    parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            rank: LEAF_RANK,
            size: Size::ONE,
            children: [Link::External; 2],
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the node, returning its entry.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn rank(&self) -> i32 {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: i32) {
        self.rank = rank;
    }

    pub(crate) fn promote(&mut self) {
        self.rank += 1;
    }

    pub(crate) fn demote(&mut self) {
        self.rank -= 1;
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        self.children[side.index()]
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        self.children[side.index()] = child;
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.child(Side::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.child(Side::Right)
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// True if both children are the external sentinel.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left().is_external() && self.right().is_external()
    }
}
