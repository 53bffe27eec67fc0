use super::handle::Handle;

/// Number of internal nodes in a subtree.
///
/// Shares `Handle`'s representation, so a subtree can never count more nodes than the
/// arena can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    /// Size of the external sentinel.
    pub(crate) const ZERO: Self = Self::from_usize(0);
    /// Size of a freshly inserted leaf.
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn with_children(left: Self, right: Self) -> Self {
        Self::from_usize(1 + left.to_usize() + right.to_usize())
    }
}
