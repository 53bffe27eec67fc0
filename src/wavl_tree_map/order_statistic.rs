use core::borrow::Borrow;
use core::ops::Index;

use super::WavlTreeMap;
use crate::Position;

impl<K, V> WavlTreeMap<K, V> {
    /// Returns the value of the `i`-th smallest key.
    ///
    /// Positions are 1-based. Returns `None` if `i` is 0 or greater than [`len`](Self::len).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert("a", 10).unwrap();
    /// map.insert("c", 30).unwrap();
    /// map.insert("b", 20).unwrap();
    ///
    /// assert_eq!(map.select(2), Some(&20));
    /// assert_eq!(map.select(0), None);
    /// assert_eq!(map.select(4), None);
    /// ```
    #[must_use]
    pub fn select(&self, i: usize) -> Option<&V> {
        self.select_key_value(i).map(|(_, v)| v)
    }

    /// Returns the key-value pair of the `i`-th smallest key (1-based).
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(5, "b").unwrap();
    ///
    /// assert_eq!(map.select_key_value(1), Some((&5, &"b")));
    /// ```
    #[must_use]
    pub fn select_key_value(&self, i: usize) -> Option<(&K, &V)> {
        self.raw.select(i).map(|handle| self.raw.entry(handle))
    }
}

impl<K: Ord, V> WavlTreeMap<K, V> {
    /// Returns the 1-based position of `key` in sorted order, or `None` if the key is
    /// not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in [30, 10, 20] {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(map.rank_of(&10), Some(1));
    /// assert_eq!(map.rank_of(&30), Some(3));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the map by 1-based sorted position.
///
/// # Panics
///
/// Panics if the position is 0 or greater than the map's length.
///
/// # Examples
///
/// ```
/// use wavl_tree::{Position, WavlTreeMap};
///
/// let mut map = WavlTreeMap::new();
/// map.insert("b", 2).unwrap();
/// map.insert("a", 1).unwrap();
///
/// assert_eq!(map[Position(2)], 2);
/// ```
impl<K, V> Index<Position> for WavlTreeMap<K, V> {
    type Output = V;

    fn index(&self, position: Position) -> &Self::Output {
        self.select(position.0).expect("position out of bounds")
    }
}
