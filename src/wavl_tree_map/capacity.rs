use super::WavlTreeMap;
use crate::raw::RawWavlTree;

impl<K, V> WavlTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let map: WavlTreeMap<i32, i32> = WavlTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WavlTreeMap {
            raw: RawWavlTree::with_capacity(capacity),
        }
    }

    /// Returns how many nodes the map can hold before reallocating.
    ///
    /// Deleted nodes are recycled, so a map that stays below its capacity never
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let map: WavlTreeMap<i32, i32> = WavlTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
