use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::error::Error;
use crate::node_ref::NodeRef;
use crate::raw::RawWavlTree;

mod capacity;
mod order_statistic;

pub use crate::Position;

/// An ordered map based on a weak AVL tree.
///
/// Given a key type with a [total order], the map stores its entries in key order and keeps
/// every node's rank within one or two of its children's ranks. Each node also records the
/// size of its subtree, which makes [`select`](Self::select) and [`rank_of`](Self::rank_of)
/// logarithmic.
///
/// Unlike `BTreeMap`, keys are unique by contract: [`insert`](Self::insert) refuses a key
/// that is already present and [`delete`](Self::delete) refuses a missing one. Both return
/// the number of rebalancing operations they performed on success.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `WavlTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use wavl_tree::{Error, WavlTreeMap};
///
/// let mut scores = WavlTreeMap::new();
///
/// scores.insert("carol", 71).unwrap();
/// scores.insert("alice", 93).unwrap();
/// scores.insert("bob", 88).unwrap();
///
/// assert_eq!(scores.search("bob"), Some(&88));
/// assert_eq!(scores.keys_to_vec(), ["alice", "bob", "carol"]);
///
/// // The first insert wins.
/// assert_eq!(scores.insert("bob", 0), Err(Error::DuplicateKey));
/// assert_eq!(scores.search("bob"), Some(&88));
///
/// // Order statistics.
/// assert_eq!(scores.select(1), Some(&93));
/// assert_eq!(scores.rank_of("carol"), Some(3));
///
/// scores.delete("alice").unwrap();
/// assert_eq!(scores.min(), Some(&88));
/// ```
///
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct WavlTreeMap<K, V> {
    raw: RawWavlTree<K, V>,
}

impl<K, V> WavlTreeMap<K, V> {
    /// Makes a new, empty `WavlTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> WavlTreeMap<K, V> {
        WavlTreeMap { raw: RawWavlTree::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut a = WavlTreeMap::new();
    /// a.insert(1, "a").unwrap();
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// Read from the root's subtree size.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut a = WavlTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a").unwrap();
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut a = WavlTreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a").unwrap();
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the value of the smallest key, or `None` if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// assert_eq!(map.min(), None);
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.min(), Some(&"a"));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&V> {
        self.raw.first_key_value().map(|(_, v)| v)
    }

    /// Returns the value of the largest key, or `None` if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.max(), Some(&"b"));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<&V> {
        self.raw.last_key_value().map(|(_, v)| v)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b").unwrap();
    /// map.insert(2, "a").unwrap();
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "b").unwrap();
    /// map.insert(2, "a").unwrap();
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Returns a sorted vector of the map's keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in [3, 1, 2] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.keys_to_vec(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn keys_to_vec(&self) -> alloc::vec::Vec<K>
    where
        K: Clone,
    {
        self.raw.keys_to_vec()
    }

    /// Returns the map's values, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(2, "two").unwrap();
    /// map.insert(1, "one").unwrap();
    /// assert_eq!(map.values_to_vec(), ["one", "two"]);
    /// ```
    #[must_use]
    pub fn values_to_vec(&self) -> alloc::vec::Vec<V>
    where
        V: Clone,
    {
        self.raw.values_to_vec()
    }

    /// Returns a view of the root node, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// assert!(map.root().is_none());
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.root().map(|root| root.rank()), Some(0));
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.raw.root().map(|handle| NodeRef::new(&self.raw, handle))
    }

    /// Returns the number of nodes on the longest root-to-leaf path; 0 for an empty map.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in 0..7 {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }
}

impl<K: Ord, V> WavlTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.search(&1), Some(&"a"));
    /// assert_eq!(map.search(&2), None);
    /// ```
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// if let Some(x) = map.search_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.search(&1), Some(&"b"));
    /// ```
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| self.raw.entry(handle))
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair and rebalances the tree.
    ///
    /// Returns the number of rebalancing operations performed: 1 per promotion, 2 for a
    /// single rotation and 5 for a double rotation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present. The map is left
    /// unchanged and `value` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::{Error, WavlTreeMap};
    ///
    /// let mut map = WavlTreeMap::new();
    /// assert_eq!(map.insert(1, "a"), Ok(0));
    /// assert_eq!(map.insert(2, "b"), Ok(1));
    /// // 2 is promoted, leaving 1 as 0,2: one single rotation.
    /// assert_eq!(map.insert(3, "c"), Ok(3));
    ///
    /// assert_eq!(map.insert(2, "x"), Err(Error::DuplicateKey));
    /// assert_eq!(map.search(&2), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<usize, Error> {
        self.raw.insert(key, value)
    }

    /// Deletes a key from the map and rebalances the tree.
    ///
    /// Returns the number of rebalancing operations performed. Splicing out a node with
    /// children costs 1, a demotion 1, a double demotion 2, a single rotation 3 (4 if it
    /// leaves a leaf to reset) and a double rotation 5.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present. The map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::{Error, WavlTreeMap};
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in 1..=3 {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(map.delete(&1), Ok(0));
    /// assert_eq!(map.delete(&1), Err(Error::KeyNotFound));
    /// assert_eq!(map.keys_to_vec(), [2, 3]);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|removed| removed.ops)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).ok().map(|removed| removed.entry)
    }

    /// Returns the smallest key greater than `key`.
    ///
    /// Returns `None` if `key` is not in the map or is its largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in [10, 20, 30] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.successor_key(&10), Some(&20));
    /// assert_eq!(map.successor_key(&30), None);
    /// assert_eq!(map.successor_key(&15), None);
    /// ```
    #[must_use]
    pub fn successor_key<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.successor(self.raw.search(key)?)?;
        Some(self.raw.node(handle).key())
    }

    /// Returns the largest key smaller than `key`.
    ///
    /// Returns `None` if `key` is not in the map or is its smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTreeMap;
    ///
    /// let mut map = WavlTreeMap::new();
    /// for key in [10, 20, 30] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.predecessor_key(&30), Some(&20));
    /// assert_eq!(map.predecessor_key(&10), None);
    /// ```
    #[must_use]
    pub fn predecessor_key<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.predecessor(self.raw.search(key)?)?;
        Some(self.raw.node(handle).key())
    }
}

impl<K: Clone, V: Clone> Clone for WavlTreeMap<K, V> {
    fn clone(&self) -> Self {
        WavlTreeMap { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for WavlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.raw.for_each_in_order(|node| {
            map.entry(node.key(), node.value());
        });
        map.finish()
    }
}

impl<K, V> Default for WavlTreeMap<K, V> {
    fn default() -> Self {
        WavlTreeMap::new()
    }
}

/// Returns a reference to the value corresponding to the supplied key.
///
/// # Panics
///
/// Panics if the key is not present in the `WavlTreeMap`.
///
/// # Examples
///
/// ```
/// use wavl_tree::WavlTreeMap;
///
/// let mut map = WavlTreeMap::new();
/// map.insert("a", 1).unwrap();
/// assert_eq!(map["a"], 1);
/// ```
impl<K, Q, V> Index<&Q> for WavlTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.search(key).expect("no entry found for key")
    }
}
