/// A 1-based position in the sorted order of a map: `Position(1)` is the smallest key.
///
/// Indexing a [`WavlTreeMap`](crate::WavlTreeMap) with a `Position` is the panicking
/// form of [`select`](crate::WavlTreeMap::select).
///
/// # Examples
///
/// ```
/// use wavl_tree::{Position, WavlTreeMap};
///
/// let mut map = WavlTreeMap::new();
/// map.insert("b", 20).unwrap();
/// map.insert("a", 10).unwrap();
///
/// assert_eq!(map[Position(1)], 10);
/// assert_eq!(map[Position(2)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(pub usize);
