//! Weak AVL order-statistic tree map for Rust.
//!
//! This crate provides [`WavlTreeMap`], an ordered map backed by a weak AVL
//! (rank-balanced) binary search tree with subtree size augmentation:
//!
//! - [`insert`](WavlTreeMap::insert) / [`delete`](WavlTreeMap::delete) - O(log n), and
//!   report how many rebalancing operations they performed
//! - [`search`](WavlTreeMap::search) - O(log n) lookup
//! - [`select`](WavlTreeMap::select) - the value at a given 1-indexed sorted position
//! - [`rank_of`](WavlTreeMap::rank_of) - the 1-indexed sorted position of a key
//! - [`min`](WavlTreeMap::min) / [`max`](WavlTreeMap::max) - O(1) via cached extremes
//! - [`keys_to_vec`](WavlTreeMap::keys_to_vec) / [`values_to_vec`](WavlTreeMap::values_to_vec) -
//!   sorted export
//!
//! # Example
//!
//! ```
//! use wavl_tree::{Error, Position, WavlTreeMap};
//!
//! let mut tree = WavlTreeMap::new();
//! tree.insert(10, "a").unwrap();
//! tree.insert(5, "b").unwrap();
//! tree.insert(15, "c").unwrap();
//!
//! assert_eq!(tree.keys_to_vec(), [5, 10, 15]);
//! assert_eq!(tree.min(), Some(&"b"));
//! assert_eq!(tree.select(2), Some(&"a"));
//! assert_eq!(tree[Position(3)], "c");
//!
//! // Keys are unique.
//! assert_eq!(tree.insert(5, "x"), Err(Error::DuplicateKey));
//!
//! tree.delete(&10).unwrap();
//! assert_eq!(tree.keys_to_vec(), [5, 15]);
//! assert_eq!(tree.delete(&99), Err(Error::KeyNotFound));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **`tracing`** - Logs rebalancing through the `tracing` crate (off by default)
//!
//! # Implementation
//!
//! Every node carries an integer rank. A node's rank exceeds each child's by one or two,
//! missing children count as rank -1, and leaves have rank 0. Insertions repair the rule
//! by promoting nodes up the tree and finish with at most one single or double rotation;
//! deletions demote nodes and likewise finish with at most one rotation. This bounds the
//! height by roughly `2 log2(n + 1)`.
//!
//! Nodes live in an arena and link to each other by index, so the parent links needed
//! for upward rebalancing never form reference cycles.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod node_ref;
mod order_statistic;
mod raw;
mod tracing_helpers;

pub mod wavl_tree_map;

pub use error::Error;
pub use node_ref::NodeRef;
pub use order_statistic::Position;
pub use wavl_tree_map::WavlTreeMap;
