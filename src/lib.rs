// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # An in-memory B+tree index
//!
//! This crate provides [`BPTree`], an ordered index of key/value entries
//! that supports point lookups and inequality range queries. Unlike
//! [`std::collections::BTreeMap`] it keeps every entry inserted under a
//! key, and entries with equal keys keep their insertion order.
//!
//! ## Structure
//!
//! Internal nodes route lookups, leaves hold the entries, and the leaves
//! are doubly linked in key order. Inserting descends to a leaf, and any
//! node that overflows on the way back up is split in two; when the root
//! splits the tree grows a level. Range queries descend once and then
//! walk the leaf chain.
//!
//! | Operation | Cost |
//! | --- | --- |
//! | [`insert`][BPTree::insert] | O(log n) |
//! | [`get`][BPTree::get] | O(log n) |
//! | [`range_search`][BPTree::range_search] | O(log n + k) |
//! | [`size`][BPTree::size] | O(1) |
//!
//! The branching factor is chosen at construction and must be at least 3.
//!
//! ```
//! # use bptree::BPTree;
//! let mut tree = BPTree::new(3)?;
//! for (key, value) in [(3, "c"), (1, "a"), (2, "b"), (2, "b'")] {
//!     tree.insert(key, value);
//! }
//! assert_eq!(Some(&"b"), tree.get(&2));
//! assert_eq!(vec![&"b", &"b'", &"c"], tree.range_search(&2, ">="));
//! assert_eq!(4, tree.size());
//! # Ok::<(), bptree::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! | ------- | ----------- |
//! | [`proptest`](https://crates.io/crates/proptest) | Strategies for all these data structures in the [`proptest`] module |
//! | [`quickcheck`](https://crates.io/crates/quickcheck) | [`quickcheck::Arbitrary`](https://docs.rs/quickcheck/latest/quickcheck/trait.Arbitrary.html) implementations |
//! | [`arbitrary`](https://crates.io/crates/arbitrary/) | [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html) implementations |
//! | [`serde`](https://crates.io/crates/serde) | [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) implementations |
//! | [`bincode`](https://crates.io/crates/bincode) | [`Encode`](https://docs.rs/bincode/latest/bincode/enc/trait.Encode.html) and [`Decode`](https://docs.rs/bincode/latest/bincode/de/trait.Decode.html) implementations |
//! | `debug` | Check every structural invariant after each insert |
//! | `small-chunks` | Use a branching factor of 4 by default |

#![warn(rust_2018_idioms)]
#![deny(unsafe_code, nonstandard_style)]
#![warn(unreachable_pub)]

mod chain;
mod nodes;
mod util;

pub mod comparator;
pub mod config;
pub mod error;
pub mod tree;

#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

#[cfg(feature = "serde")]
#[doc(hidden)]
pub mod ser;

#[cfg(feature = "bincode")]
#[doc(hidden)]
pub mod bincode;

#[cfg(feature = "arbitrary")]
#[doc(hidden)]
pub mod arbitrary;

#[cfg(feature = "quickcheck")]
#[doc(hidden)]
pub mod quickcheck;

pub use crate::chain::{Iter, Keys, Values};
pub use crate::comparator::Comparator;
pub use crate::error::{Error, Result};
pub use crate::tree::BPTree;

/// Construct a tree with the default branching factor from a sequence of
/// entries.
///
/// Entries are inserted in the order given, so repeated keys keep that
/// order.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate bptree;
/// # fn main() {
/// let tree = bptree! { 1 => "one", 2 => "two", 1 => "uno" };
/// assert_eq!(3, tree.size());
/// assert_eq!(vec![&"one", &"uno"], tree.get_all(&1));
/// # }
/// ```
#[macro_export]
macro_rules! bptree {
    () => { $crate::BPTree::default() };

    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        let mut tree = $crate::BPTree::default();
        $(
            tree.insert($key, $value);
        )*
        tree
    }};
}
