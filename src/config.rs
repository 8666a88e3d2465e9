// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// The smallest branching factor a tree accepts.
///
/// With two children per node a leaf could hold a single entry and a
/// split would leave one side empty.
pub const MIN_BRANCHING_FACTOR: usize = 3;

/// The branching factor used by [`BPTree::default`][crate::BPTree::default],
/// `FromIterator`, deserialisation and the [`bptree!`][crate::bptree] macro.
// A small value makes the test-suite split nodes on nearly every insert.
#[cfg(feature = "small-chunks")]
pub const DEFAULT_BRANCHING_FACTOR: usize = 4;
#[cfg(not(feature = "small-chunks"))]
pub const DEFAULT_BRANCHING_FACTOR: usize = 64;
