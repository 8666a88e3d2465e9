// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Every codebase needs a `util` module.

use std::borrow::Borrow;

/// Index of the first key strictly greater than `key`.
///
/// Inserting at this index places a new key after all of its duplicates.
pub(crate) fn upper_bound<K, BK>(keys: &[K], key: &BK) -> usize
where
    BK: Ord + ?Sized,
    K: Borrow<BK>,
{
    keys.partition_point(|k| k.borrow() <= key)
}

/// Index of the first key greater than or equal to `key`.
pub(crate) fn lower_bound<K, BK>(keys: &[K], key: &BK) -> usize
where
    BK: Ord + ?Sized,
    K: Borrow<BK>,
{
    keys.partition_point(|k| k.borrow() < key)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}
