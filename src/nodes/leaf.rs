// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Borrow;

use super::NodeId;
use crate::comparator::Comparator;
use crate::util::{lower_bound, upper_bound};

/// A leaf node in a `B+Tree`.
///
/// Invariants:
/// * keys are ordered, duplicates are kept in insertion order
/// * keys.len() == values.len()
/// * `previous` and `next` name the neighbouring leaves in key order
#[derive(Debug, Clone)]
pub(crate) struct Leaf<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl<K, V> Leaf<K, V> {
    pub(crate) fn new() -> Self {
        Leaf {
            keys: Vec::new(),
            values: Vec::new(),
            previous: None,
            next: None,
        }
    }

    /// The values of this leaf alone that satisfy `comparator`, in key order.
    ///
    /// `Equal` is answered by the tree through a point lookup, a leaf only
    /// handles the two inequalities.
    pub(crate) fn range_search<BK>(&self, key: &BK, comparator: Comparator) -> &[V]
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        match comparator {
            Comparator::GreaterOrEqual => &self.values[lower_bound(&self.keys, key)..],
            Comparator::LessOrEqual => &self.values[..upper_bound(&self.keys, key)],
            Comparator::Equal => &[],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_overflow(&self, branching_factor: usize) -> bool {
        self.values.len() > branching_factor - 1
    }

    pub(crate) fn first_key(&self) -> Option<&K> {
        self.keys.first()
    }

    pub(crate) fn entry(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(index)?, self.values.get(index)?))
    }

    /// Moves the upper half of the entries into a new, unlinked leaf.
    ///
    /// The first `ceil(len / 2)` entries stay behind.
    pub(crate) fn split_off(&mut self) -> Self {
        let start = self.keys.len().div_ceil(2);
        Leaf {
            keys: self.keys.split_off(start),
            values: self.values.split_off(start),
            previous: None,
            next: None,
        }
    }
}

impl<K: Ord, V> Leaf<K, V> {
    /// Inserts after every existing key equal to `key`.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        let i = upper_bound(&self.keys, &key);
        self.keys.insert(i, key);
        self.values.insert(i, value);
        debug_assert_eq!(self.keys.len(), self.values.len());
    }
}
