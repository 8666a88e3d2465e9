// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The leaf chain.
//!
//! Every leaf links to its neighbours, so ordered traversal and range
//! queries only descend the tree once and then follow the chain, in
//! O(log n + k) for k results.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use crate::comparator::Comparator;
use crate::nodes::{NodeId, Nodes};
use crate::util::{lower_bound, Side};

/// Walks the chain from the leaf holding `key`, collecting the values
/// that satisfy `comparator` in ascending key order.
///
/// `>=` starts at the leftmost leaf that may hold `key` and walks right.
/// `<=` starts at the rightmost such leaf and walks left, so each leaf's
/// local result lands in front of what was collected before it.
pub(crate) fn range_walk<'a, K, V, BK>(
    nodes: &'a Nodes<K, V>,
    root: NodeId,
    key: &BK,
    comparator: Comparator,
) -> Vec<&'a V>
where
    BK: Ord + ?Sized,
    K: Borrow<BK>,
{
    let (start, side) = match comparator {
        Comparator::GreaterOrEqual => (nodes.find_leaf_lower(root, key), Side::Right),
        Comparator::LessOrEqual => (nodes.find_leaf(root, key), Side::Left),
        Comparator::Equal => return Vec::new(),
    };
    let mut chunks = Vec::new();
    let mut leaf = Some(start);
    while let Some(id) = leaf {
        let node = nodes.leaf(id);
        chunks.push(node.range_search(key, comparator));
        leaf = match side {
            Side::Right => node.next,
            Side::Left => node.previous,
        };
    }
    if side == Side::Left {
        chunks.reverse();
    }
    chunks.into_iter().flatten().collect()
}

/// Finds the first entry in chain order whose key equals `key`.
pub(crate) fn find_first<K, V, BK>(
    nodes: &Nodes<K, V>,
    root: NodeId,
    key: &BK,
) -> Option<Cursor>
where
    BK: Ord + ?Sized,
    K: Borrow<BK>,
{
    let mut id = nodes.find_leaf_lower(root, key);
    loop {
        let leaf = nodes.leaf(id);
        let index = lower_bound(&leaf.keys, key);
        if let Some(found) = leaf.keys.get(index) {
            return if found.borrow() == key {
                Some(Cursor { leaf: id, index })
            } else {
                None
            };
        }
        // Every key of this leaf is smaller, the answer can only be at
        // the head of the next one.
        id = leaf.next?;
    }
}

/// Collects the values of every entry equal to `key`, starting at the
/// first one and following the chain for as long as keys stay equal.
pub(crate) fn equal_walk<'a, K, V, BK>(
    nodes: &'a Nodes<K, V>,
    root: NodeId,
    key: &BK,
) -> Vec<&'a V>
where
    BK: Ord + ?Sized,
    K: Borrow<BK>,
{
    let mut results = Vec::new();
    let Some(Cursor { leaf, mut index }) = find_first(nodes, root, key) else {
        return results;
    };
    let mut leaf = Some(leaf);
    while let Some(id) = leaf {
        let node = nodes.leaf(id);
        for (k, v) in node.keys[index..].iter().zip(&node.values[index..]) {
            if k.borrow() != key {
                return results;
            }
            results.push(v);
        }
        index = 0;
        leaf = node.next;
    }
    results
}

/// A position in the leaf chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) leaf: NodeId,
    pub(crate) index: usize,
}

/// An iterator over the entries of a [`BPTree`][crate::BPTree] in key order.
///
/// Entries with equal keys come out in the order they were inserted.
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    /// Next entry to yield from the front.
    front: Cursor,
    /// One past the next entry to yield from the back.
    back: Cursor,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, root: NodeId, len: usize) -> Self {
        let last = nodes.last_leaf(root);
        Iter {
            nodes,
            front: Cursor {
                leaf: nodes.first_leaf(root),
                index: 0,
            },
            back: Cursor {
                leaf: last,
                index: nodes.leaf(last).len(),
            },
            remaining: len,
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let leaf = self.nodes.leaf(self.front.leaf);
            if let Some(entry) = leaf.entry(self.front.index) {
                self.front.index += 1;
                self.remaining -= 1;
                return Some(entry);
            }
            self.front = Cursor {
                leaf: leaf.next?,
                index: 0,
            };
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let leaf = self.nodes.leaf(self.back.leaf);
            if self.back.index > 0 {
                self.back.index -= 1;
                self.remaining -= 1;
                return leaf.entry(self.back.index);
            }
            let previous = leaf.previous?;
            self.back = Cursor {
                leaf: previous,
                index: self.nodes.leaf(previous).len(),
            };
        }
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of a [`BPTree`][crate::BPTree] in order.
pub struct Keys<'a, K, V> {
    pub(crate) it: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of a [`BPTree`][crate::BPTree], ordered by key.
pub struct Values<'a, K, V> {
    pub(crate) it: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

#[cfg(test)]
mod test {
    use crate::BPTree;
    use pretty_assertions::assert_eq;

    fn tree_of(factor: usize, keys: &[i32]) -> BPTree<i32, usize> {
        let mut tree = BPTree::new(factor).unwrap();
        for (i, k) in keys.iter().enumerate() {
            tree.insert(*k, i);
        }
        tree
    }

    #[test]
    fn iterates_across_leaves_both_ways() {
        let tree = tree_of(3, &[5, 1, 4, 2, 3, 9, 7, 8, 6]);
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!((1..=9).collect::<Vec<_>>(), keys);
        let keys: Vec<i32> = tree.keys().rev().copied().collect();
        assert_eq!((1..=9).rev().collect::<Vec<_>>(), keys);
        assert_eq!(9, tree.iter().len());
    }

    #[test]
    fn front_and_back_meet_in_the_middle() {
        let tree = tree_of(3, &[1, 2, 3, 4, 5, 6, 7]);
        let mut it = tree.keys();
        assert_eq!(Some(&1), it.next());
        assert_eq!(Some(&7), it.next_back());
        assert_eq!(Some(&2), it.next());
        assert_eq!(Some(&6), it.next_back());
        assert_eq!(Some(&5), it.next_back());
        assert_eq!(Some(&3), it.next());
        assert_eq!(Some(&4), it.next());
        assert_eq!(None, it.next());
        assert_eq!(None, it.next_back());
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = tree_of(3, &[]);
        assert_eq!(None, tree.iter().next());
        assert_eq!(None, tree.iter().next_back());
        assert_eq!(0, tree.values().len());
    }

    #[test]
    fn duplicates_spanning_leaves_stay_in_arrival_order() {
        let tree = tree_of(3, &[2, 2, 1, 2, 2, 2, 3]);
        let entries: Vec<(i32, usize)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(
            vec![(1, 2), (2, 0), (2, 1), (2, 3), (2, 4), (2, 5), (3, 6)],
            entries
        );
    }
}
