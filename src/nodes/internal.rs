// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Borrow;

use super::NodeId;
use crate::util::{lower_bound, upper_bound};

/// An internal (routing) node in a `B+Tree`.
///
/// Invariants:
/// * keys are ordered
/// * keys.len() + 1 == children.len()
/// * every key below children[i] is less than keys[i], every key below
///   children[i + 1] is at least keys[i] (duplicates of a separator may
///   also end up at the tail of children[i] after a leaf split)
/// * keys[i] is the first key of the leftmost leaf below children[i + 1]
#[derive(Debug, Clone)]
pub(crate) struct Internal<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
}

impl<K> Internal<K> {
    pub(crate) fn new_root(left: NodeId, separator: K, right: NodeId) -> Self {
        Internal {
            keys: vec![separator],
            children: vec![left, right],
        }
    }

    pub(crate) fn is_overflow(&self, branching_factor: usize) -> bool {
        self.children.len() > branching_factor
    }

    pub(crate) fn first_child(&self) -> NodeId {
        self.children[0]
    }

    pub(crate) fn last_child(&self) -> NodeId {
        self.children[self.children.len() - 1]
    }

    /// Registers a freshly split sibling of children[index] right after it.
    pub(crate) fn insert_child(&mut self, index: usize, separator: K, sibling: NodeId) {
        self.keys.insert(index, separator);
        self.children.insert(index + 1, sibling);
        debug_assert_eq!(self.keys.len() + 1, self.children.len());
    }

    /// Moves the upper children into a new sibling.
    ///
    /// With `m` keys the sibling receives `keys[m/2 + 1..]` and the children
    /// to their right. The key at `m/2` is dropped: the parent derives the
    /// new separator from the sibling's leftmost leaf instead.
    pub(crate) fn split_off(&mut self) -> Self {
        let start = self.keys.len() / 2 + 1;
        let keys = self.keys.split_off(start);
        let children = self.children.split_off(start);
        self.keys.truncate(start - 1);
        debug_assert_eq!(self.keys.len() + 1, self.children.len());
        debug_assert_eq!(keys.len() + 1, children.len());
        Internal { keys, children }
    }

    /// Position of the child whose range contains `key`.
    ///
    /// Keys equal to a separator route to its right, which is where an
    /// insertion must go to keep duplicates in arrival order.
    pub(crate) fn child_index<BK>(&self, key: &BK) -> usize
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        upper_bound(&self.keys, key)
    }

    /// Position of the leftmost child that may hold `key` or anything
    /// greater.
    pub(crate) fn lower_child_index<BK>(&self, key: &BK) -> usize
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        lower_bound(&self.keys, key)
    }

    pub(crate) fn child(&self, index: usize) -> NodeId {
        self.children[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn internal_of(keys: &[i32]) -> Internal<i32> {
        Internal {
            keys: keys.to_vec(),
            children: (0..=keys.len()).collect(),
        }
    }

    #[test]
    fn routes_equal_keys_right() {
        let node = internal_of(&[3, 5, 7]);
        assert_eq!(0, node.child_index(&1));
        assert_eq!(1, node.child_index(&3));
        assert_eq!(1, node.child_index(&4));
        assert_eq!(2, node.child_index(&5));
        assert_eq!(3, node.child_index(&9));
        assert_eq!(0, node.lower_child_index(&3));
        assert_eq!(1, node.lower_child_index(&4));
        assert_eq!(3, node.lower_child_index(&9));
    }

    #[test]
    fn overflow_counts_children() {
        assert!(!internal_of(&[3, 5]).is_overflow(3));
        assert!(internal_of(&[3, 5, 7]).is_overflow(3));
        assert!(!internal_of(&[3, 5, 7]).is_overflow(4));
    }

    #[test]
    fn split_with_three_keys() {
        let mut node = internal_of(&[3, 5, 7]);
        let sibling = node.split_off();
        assert_eq!(vec![3], node.keys);
        assert_eq!(vec![0, 1], node.children);
        assert_eq!(vec![7], sibling.keys);
        assert_eq!(vec![2, 3], sibling.children);
    }

    #[test]
    fn split_with_four_keys() {
        let mut node = internal_of(&[2, 4, 6, 8]);
        let sibling = node.split_off();
        assert_eq!(vec![2, 4], node.keys);
        assert_eq!(vec![0, 1, 2], node.children);
        assert_eq!(vec![8], sibling.keys);
        assert_eq!(vec![3, 4], sibling.children);
    }

    #[test]
    fn insert_child_after_split_position() {
        let mut node = internal_of(&[5]);
        node.insert_child(0, 3, 7);
        assert_eq!(vec![3, 5], node.keys);
        assert_eq!(vec![0, 7, 1], node.children);
    }
}
