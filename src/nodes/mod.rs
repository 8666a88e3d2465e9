// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Borrow;

use log::trace;

pub(crate) mod internal;
pub(crate) mod leaf;

use self::internal::Internal;
use self::leaf::Leaf;

/// Handle of a node inside its [`Nodes`] arena.
///
/// Parent to child edges are the owning edges of the tree. The leaf chain
/// links are plain handles too and never keep a node alive on their own.
pub(crate) type NodeId = usize;

/// A node in a `B+Tree`.
#[derive(Debug, Clone)]
pub(crate) enum Node<K, V> {
    Internal(Internal<K>),
    Leaf(Leaf<K, V>),
}

impl<K, V> Node<K, V> {
    #[cfg(any(test, feature = "debug"))]
    pub(crate) fn is_overflow(&self, branching_factor: usize) -> bool {
        match self {
            Node::Internal(internal) => internal.is_overflow(branching_factor),
            Node::Leaf(leaf) => leaf.is_overflow(branching_factor),
        }
    }

    pub(crate) fn keys(&self) -> &[K] {
        match self {
            Node::Internal(internal) => &internal.keys,
            Node::Leaf(leaf) => &leaf.keys,
        }
    }
}

/// The outcome of inserting into a subtree.
pub(crate) enum InsertAction<K> {
    Inserted,
    /// The subtree root overflowed and was split. The parent must adopt the
    /// sibling right after the node it descended into, separated by the key.
    Split(K, NodeId),
}

/// Arena owning every node of one tree.
///
/// Nodes are never removed, so a handle stays valid for the lifetime of
/// the arena.
#[derive(Debug, Clone)]
pub(crate) struct Nodes<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Nodes<K, V> {
    pub(crate) fn new() -> Self {
        Nodes { nodes: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    #[cfg(any(test, feature = "debug"))]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id]
    }

    pub(crate) fn leaf(&self, id: NodeId) -> &Leaf<K, V> {
        match &self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut Leaf<K, V> {
        match &mut self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut Internal<K> {
        match &mut self.nodes[id] {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => unreachable!("node {} is not an internal node", id),
        }
    }

    /// The leftmost leaf below `id`.
    pub(crate) fn first_leaf(&self, mut id: NodeId) -> NodeId {
        loop {
            id = match &self.nodes[id] {
                Node::Internal(internal) => internal.first_child(),
                Node::Leaf(_) => return id,
            };
        }
    }

    /// The rightmost leaf below `id`.
    pub(crate) fn last_leaf(&self, mut id: NodeId) -> NodeId {
        loop {
            id = match &self.nodes[id] {
                Node::Internal(internal) => internal.last_child(),
                Node::Leaf(_) => return id,
            };
        }
    }

    /// The first key of the leftmost leaf below `id`.
    pub(crate) fn first_leaf_key(&self, id: NodeId) -> Option<&K> {
        self.leaf(self.first_leaf(id)).first_key()
    }

    /// Descends to the leaf an insertion of `key` would land in: the
    /// rightmost leaf that may hold `key`.
    pub(crate) fn find_leaf<BK>(&self, mut id: NodeId, key: &BK) -> NodeId
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        loop {
            id = match &self.nodes[id] {
                Node::Internal(internal) => internal.child(internal.child_index(key)),
                Node::Leaf(_) => return id,
            };
        }
    }

    /// Descends to the leftmost leaf that may hold `key` or, failing that,
    /// the next greater key (possibly in a later leaf of the chain).
    pub(crate) fn find_leaf_lower<BK>(&self, mut id: NodeId, key: &BK) -> NodeId
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        loop {
            id = match &self.nodes[id] {
                Node::Internal(internal) => internal.child(internal.lower_child_index(key)),
                Node::Leaf(_) => return id,
            };
        }
    }
}

impl<K: Ord + Clone, V> Nodes<K, V> {
    /// Inserts into the subtree rooted at `id`, splitting every node on the
    /// way back up that overflows.
    ///
    /// The caller owns `id` and must adopt the sibling of a returned
    /// [`InsertAction::Split`].
    pub(crate) fn insert(
        &mut self,
        id: NodeId,
        key: K,
        value: V,
        branching_factor: usize,
    ) -> InsertAction<K> {
        let child = match &mut self.nodes[id] {
            Node::Leaf(leaf) => {
                leaf.insert(key, value);
                return if leaf.is_overflow(branching_factor) {
                    self.split(id)
                } else {
                    InsertAction::Inserted
                };
            }
            Node::Internal(internal) => internal.child_index(&key),
        };
        let child_id = self.internal_mut(id).child(child);
        match self.insert(child_id, key, value, branching_factor) {
            InsertAction::Split(separator, sibling) => {
                let internal = self.internal_mut(id);
                internal.insert_child(child, separator, sibling);
                if internal.is_overflow(branching_factor) {
                    self.split(id)
                } else {
                    InsertAction::Inserted
                }
            }
            InsertAction::Inserted => InsertAction::Inserted,
        }
    }

    /// Splits the overflowing node `id`, returning the new right sibling
    /// and the separator the parent should place in front of it.
    pub(crate) fn split(&mut self, id: NodeId) -> InsertAction<K> {
        match &mut self.nodes[id] {
            Node::Leaf(leaf) => {
                let mut sibling = leaf.split_off();
                let next = leaf.next;
                sibling.previous = Some(id);
                sibling.next = next;
                let separator = sibling.keys[0].clone();
                trace!(
                    "split leaf {} at {}, next leaf {:?}",
                    id,
                    leaf.len(),
                    next
                );
                let sibling_id = self.alloc(Node::Leaf(sibling));
                self.leaf_mut(id).next = Some(sibling_id);
                if let Some(next) = next {
                    self.leaf_mut(next).previous = Some(sibling_id);
                }
                InsertAction::Split(separator, sibling_id)
            }
            Node::Internal(internal) => {
                let sibling = internal.split_off();
                trace!(
                    "split internal node {} keeping {} children",
                    id,
                    internal.children.len()
                );
                let sibling_id = self.alloc(Node::Internal(sibling));
                let separator = match self.first_leaf_key(sibling_id) {
                    Some(key) => key.clone(),
                    None => unreachable!("split produced an empty subtree"),
                };
                InsertAction::Split(separator, sibling_id)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grow(nodes: &mut Nodes<i32, i32>, root: NodeId, key: i32, factor: usize) -> NodeId {
        match nodes.insert(root, key, key * 10, factor) {
            InsertAction::Inserted => root,
            InsertAction::Split(separator, sibling) => {
                nodes.alloc(Node::Internal(Internal::new_root(root, separator, sibling)))
            }
        }
    }

    #[test]
    fn leaf_split_splices_the_chain() {
        let mut nodes = Nodes::new();
        let mut root = nodes.alloc(Node::Leaf(Leaf::new()));
        for k in 1..=5 {
            root = grow(&mut nodes, root, k, 3);
        }
        // [1, 2] <-> [3, 4] <-> [5]
        let first = nodes.first_leaf(root);
        let second = nodes.leaf(first).next.unwrap();
        let third = nodes.leaf(second).next.unwrap();
        assert_eq!(None, nodes.leaf(first).previous);
        assert_eq!(Some(first), nodes.leaf(second).previous);
        assert_eq!(Some(second), nodes.leaf(third).previous);
        assert_eq!(None, nodes.leaf(third).next);
        assert_eq!(third, nodes.last_leaf(root));
        assert_eq!(vec![3, 4], nodes.leaf(second).keys);
        assert_eq!(vec![50], nodes.leaf(third).values);
    }

    #[test]
    fn split_in_the_middle_of_the_chain() {
        let mut nodes = Nodes::new();
        let mut root = nodes.alloc(Node::Leaf(Leaf::new()));
        for k in [10, 20, 30, 40, 11, 12] {
            root = grow(&mut nodes, root, k, 3);
        }
        let mut keys = Vec::new();
        let mut leaf = Some(nodes.first_leaf(root));
        let mut previous = None;
        while let Some(id) = leaf {
            assert_eq!(previous, nodes.leaf(id).previous);
            keys.extend(nodes.leaf(id).keys.iter().copied());
            previous = Some(id);
            leaf = nodes.leaf(id).next;
        }
        assert_eq!(vec![10, 11, 12, 20, 30, 40], keys);
    }

    #[test]
    fn descent_towards_duplicates() {
        let mut nodes = Nodes::new();
        let mut root = nodes.alloc(Node::Leaf(Leaf::new()));
        for k in [2, 2, 2] {
            root = grow(&mut nodes, root, k, 3);
        }
        // [2, 2] | [2]: inserts go right, lookups start left.
        assert_eq!(Some(&2), nodes.first_leaf_key(root));
        assert_eq!(nodes.last_leaf(root), nodes.find_leaf(root, &2));
        assert_eq!(nodes.first_leaf(root), nodes.find_leaf_lower(root, &2));
    }

    #[test]
    fn internal_split_derives_separator_from_leaf() {
        let mut nodes = Nodes::new();
        let mut root = nodes.alloc(Node::Leaf(Leaf::new()));
        for k in 1..=7 {
            root = grow(&mut nodes, root, k, 3);
        }
        assert_eq!(&[5], nodes.get(root).keys());
        let Node::Internal(top) = nodes.get(root) else {
            panic!("root should be internal");
        };
        assert_eq!(&[3], nodes.get(top.children[0]).keys());
        assert_eq!(&[7], nodes.get(top.children[1]).keys());
        assert_eq!(Some(&5), nodes.first_leaf_key(top.children[1]));
    }

    #[test]
    fn arena_counts_every_split() {
        let mut nodes = Nodes::new();
        let mut root = nodes.alloc(Node::Leaf(Leaf::new()));
        for k in 1..=3 {
            root = grow(&mut nodes, root, k, 3);
        }
        // [1, 2] | [3] under a new root.
        assert_eq!(3, nodes.len());
        assert!(!nodes.get(root).is_overflow(3));
        assert!(!nodes.get(nodes.first_leaf(root)).is_overflow(3));
    }
}
