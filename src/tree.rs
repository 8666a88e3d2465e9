// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An ordered index with duplicate keys.
//!
//! A [B+tree] [1] whose leaves are chained in key order, so that a
//! lookup costs O(log n) and a range query O(log n + k) for k results.
//! Keys may repeat: every entry is retained, and entries with equal keys
//! keep the order in which they were inserted.
//!
//! [1]: https://en.wikipedia.org/wiki/B%2B_tree

use std::borrow::Borrow;
use std::fmt::{Debug, Display, Error, Formatter, Write};
use std::iter::FromIterator;
use std::slice;

use log::{debug, trace};

use crate::chain::{self, Iter, Keys, Values};
use crate::comparator::Comparator;
use crate::config::{DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR};
use crate::error::{Error as TreeError, Result};
use crate::nodes::internal::Internal;
use crate::nodes::leaf::Leaf;
use crate::nodes::{InsertAction, Node, NodeId, Nodes};

/// An ordered index implemented as a B+tree with a linked leaf chain.
///
/// The branching factor bounds every node: an internal node holds at most
/// `branching_factor` children and a leaf at most `branching_factor - 1`
/// entries. It is fixed when the tree is built.
///
/// # Examples
///
/// ```
/// # use bptree::BPTree;
/// let mut tree = BPTree::new(3).unwrap();
/// for i in 1..=10 {
///     tree.insert(i, i * 100);
/// }
/// assert_eq!(Some(&500), tree.get(&5));
/// assert_eq!(vec![&900, &1000], tree.range_search(&9, ">="));
/// assert_eq!("{[5]}\n{[3], [7, 9]}\n{[1, 2], [3, 4]}, {[5, 6], [7, 8], [9, 10]}\n", tree.to_string());
/// ```
pub struct BPTree<K, V> {
    nodes: Nodes<K, V>,
    root: NodeId,
    branching_factor: usize,
    size: usize,
}

impl<K, V> BPTree<K, V> {
    /// Construct an empty tree.
    ///
    /// Fails with [`Error::Configuration`][TreeError::Configuration] if the
    /// branching factor is 2 or less.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bptree::{BPTree, Error};
    /// assert!(BPTree::<i32, i32>::new(3).is_ok());
    /// assert_eq!(
    ///     Some(Error::Configuration { branching_factor: 2 }),
    ///     BPTree::<i32, i32>::new(2).err()
    /// );
    /// ```
    pub fn new(branching_factor: usize) -> Result<Self> {
        if branching_factor < MIN_BRANCHING_FACTOR {
            debug!("rejecting branching factor {}", branching_factor);
            return Err(TreeError::Configuration { branching_factor });
        }
        Ok(Self::empty(branching_factor))
    }

    fn empty(branching_factor: usize) -> Self {
        let mut nodes = Nodes::new();
        let root = nodes.alloc(Node::Leaf(Leaf::new()));
        BPTree {
            nodes,
            root,
            branching_factor,
            size: 0,
        }
    }

    /// Construct an empty tree with the
    /// [`DEFAULT_BRANCHING_FACTOR`][crate::config::DEFAULT_BRANCHING_FACTOR].
    #[inline]
    #[must_use]
    pub fn with_default() -> Self {
        Self::empty(DEFAULT_BRANCHING_FACTOR)
    }

    #[inline]
    #[must_use]
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    /// The number of entries in the tree, counting every duplicate.
    ///
    /// Time: O(1)
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Same as [`size`][BPTree::size].
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of levels, 1 while the root is still a leaf.
    ///
    /// Every leaf sits at the same depth, so this is the length of any
    /// root to leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.nodes.get(self.root);
        while let Node::Internal(internal) = node {
            node = self.nodes.get(internal.first_child());
            height += 1;
        }
        height
    }

    /// The number of leaves in the chain.
    ///
    /// Time: O(leaves)
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut leaf = Some(self.nodes.first_leaf(self.root));
        while let Some(id) = leaf {
            count += 1;
            leaf = self.nodes.leaf(id).next;
        }
        count
    }

    /// The entry with the smallest key, the first inserted among equals.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.nodes.leaf(self.nodes.first_leaf(self.root)).entry(0)
    }

    /// The entry with the largest key, the last inserted among equals.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        let leaf = self.nodes.leaf(self.nodes.last_leaf(self.root));
        leaf.entry(leaf.len().checked_sub(1)?)
    }

    /// An iterator over all entries in key order, following the leaf chain.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.root, self.size)
    }

    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { it: self.iter() }
    }

    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { it: self.iter() }
    }
}

impl<K: Ord + Clone, V> BPTree<K, V> {
    /// Insert an entry.
    ///
    /// An existing entry with an equal key is kept, the new one is placed
    /// after it.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # use bptree::BPTree;
    /// let mut tree = BPTree::new(3).unwrap();
    /// tree.insert("a", 1);
    /// tree.insert("a", 2);
    /// assert_eq!(2, tree.size());
    /// assert_eq!(Some(&1), tree.get("a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        if let InsertAction::Split(separator, sibling) =
            self.nodes
                .insert(self.root, key, value, self.branching_factor)
        {
            let root = Internal::new_root(self.root, separator, sibling);
            self.root = self.nodes.alloc(Node::Internal(root));
            trace!("root grew to height {}", self.height());
        }
        self.size += 1;
        #[cfg(feature = "debug")]
        self.check_invariants();
    }

    /// Insert an entry whose key may be absent.
    ///
    /// Fails with [`Error::InvalidArgument`][TreeError::InvalidArgument] and
    /// leaves the tree untouched when `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bptree::{BPTree, Error};
    /// let mut tree = BPTree::new(3).unwrap();
    /// assert!(tree.try_insert(Some(1), "one").is_ok());
    /// assert!(matches!(tree.try_insert(None, "none"), Err(Error::InvalidArgument(_))));
    /// assert_eq!(1, tree.size());
    /// ```
    pub fn try_insert(&mut self, key: Option<K>, value: V) -> Result<()> {
        let key = key.ok_or(TreeError::InvalidArgument("key must not be absent"))?;
        self.insert(key, value);
        Ok(())
    }
}

impl<K: Ord, V> BPTree<K, V> {
    /// The value of the first entry whose key equals `key`.
    ///
    /// With duplicates this is the value inserted first.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        let cursor = chain::find_first(&self.nodes, self.root, key)?;
        self.nodes.leaf(cursor.leaf).entry(cursor.index).map(|(_, v)| v)
    }

    /// [`get`][BPTree::get] for a key that may be absent, which finds nothing.
    #[must_use]
    pub fn get_opt<BK>(&self, key: Option<&BK>) -> Option<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        self.get(key?)
    }

    #[must_use]
    pub fn contains_key<BK>(&self, key: &BK) -> bool
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        chain::find_first(&self.nodes, self.root, key).is_some()
    }

    /// Every value stored under a key equal to `key`, in insertion order.
    ///
    /// Time: O(log n + k)
    #[must_use]
    pub fn get_all<BK>(&self, key: &BK) -> Vec<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        chain::equal_walk(&self.nodes, self.root, key)
    }

    /// Range query by comparator symbol.
    ///
    /// `comparator` must be one of `"<="`, `"=="` or `">="`; anything else
    /// yields an empty result rather than an error. Results are in
    /// ascending key order.
    ///
    /// `"=="` is a point lookup and returns at most the first matching
    /// value, whereas `"<="` and `">="` return every matching duplicate.
    /// Use [`get_all`][BPTree::get_all] for all values of one key.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bptree::BPTree;
    /// let mut tree = BPTree::new(3).unwrap();
    /// tree.insert(1, 'a');
    /// tree.insert(2, 'b');
    /// tree.insert(2, 'c');
    /// assert_eq!(vec![&'b'], tree.range_search(&2, "=="));
    /// assert_eq!(vec![&'b', &'c'], tree.range_search(&2, ">="));
    /// assert_eq!(vec![&'a', &'b', &'c'], tree.range_search(&2, "<="));
    /// assert!(tree.range_search(&2, "<").is_empty());
    /// ```
    #[must_use]
    pub fn range_search<BK>(&self, key: &BK, comparator: &str) -> Vec<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        match Comparator::from_symbol(comparator) {
            Some(comparator) => self.range_search_by(key, comparator),
            None => Vec::new(),
        }
    }

    /// [`range_search`][BPTree::range_search] for a key that may be absent.
    ///
    /// An absent key matches nothing.
    #[must_use]
    pub fn range_search_opt<BK>(&self, key: Option<&BK>, comparator: &str) -> Vec<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        match key {
            Some(key) => self.range_search(key, comparator),
            None => Vec::new(),
        }
    }

    /// Range query with a typed [`Comparator`].
    #[must_use]
    pub fn range_search_by<BK>(&self, key: &BK, comparator: Comparator) -> Vec<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        match comparator {
            Comparator::Equal => self.get(key).into_iter().collect(),
            _ => chain::range_walk(&self.nodes, self.root, key, comparator),
        }
    }
}

#[cfg(any(test, feature = "debug"))]
impl<K: Ord, V> BPTree<K, V> {
    /// Verify every structural invariant of the tree, panicking on the
    /// first violation.
    pub fn check_invariants(&self) {
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        let visited = self.check_node(self.root, None, None, 1, &mut leaf_depth, &mut leaves);
        assert_eq!(
            visited,
            self.nodes.len(),
            "every allocated node must be reachable from the root"
        );

        let mut previous = None;
        let mut entries = 0;
        for (i, &id) in leaves.iter().enumerate() {
            let leaf = self.nodes.leaf(id);
            assert_eq!(previous, leaf.previous, "leaf {} has a stale back link", id);
            assert_eq!(
                leaves.get(i + 1).copied(),
                leaf.next,
                "leaf {} has a stale forward link",
                id
            );
            if let (Some(prev), Some(first)) = (previous, leaf.keys.first()) {
                let prev = self.nodes.leaf(prev);
                assert!(
                    prev.keys.last().map_or(true, |last| last <= first),
                    "chain out of order at leaf {}",
                    id
                );
            }
            entries += leaf.len();
            previous = Some(id);
        }
        assert_eq!(self.size, entries, "entry count out of sync");
    }

    fn check_node(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        leaves: &mut Vec<NodeId>,
    ) -> usize {
        let node = self.nodes.get(id);
        let keys = node.keys();
        assert!(
            keys.windows(2).all(|w| w[0] <= w[1]),
            "keys of node {} out of order",
            id
        );
        assert!(
            !node.is_overflow(self.branching_factor),
            "node {} overflows",
            id
        );
        if let (Some(lower), Some(first)) = (lower, keys.first()) {
            assert!(lower <= first, "node {} holds a key below its range", id);
        }
        if let (Some(upper), Some(last)) = (upper, keys.last()) {
            assert!(last <= upper, "node {} holds a key above its range", id);
        }
        match node {
            Node::Leaf(leaf) => {
                assert_eq!(leaf.keys.len(), leaf.values.len(), "leaf {} arity", id);
                assert!(
                    id == self.root || !leaf.keys.is_empty(),
                    "non-root leaf {} is empty",
                    id
                );
                match leaf_depth {
                    Some(expected) => assert_eq!(*expected, depth, "leaf {} depth", id),
                    None => *leaf_depth = Some(depth),
                }
                leaves.push(id);
                1
            }
            Node::Internal(internal) => {
                assert_eq!(
                    internal.keys.len() + 1,
                    internal.children.len(),
                    "internal node {} arity",
                    id
                );
                assert!(internal.children.len() >= 2, "internal node {} degenerate", id);
                let mut visited = 1;
                for (i, &child) in internal.children.iter().enumerate() {
                    let low = if i == 0 { lower } else { internal.keys.get(i - 1) };
                    let high = internal.keys.get(i).or(upper);
                    if i > 0 {
                        assert!(
                            self.nodes.first_leaf_key(child) == internal.keys.get(i - 1),
                            "separator {} of node {} is not derived from its leaf",
                            i - 1,
                            id
                        );
                    }
                    visited += self.check_node(child, low, high, depth + 1, leaf_depth, leaves);
                }
                visited
            }
        }
    }
}

impl<K, V> Default for BPTree<K, V> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<K: Clone, V: Clone> Clone for BPTree<K, V> {
    fn clone(&self) -> Self {
        BPTree {
            nodes: self.nodes.clone(),
            root: self.root,
            branching_factor: self.branching_factor,
            size: self.size,
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BPTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for BPTree<K, V> {}

impl<K: Debug, V: Debug> Debug for BPTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Level-order dump of the node keys.
///
/// One line per level. The children of each node at the previous level
/// form a `{...}` group, each node prints as `[k1, k2, ...]`.
impl<K: Display, V> Display for BPTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mut level: Vec<&[NodeId]> = vec![slice::from_ref(&self.root)];
        while !level.is_empty() {
            let mut next_level = Vec::new();
            for (g, group) in level.iter().enumerate() {
                if g > 0 {
                    f.write_str(", ")?;
                }
                f.write_char('{')?;
                for (i, &id) in group.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let node = self.nodes.get(id);
                    f.write_char('[')?;
                    for (k, key) in node.keys().iter().enumerate() {
                        if k > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", key)?;
                    }
                    f.write_char(']')?;
                    if let Node::Internal(internal) = node {
                        next_level.push(internal.children.as_slice());
                    }
                }
                f.write_char('}')?;
            }
            f.write_char('\n')?;
            level = next_level;
        }
        Ok(())
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for BPTree<K, V> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for BPTree<K, V> {
    fn from_iter<T>(i: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::default();
        tree.extend(i);
        tree
    }
}

impl<K: Ord + Clone, V> From<Vec<(K, V)>> for BPTree<K, V> {
    fn from(vec: Vec<(K, V)>) -> Self {
        vec.into_iter().collect()
    }
}

impl<'a, K: Ord + Clone, V: Clone> From<&'a [(K, V)]> for BPTree<K, V> {
    fn from(slice: &'a [(K, V)]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a BPTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
