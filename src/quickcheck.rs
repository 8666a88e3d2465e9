use crate::BPTree;
use ::quickcheck::{Arbitrary, Gen};
use std::iter::FromIterator;

impl<K: Ord + Clone + Arbitrary + Sync, V: Clone + Arbitrary + Sync> Arbitrary for BPTree<K, V> {
    fn arbitrary(g: &mut Gen) -> Self {
        BPTree::from_iter(Vec::<(K, V)>::arbitrary(g))
    }
}
