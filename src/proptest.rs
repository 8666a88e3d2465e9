// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Proptest strategies.
//!
//! These are only available when using the `proptest` feature flag.

use std::ops::Range;

use ::proptest::collection::vec;
use ::proptest::strategy::{BoxedStrategy, Strategy};

use crate::BPTree;

/// A strategy for a [`BPTree`] of a given size, with the default
/// branching factor.
///
/// The size counts inserted entries, duplicate keys included.
///
/// # Examples
///
/// ```rust,no_run
/// # use ::proptest::proptest;
/// proptest! {
///     #[test]
///     fn proptest_works(ref tree in bptree::proptest::bp_tree(0..9999, ".*", 10..100)) {
///         assert!(tree.len() < 100);
///         assert!(tree.len() >= 10);
///     }
/// }
/// ```
pub fn bp_tree<K: Strategy + 'static, V: Strategy + 'static>(
    key: K,
    value: V,
    size: Range<usize>,
) -> BoxedStrategy<BPTree<<K as Strategy>::Value, <V as Strategy>::Value>>
where
    <K as Strategy>::Value: Ord + Clone,
{
    vec((key, value), size)
        .prop_map(BPTree::from_iter)
        .boxed()
}

/// A strategy for a [`BPTree`] whose branching factor is also drawn from
/// `factor`. Factors below 3 are raised to 3.
pub fn bp_tree_with_factor<K: Strategy + 'static, V: Strategy + 'static>(
    factor: Range<usize>,
    key: K,
    value: V,
    size: Range<usize>,
) -> BoxedStrategy<BPTree<<K as Strategy>::Value, <V as Strategy>::Value>>
where
    <K as Strategy>::Value: Ord + Clone,
{
    (factor, vec((key, value), size))
        .prop_map(|(factor, entries)| {
            let factor = factor.max(crate::config::MIN_BRANCHING_FACTOR);
            let mut tree = match BPTree::new(factor) {
                Ok(tree) => tree,
                Err(_) => unreachable!("factor {} is above the minimum", factor),
            };
            tree.extend(entries);
            tree
        })
        .boxed()
}
