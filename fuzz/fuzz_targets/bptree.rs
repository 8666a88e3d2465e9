#![no_main]

use std::fmt::Debug;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bptree::BPTree;

#[derive(Arbitrary, Debug)]
enum Action<A> {
    Insert(A),
    Get(A),
    AtLeast(A),
    AtMost(A),
}

fuzz_target!(|input: (u8, Vec<Action<u8>>)| {
    let (factor, actions) = input;
    let factor = 3 + (factor % 8) as usize;
    let mut tree = BPTree::new(factor).unwrap();
    // Stable model: entries in key order, equal keys in arrival order.
    let mut nat: Vec<(u8, usize)> = Vec::new();
    for (serial, action) in actions.into_iter().enumerate() {
        match action {
            Action::Insert(key) => {
                let at = nat.partition_point(|(k, _)| *k <= key);
                nat.insert(at, (key, serial));
                tree.insert(key, serial);
            }
            Action::Get(key) => {
                let first = nat.iter().find(|(k, _)| *k == key).map(|(_, v)| v);
                assert_eq!(first, tree.get(&key));
                let eq: Vec<&usize> = first.into_iter().collect();
                assert_eq!(eq, tree.range_search(&key, "=="));
            }
            Action::AtLeast(key) => {
                let expected: Vec<&usize> =
                    nat.iter().filter(|(k, _)| *k >= key).map(|(_, v)| v).collect();
                assert_eq!(expected, tree.range_search(&key, ">="));
            }
            Action::AtMost(key) => {
                let expected: Vec<&usize> =
                    nat.iter().filter(|(k, _)| *k <= key).map(|(_, v)| v).collect();
                assert_eq!(expected, tree.range_search(&key, "<="));
            }
        }
        assert_eq!(nat.len(), tree.size());
    }
    for ((a, b), (k, v)) in tree.iter().zip(&nat) {
        assert_eq!((a, b), (k, v));
    }
    for ((a, b), (k, v)) in tree.iter().rev().zip(nat.iter().rev()) {
        assert_eq!((a, b), (k, v));
    }
});
