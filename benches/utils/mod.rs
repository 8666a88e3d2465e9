#![allow(dead_code)]
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fmt::Debug;

// Trait for generating test data
pub trait TestData: Clone + Debug + Ord {
    fn generate(size: usize) -> Vec<Self>;
}

impl TestData for i64 {
    fn generate(size: usize) -> Vec<Self> {
        let mut gen = SmallRng::seed_from_u64(1);
        (0..size).map(|_| gen.random::<i64>()).collect()
    }
}

impl TestData for String {
    fn generate(size: usize) -> Vec<Self> {
        let mut gen = SmallRng::seed_from_u64(1);
        (0..size)
            .map(|_| {
                let len = gen.random_range(5..20);
                (0..len)
                    .map(|_| gen.random_range(b'a'..=b'z') as char)
                    .collect()
            })
            .collect()
    }
}

/// Keys drawn from a small domain, so that most of them repeat.
pub fn generate_duplicates(size: usize, distinct: i64) -> Vec<i64> {
    let mut gen = SmallRng::seed_from_u64(1);
    (0..size).map(|_| gen.random_range(0..distinct)).collect()
}

pub fn reorder<A: Clone>(vec: &[A]) -> Vec<A> {
    let mut gen = SmallRng::seed_from_u64(1);
    let mut out = vec.to_vec();
    out.shuffle(&mut gen);
    out
}
