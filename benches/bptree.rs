use bptree::BPTree;
use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use std::collections::BTreeMap;
use std::hint::black_box;

mod utils;
use utils::*;

// Trait to abstract over the index and the std map used as a baseline
trait BenchIndex<K: Clone + Ord, V> {
    fn with_factor(factor: usize) -> Self;
    fn insert(&mut self, k: K, v: V);
    fn get(&self, k: &K) -> Option<&V>;
    fn at_least(&self, k: &K) -> usize;
    fn iter_len(&self) -> usize;
}

impl<K: Clone + Ord, V> BenchIndex<K, V> for BPTree<K, V> {
    fn with_factor(factor: usize) -> Self {
        BPTree::new(factor).unwrap()
    }

    fn insert(&mut self, k: K, v: V) {
        self.insert(k, v)
    }

    fn get(&self, k: &K) -> Option<&V> {
        self.get(k)
    }

    fn at_least(&self, k: &K) -> usize {
        self.range_search(k, ">=").len()
    }

    fn iter_len(&self) -> usize {
        self.iter().count()
    }
}

// Unique keys only: a BTreeMap replaces duplicates.
impl<K: Clone + Ord, V> BenchIndex<K, V> for BTreeMap<K, V> {
    fn with_factor(_factor: usize) -> Self {
        BTreeMap::new()
    }

    fn insert(&mut self, k: K, v: V) {
        self.insert(k, v);
    }

    fn get(&self, k: &K) -> Option<&V> {
        self.get(k)
    }

    fn at_least(&self, k: &K) -> usize {
        self.range(k..).count()
    }

    fn iter_len(&self) -> usize {
        self.iter().count()
    }
}

fn build<M, K, V>(factor: usize, keys: &[K], values: &[V]) -> M
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let mut m = M::with_factor(factor);
    for (k, v) in keys.iter().cloned().zip(values.iter().cloned()) {
        m.insert(k, v);
    }
    m
}

fn bench_insert<M, K, V>(b: &mut Bencher<'_>, factor: usize, size: usize)
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    b.iter(|| build::<M, K, V>(factor, &keys, &values))
}

fn bench_lookup<M, K, V>(b: &mut Bencher<'_>, factor: usize, size: usize)
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let order = reorder(&keys);
    let m: M = build(factor, &keys, &values);
    b.iter(|| {
        for k in &order {
            black_box(m.get(k));
        }
    })
}

fn bench_range_search<M, K, V>(b: &mut Bencher<'_>, factor: usize, size: usize)
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let order = reorder(&keys);
    let m: M = build(factor, &keys, &values);
    b.iter(|| {
        for k in order.iter().take(10) {
            black_box(m.at_least(k));
        }
    })
}

fn bench_iter<M, K, V>(b: &mut Bencher<'_>, factor: usize, size: usize)
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let m: M = build(factor, &keys, &values);
    b.iter(|| black_box(m.iter_len()))
}

fn bench_insert_duplicates(b: &mut Bencher<'_>, factor: usize, size: usize) {
    let keys = generate_duplicates(size, 16);
    b.iter(|| {
        let mut tree = BPTree::new(factor).unwrap();
        for (i, k) in keys.iter().enumerate() {
            tree.insert(*k, i);
        }
        tree
    })
}

// Helper function to run all benchmarks for a specific index/key/value type
fn bench_group<M, K, V>(c: &mut Criterion, group_name: &str)
where
    M: BenchIndex<K, V>,
    K: TestData,
    V: TestData,
{
    let mut group = c.benchmark_group(group_name);

    for factor in [4, 16, 64] {
        for size in [100, 1000, 10000, 100000] {
            group.bench_function(format!("insert_b{}_{}", factor, size), |b| {
                bench_insert::<M, K, V>(b, factor, size)
            });
            group.bench_function(format!("lookup_b{}_{}", factor, size), |b| {
                bench_lookup::<M, K, V>(b, factor, size)
            });
            group.bench_function(format!("range_search_b{}_{}", factor, size), |b| {
                bench_range_search::<M, K, V>(b, factor, size)
            });
        }
        for size in [1000, 10000] {
            group.bench_function(format!("iter_b{}_{}", factor, size), |b| {
                bench_iter::<M, K, V>(b, factor, size)
            });
        }
    }

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("bptree_duplicates");
    for factor in [4, 64] {
        for size in [1000, 10000] {
            group.bench_function(format!("insert_b{}_{}", factor, size), |b| {
                bench_insert_duplicates(b, factor, size)
            });
        }
    }
    group.finish();
}

// Main benchmark entry point
fn bptree_benches(c: &mut Criterion) {
    bench_group::<BPTree<i64, i64>, i64, i64>(c, "bptree_i64");
    bench_group::<BPTree<String, String>, String, String>(c, "bptree_str");
    bench_duplicates(c);

    if std::env::var("BENCH_STD").is_ok() {
        bench_group::<BTreeMap<i64, i64>, i64, i64>(c, "btreemap_i64");
        bench_group::<BTreeMap<String, String>, String, String>(c, "btreemap_str");
    }
}

criterion_group!(benches, bptree_benches);
criterion_main!(benches);
