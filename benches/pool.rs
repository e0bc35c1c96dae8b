//! Benchmarks for pool allocation churn.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memds::PhoneDirectory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    for size in [1_000, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("PhoneDirectory", size), &size, |b, &size| {
            b.iter(|| {
                let mut dir = PhoneDirectory::new(size);
                while dir.get() >= 0 {}
                black_box(dir)
            });
        });
    }

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for size in [1_000, 100_000, 1_000_000] {
        let mut rng = StdRng::seed_from_u64(9);
        let ops: Vec<(bool, i32)> = (0..10_000)
            .map(|_| (rng.gen_bool(0.5), rng.gen_range(0..size as i32)))
            .collect();

        group.bench_with_input(BenchmarkId::new("PhoneDirectory", size), &ops, |b, ops| {
            let mut base = PhoneDirectory::new(size);
            while base.get() >= 0 {}
            b.iter(|| {
                let mut dir = base.clone();
                for &(get, id) in ops {
                    if get {
                        black_box(dir.get());
                    } else {
                        dir.release(id);
                    }
                }
                black_box(dir)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &ops, |b, ops| {
            b.iter(|| {
                let mut released: BTreeSet<i32> = BTreeSet::new();
                for &(get, id) in ops {
                    if get {
                        black_box(released.pop_first());
                    } else {
                        released.insert(id);
                    }
                }
                black_box(released)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fill, bench_churn);
criterion_main!(benches);
