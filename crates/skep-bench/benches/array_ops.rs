//! Criterion micro-benchmarks for the skep array, with `std::vec::Vec`
//! run on identical workloads as the baseline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skep::DynArray;
use skep_bench::{apply_to_array, apply_to_vec, mixed_ops};

const GROWTH_LEN: u64 = 10_000;
const SHIFT_LEN: usize = 2_000;
const WORKLOAD_SEED: u64 = 42;
const WORKLOAD_OPS: usize = 10_000;

fn bench_push_growth(c: &mut Criterion) {
    c.bench_function("skep_push_10k_from_empty", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for n in 0..GROWTH_LEN {
                array.push(black_box(n));
            }
            black_box(array.len())
        });
    });

    c.bench_function("vec_push_10k_from_empty", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for n in 0..GROWTH_LEN {
                vec.push(black_box(n));
            }
            black_box(vec.len())
        });
    });
}

fn bench_push_preallocated(c: &mut Criterion) {
    c.bench_function("skep_push_10k_preallocated", |b| {
        b.iter(|| {
            let mut array = DynArray::with_capacity(GROWTH_LEN as usize);
            for n in 0..GROWTH_LEN {
                array.push(black_box(n));
            }
            black_box(array.len())
        });
    });
}

fn bench_insert_front(c: &mut Criterion) {
    c.bench_function("skep_insert_front_2k", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for n in 0..SHIFT_LEN as u64 {
                array.insert(0, black_box(n));
            }
            black_box(array.len())
        });
    });

    c.bench_function("vec_insert_front_2k", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for n in 0..SHIFT_LEN as u64 {
                vec.insert(0, black_box(n));
            }
            black_box(vec.len())
        });
    });
}

fn bench_remove_front(c: &mut Criterion) {
    c.bench_function("skep_remove_front_2k", |b| {
        b.iter(|| {
            let mut array = DynArray::with_capacity(SHIFT_LEN);
            for n in 0..SHIFT_LEN as u64 {
                array.push(n);
            }
            while !array.is_empty() {
                black_box(array.remove(0));
            }
        });
    });
}

fn bench_clone(c: &mut Criterion) {
    let mut array = DynArray::new();
    for n in 0..GROWTH_LEN {
        array.push(n);
    }
    c.bench_function("skep_clone_10k", |b| {
        b.iter(|| black_box(array.clone()));
    });
}

fn bench_iter_sum(c: &mut Criterion) {
    let mut array = DynArray::new();
    for n in 0..GROWTH_LEN {
        array.push(n);
    }
    c.bench_function("skep_iter_sum_10k", |b| {
        b.iter(|| {
            let total: u64 = array.iter().sum();
            black_box(total)
        });
    });
}

fn bench_mixed_workload(c: &mut Criterion) {
    let ops = mixed_ops(WORKLOAD_SEED, WORKLOAD_OPS);

    c.bench_function("skep_mixed_workload_10k", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for &op in &ops {
                apply_to_array(&mut array, op);
            }
            black_box(array.len())
        });
    });

    c.bench_function("vec_mixed_workload_10k", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for &op in &ops {
                apply_to_vec(&mut vec, op);
            }
            black_box(vec.len())
        });
    });
}

criterion_group!(
    benches,
    bench_push_growth,
    bench_push_preallocated,
    bench_insert_front,
    bench_remove_front,
    bench_clone,
    bench_iter_sum,
    bench_mixed_workload
);
criterion_main!(benches);
