//! Benchmarks for the string distance kernels.
//!
//! These measure the kernels that dominate BK-tree and trigram
//! confirmation costs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzkit::{damerau_levenshtein, levenshtein, myers};

const S1: &str = "The quick brown fox jumps over the lazy dog";
const S2: &str = "The quick brown fox jumped over the lazy dogs";

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");

    group.bench_function("levenshtein", |b| {
        b.iter(|| levenshtein(black_box(S1), black_box(S2)))
    });
    group.bench_function("damerau_levenshtein", |b| {
        b.iter(|| damerau_levenshtein(black_box(S1), black_box(S2)))
    });
    group.bench_function("myers", |b| {
        b.iter(|| myers(black_box(S1), black_box(S2)))
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein_scaling");

    for len in [8, 32, 128, 512] {
        let a: String = "ab".repeat(len / 2);
        let b: String = "ba".repeat(len / 2);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| levenshtein(black_box(&a), black_box(&b)))
        });
    }

    group.finish();
}

fn bench_unicode_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein_unicode");

    let ascii = ("approximate matching", "approximate watching");
    let unicode = ("приближённое сравнение", "приближенное сравнения");

    group.bench_function("ascii_fast_path", |b| {
        b.iter(|| levenshtein(black_box(ascii.0), black_box(ascii.1)))
    });
    group.bench_function("scalar_path", |b| {
        b.iter(|| levenshtein(black_box(unicode.0), black_box(unicode.1)))
    });

    group.finish();
}

criterion_group!(benches, bench_kernels, bench_scaling, bench_unicode_path);
criterion_main!(benches);
