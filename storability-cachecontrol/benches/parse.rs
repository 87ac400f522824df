//! Benchmarks for the Cache-Control tokenizer and directive parser.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use storability_cachecontrol::{parse, tokenize};

const INPUT: &str = r#"private, no-cache, no-store="header1 header2 header3""#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(INPUT)).count())
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            let count = parse(black_box(INPUT)).count();
            assert_eq!(count, 3);
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
