use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lz4x::{Compressor, FavorMode};

fn corpus() -> Vec<u8> {
    let mut data = Vec::with_capacity(256 * 1024);
    while data.len() < 256 * 1024 {
        data.extend_from_slice(b"the quick brown fox jumps over the lazy dog, again and again. ");
    }
    data
}

fn bench_shrink_block(c: &mut Criterion) {
    let window = corpus();
    c.bench_function("shrink_block_256k_repetitive", |b| {
        b.iter(|| {
            let mut compressor = Compressor::new(window.len(), FavorMode::Ratio);
            let mut out = Vec::new();
            compressor
                .shrink_block(black_box(&window), 0, window.len(), &mut out, window.len() * 2, false)
                .unwrap();
            black_box(out.len())
        })
    });
}

criterion_group!(benches, bench_shrink_block);
criterion_main!(benches);
