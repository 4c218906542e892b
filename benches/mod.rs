use criterion::{criterion_group, criterion_main};

mod engine;

criterion_group!(
    benches,
    engine::bench_tokenize,
    engine::bench_bind,
    engine::bench_dispatch
);
criterion_main!(benches);
