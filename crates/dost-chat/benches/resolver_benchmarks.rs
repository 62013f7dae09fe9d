use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dost_chat::{KnowledgeBase, ResponseResolver};
use dost_core::Language;

fn bench_resolve(c: &mut Criterion) {
    let resolver = ResponseResolver::new(Arc::new(KnowledgeBase::builtin()));

    let mut group = c.benchmark_group("resolve_locally");
    group.bench_function("first_category", |b| {
        b.iter(|| resolver.resolve(black_box("DBT क्या है"), Language::Hindi))
    });
    group.bench_function("last_category", |b| {
        b.iter(|| resolver.resolve(black_box("my application was rejected"), Language::English))
    });
    group.bench_function("no_match_long_input", |b| {
        let input = "lorem ipsum dolor sit amet ".repeat(40);
        b.iter(|| resolver.resolve(black_box(&input), Language::English))
    });
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
