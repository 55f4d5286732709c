use boolret_core::{Engine, Normalizer, SourceDocument};
use criterion::{criterion_group, criterion_main, Criterion};

const TEXT: &str = "Information retrieval is finding material of an unstructured nature that satisfies \
an information need from within large collections. Boolean retrieval models answer queries \
with AND, OR and NOT operators, while positional indexes support proximity search. \
See https://example.org/ir for the informationretrieval textbook chapter on datamining.";

fn corpus() -> Vec<SourceDocument> {
    (0..200).map(|i| SourceDocument::text(format!("doc{i}.txt"), TEXT.repeat(1 + i % 5))).collect()
}

fn bench_normalize(c: &mut Criterion) {
    let n = Normalizer::default();
    c.bench_function("normalize_paragraph", |b| b.iter(|| n.normalize(TEXT)));
}

fn bench_queries(c: &mut Criterion) {
    let engine = Engine::build(&corpus(), Normalizer::default());
    c.bench_function("boolean_query", |b| b.iter(|| engine.search("retrieval and boolean or proximity not textbook")));
    c.bench_function("proximity_query", |b| b.iter(|| engine.search("information retrieval /3")));
}

criterion_group!(benches, bench_normalize, bench_queries);
criterion_main!(benches);
