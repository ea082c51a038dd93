use criterion::{Criterion, black_box, criterion_group, criterion_main};

use invidx::{Engine, EngineOptions, MemoryStore, SearchOptions};

fn document(seed: usize) -> String {
    let words = [
        "widget", "gadget", "sprocket", "flange", "gear", "lever", "pulley",
        "spring", "bolt", "washer", "bracket", "spindle",
    ];
    (0..40)
        .map(|i| words[(seed + i * 7) % words.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_indexing(c: &mut Criterion) {
    c.bench_function("index_document", |b| {
        let engine = Engine::new(MemoryStore::new(), EngineOptions::default());
        let mut doc = 0usize;
        b.iter(|| {
            engine
                .index(document(doc), &format!("doc{}", doc), &["bench"])
                .unwrap();
            doc += 1;
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let engine = Engine::new(MemoryStore::new(), EngineOptions::default());
    for doc in 0..500 {
        engine
            .index(document(doc), &format!("doc{}", doc), &["bench"])
            .unwrap();
    }

    c.bench_function("search_single_term", |b| {
        let options = SearchOptions::default();
        b.iter(|| {
            let results = engine.search("widget", &["bench"], &options).unwrap();
            black_box(results.ids.len())
        });
    });
}

criterion_group!(benches, bench_indexing, bench_search);
criterion_main!(benches);
