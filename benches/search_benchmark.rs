use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use docfind::{DocId, DocumentStatus, ExecutionPolicy, SearchEngine};

const VOCABULARY: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "cat", "fluffy", "tail",
    "collar", "groomed", "white", "fancy", "eyes",
];

/// Builds a corpus of `doc_count` documents with `words_per_doc` random
/// vocabulary words each.
fn build_engine(doc_count: usize, words_per_doc: usize) -> SearchEngine {
    let mut rng = rand::thread_rng();
    let mut engine = SearchEngine::new("the over").unwrap();
    for id in 0..doc_count {
        let text: String = (0..words_per_doc)
            .map(|_| VOCABULARY[rng.gen_range(0..VOCABULARY.len())])
            .collect::<Vec<_>>()
            .join(" ");
        engine
            .add_document(
                DocId(id as i32),
                &text,
                DocumentStatus::Actual,
                &[rng.gen_range(-10..10)],
            )
            .unwrap();
    }
    engine
}

fn bench_find_top_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_top_documents");

    for doc_count in [100, 1_000, 10_000] {
        let engine = build_engine(doc_count, 50);
        group.bench_with_input(
            BenchmarkId::new("sequential", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .find_top_documents(black_box("fluffy groomed cat -lazy"))
                        .unwrap()
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .find_top_documents_with_policy(
                            ExecutionPolicy::Parallel,
                            black_box("fluffy groomed cat -lazy"),
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_remove_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");

    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_with_input(
            BenchmarkId::new("policy", format!("{:?}", policy)),
            &policy,
            |b, &policy| {
                b.iter_batched(
                    || build_engine(500, 50),
                    |mut engine| {
                        for id in 0..500 {
                            engine.remove_document_with(policy, DocId(id));
                        }
                        engine
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_find_top_documents, bench_remove_document);
criterion_main!(benches);
