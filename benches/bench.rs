//! Criterion benchmarks for Rankwell.
//!
//! Covers:
//! - Scoring deep result trees with and without explanations
//! - Parallel scoring of candidate batches
//! - Query term expansion through the default expander

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rankwell::expansion::{
    ExpansionContext, ExpansionSession, IndexSchema, Language, QueryToken, SynonymMap,
};
use rankwell::extension::ExtensionRegistry;
use rankwell::scoring::{
    Candidate, DocumentMetadata, IndexStats, ResultNode, ScoringContext, score_candidates,
};

const WORDS: [&str; 16] = [
    "search",
    "engine",
    "running",
    "connected",
    "index",
    "query",
    "document",
    "relevance",
    "ranking",
    "stemming",
    "phonetic",
    "synonym",
    "retrieval",
    "filtering",
    "scoring",
    "explain",
];

/// Generate a result tree of nested intersections and unions.
fn generate_tree(depth: usize, fanout: usize, seed: usize) -> ResultNode {
    if depth == 0 {
        let word = WORDS[seed % WORDS.len()];
        let offsets = (0..3).map(|i| (seed * 7 + i * 13) as u32 % 200).collect();
        return ResultNode::term(word, 1.0 + (seed % 5) as f64 * 0.3, 1.0, 1 + (seed % 4) as u32)
            .with_offsets(offsets);
    }

    let children = (0..fanout)
        .map(|i| generate_tree(depth - 1, fanout, seed * fanout + i + 1))
        .collect();
    if depth % 2 == 0 {
        ResultNode::union(children, 1.0)
    } else {
        ResultNode::intersect(children, 1.0)
    }
}

fn generate_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| Candidate {
            result: generate_tree(3, 3, i),
            metadata: DocumentMetadata::new(1.0, 4, 50 + (i % 100) as u32),
        })
        .collect()
}

fn stats() -> IndexStats {
    IndexStats {
        num_docs: 10_000,
        num_terms: 50_000,
        avg_doc_len: 80.0,
    }
}

/// Benchmark single-document scoring.
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let registry = ExtensionRegistry::with_defaults();
    let tree = generate_tree(4, 3, 1);
    let dmd = DocumentMetadata::new(1.0, 4, 80);
    let plain = ScoringContext::new(stats());
    let explained = plain.clone().with_explain(true);

    for name in ["TFIDF", "BM25", "DISMAX"] {
        let scorer = registry.scorer(name).unwrap();

        group.bench_function(format!("{name}_plain"), |b| {
            b.iter(|| black_box(scorer.score(&plain, black_box(&tree), &dmd, 0.0)))
        });

        group.bench_function(format!("{name}_explain"), |b| {
            b.iter(|| black_box(scorer.score(&explained, black_box(&tree), &dmd, 0.0)))
        });
    }

    group.finish();
}

/// Benchmark parallel batch scoring.
fn bench_batch_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_scoring");

    let registry = ExtensionRegistry::with_defaults();
    let scorer = registry.scorer("BM25").unwrap();
    let ctx = ScoringContext::new(stats());
    let candidates = generate_candidates(1000);

    group.throughput(Throughput::Elements(candidates.len() as u64));
    group.bench_function("bm25_1000_candidates", |b| {
        b.iter(|| black_box(score_candidates(scorer.as_ref(), &ctx, &candidates, 0.0)))
    });

    group.finish();
}

/// Benchmark query term expansion.
fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    let registry = ExtensionRegistry::with_defaults();
    let schema = IndexSchema::new().with_field("body", true).unwrap();
    let synonyms = SynonymMap::from_groups(vec![
        vec!["search".to_string(), "retrieval".to_string()],
        vec!["ranking".to_string(), "scoring".to_string(), "relevance".to_string()],
    ])
    .unwrap();
    let ctx = ExpansionContext::new(Language::English, &schema).with_synonyms(&synonyms);
    let tokens: Vec<QueryToken> = WORDS.iter().map(|w| QueryToken::new(*w)).collect();

    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("default_expander_query", |b| {
        b.iter(|| {
            let mut session = ExpansionSession::new(registry.expander("DEFAULT").unwrap(), ctx);
            for token in &tokens {
                black_box(session.expand(black_box(token)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_batch_scoring, bench_expansion);
criterion_main!(benches);
