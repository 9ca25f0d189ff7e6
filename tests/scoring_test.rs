//! Integration tests for the built-in scorers.

use rankwell::extension::ExtensionRegistry;
use rankwell::scoring::{
    Candidate, DocumentMetadata, FnScorer, IndexStats, ResultNode, ScoreExplain, ScoreResult,
    Scorer, ScoringContext, score_candidates,
};

fn stats() -> IndexStats {
    IndexStats {
        num_docs: 100,
        num_terms: 1000,
        avg_doc_len: 12.0,
    }
}

fn sample_tree() -> ResultNode {
    ResultNode::union(
        vec![
            ResultNode::intersect(
                vec![
                    ResultNode::term("quick", 2.0, 1.0, 2).with_offsets(vec![1, 9]),
                    ResultNode::term("fox", 1.0, 1.0, 1).with_offsets(vec![2]),
                ],
                1.0,
            ),
            ResultNode::virtual_match(0.5, 1),
        ],
        2.0,
    )
}

/// Whether the explanation mirrors the shape of the result tree.
fn mirrors(node: &ResultNode, explain: &ScoreExplain) -> bool {
    node.children().len() == explain.children.len()
        && node
            .children()
            .iter()
            .zip(&explain.children)
            .all(|(n, e)| mirrors(n, e))
}

#[test]
fn test_tfidf_scores_intersection() {
    let registry = ExtensionRegistry::with_defaults();
    let scorer = registry.require_scorer("TFIDF").unwrap();

    let tree = ResultNode::intersect(
        vec![
            ResultNode::term("a", 2.0, 1.0, 2).with_offsets(vec![1]),
            ResultNode::term("b", 1.0, 1.0, 1).with_offsets(vec![2]),
        ],
        1.0,
    );
    let dmd = DocumentMetadata::new(1.0, 2, 10);
    let ctx = ScoringContext::new(stats());

    // (1*2*2 + 1*1*1) * 1.0 / max_freq 2 / slop 1
    let result = scorer.score(&ctx, &tree, &dmd, 0.0);
    assert_eq!(result.score(), Some(2.5));
    assert!(result.explain.is_none());
}

#[test]
fn test_explain_does_not_change_scores() {
    let registry = ExtensionRegistry::with_defaults();
    let dmd = DocumentMetadata::new(0.7, 3, 14).with_payload(vec![1, 2, 3]);
    let tree = sample_tree();

    for name in registry.scorer_names() {
        let scorer = registry.require_scorer(name).unwrap();
        let plain = ScoringContext::new(stats()).with_payload(vec![1, 2, 7]);
        let explained = plain.clone().with_explain(true);

        let a = scorer.score(&plain, &tree, &dmd, 0.0);
        let b = scorer.score(&explained, &tree, &dmd, 0.0);

        assert_eq!(a.outcome, b.outcome, "scorer {name}");
        assert!(a.explain.is_none());
        assert!(b.explain.is_some(), "scorer {name}");
    }
}

#[test]
fn test_explain_mirrors_result_tree() {
    let tree = sample_tree();
    let dmd = DocumentMetadata::new(1.0, 2, 12);
    let ctx = ScoringContext::new(stats()).with_explain(true);
    let registry = ExtensionRegistry::with_defaults();

    // DISMAX explains the tree directly
    let dismax = registry.require_scorer("DISMAX").unwrap();
    let explain = dismax.score(&ctx, &tree, &dmd, 0.0).explain.unwrap();
    assert!(mirrors(&tree, &explain));

    // TFIDF and BM25 wrap the tree explanation in a final node
    for name in ["TFIDF", "TFIDF.DOCNORM", "BM25"] {
        let scorer = registry.require_scorer(name).unwrap();
        let explain = scorer.score(&ctx, &tree, &dmd, 0.0).explain.unwrap();
        assert_eq!(explain.children.len(), 1, "scorer {name}");
        assert!(mirrors(&tree, &explain.children[0]), "scorer {name}");
    }
}

#[test]
fn test_scores_are_deterministic() {
    let registry = ExtensionRegistry::with_defaults();
    let tree = sample_tree();
    let dmd = DocumentMetadata::new(0.9, 2, 20);
    let ctx = ScoringContext::new(stats()).with_explain(true);

    for name in registry.scorer_names() {
        let scorer = registry.require_scorer(name).unwrap();
        let first = scorer.score(&ctx, &tree, &dmd, 0.0);
        let second = scorer.score(&ctx, &tree, &dmd, 0.0);
        assert_eq!(first, second, "scorer {name}");
    }
}

#[test]
fn test_zero_document_score() {
    let registry = ExtensionRegistry::with_defaults();
    let dmd = DocumentMetadata::new(0.0, 2, 12);
    let ctx = ScoringContext::new(stats()).with_explain(true);

    for name in ["TFIDF", "TFIDF.DOCNORM", "DOCSCORE"] {
        let scorer = registry.require_scorer(name).unwrap();
        let result = scorer.score(&ctx, &sample_tree(), &dmd, 0.0);
        assert_eq!(result.score(), Some(0.0), "scorer {name}");
        assert!(!result.is_excluded());
    }

    let tfidf = registry.require_scorer("TFIDF").unwrap();
    let explain = tfidf.score(&ctx, &sample_tree(), &dmd, 0.0).explain.unwrap();
    assert_eq!(explain.text, "Document score is 0");
}

#[test]
fn test_min_score_prunes() {
    let registry = ExtensionRegistry::with_defaults();
    let dmd = DocumentMetadata::new(1.0, 2, 12);
    let ctx = ScoringContext::new(stats()).with_explain(true);

    for name in ["TFIDF", "BM25"] {
        let scorer = registry.require_scorer(name).unwrap();
        let result = scorer.score(&ctx, &sample_tree(), &dmd, 1.0e9);
        assert_eq!(result.score(), Some(0.0), "scorer {name}");
        let text = result.explain.unwrap().text;
        assert!(text.contains("smaller than minimum score"), "scorer {name}: {text}");
    }
}

#[test]
fn test_hamming_payloads() {
    let registry = ExtensionRegistry::with_defaults();
    let hamming = registry.require_scorer("HAMMING").unwrap();
    let tree = ResultNode::virtual_match(1.0, 1);

    let ctx = ScoringContext::new(stats()).with_payload(vec![0b1010, 0xFF]);
    let same = DocumentMetadata::new(1.0, 1, 1).with_payload(vec![0b1010, 0xFF]);
    let two_bits = DocumentMetadata::new(1.0, 1, 1).with_payload(vec![0b0110, 0xFF]);
    let shorter = DocumentMetadata::new(1.0, 1, 1).with_payload(vec![0b1010]);

    assert_eq!(hamming.score(&ctx, &tree, &same, 0.0).score(), Some(1.0));
    assert_eq!(
        hamming.score(&ctx, &tree, &two_bits, 0.0).score(),
        Some(1.0 / 3.0)
    );
    assert_eq!(hamming.score(&ctx, &tree, &shorter, 0.0).score(), Some(0.0));
}

#[test]
fn test_filter_out_is_not_zero() {
    let filter = FnScorer::new("filterout", |_, _, _, _| ScoreResult::excluded(None));
    let ctx = ScoringContext::new(stats());
    let candidates = vec![
        Candidate {
            result: sample_tree(),
            metadata: DocumentMetadata::new(1.0, 1, 1),
        };
        3
    ];

    let results = score_candidates(&filter, &ctx, &candidates, 0.0);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(ScoreResult::is_excluded));
    assert!(results.iter().all(|r| r.score().is_none()));
}

#[test]
fn test_result_tree_from_json() {
    let json = r#"{
        "type": "aggregate",
        "kind": "union",
        "weight": 1.0,
        "freq": 3,
        "children": [
            { "type": "term", "term": { "term": "a", "idf": 1.0 }, "weight": 1.0, "freq": 3 },
            { "type": "term", "weight": 1.0, "freq": 1 }
        ]
    }"#;
    let tree: ResultNode = serde_json::from_str(json).unwrap();
    let ctx = ScoringContext::new(stats());
    let dmd = DocumentMetadata::new(2.0, 3, 10);

    let registry = ExtensionRegistry::with_defaults();
    let dismax = registry.require_scorer("DISMAX").unwrap();
    // union keeps the best child: 1.0 * 3
    assert_eq!(dismax.score(&ctx, &tree, &dmd, 0.0).score(), Some(3.0));
}
