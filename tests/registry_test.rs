//! Integration tests for registering custom scorers and expanders.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rankwell::error::{RankwellError, Result};
use rankwell::expansion::{
    ExpansionContext, ExpansionSession, FnExpander, IndexSchema, Language, QueryToken,
    TokenFlags,
};
use rankwell::extension::ExtensionRegistry;
use rankwell::scoring::{
    DocumentMetadata, FnScorer, IndexStats, ResultNode, ScoreResult, ScoringContext,
};

#[derive(Debug)]
struct PrivData {
    freed: Arc<AtomicUsize>,
}

impl Drop for PrivData {
    fn drop(&mut self) {
        self.freed.fetch_add(1, Ordering::SeqCst);
    }
}

fn custom_registry(freed: &Arc<AtomicUsize>) -> Result<ExtensionRegistry> {
    let mut registry = ExtensionRegistry::with_defaults();

    let data = PrivData {
        freed: Arc::clone(freed),
    };
    registry.register_scorer(
        "example_scorer",
        FnScorer::new("example_scorer", move |_, _, _, _| {
            let _held = &data;
            ScoreResult::included(3.5, None)
        }),
    )?;

    registry.register_scorer(
        "filterout_scorer",
        FnScorer::new("filterout_scorer", |_, _, _, _| ScoreResult::excluded(None)),
    )?;

    let data = PrivData {
        freed: Arc::clone(freed),
    };
    registry.register_expander(
        "example_expander",
        FnExpander::new("example_expander", move |_, _, _, sink| {
            let _held = &data;
            sink.expand_token("foo".to_string(), 0x00ff as TokenFlags);
            Ok(())
        }),
    )?;

    registry.register_expander(
        "failing_expander",
        FnExpander::new("failing_expander", |_, _, token, _| {
            Err(RankwellError::query(format!("cannot expand '{}'", token.text())))
        }),
    )?;

    Ok(registry)
}

#[test]
fn test_custom_extensions() -> Result<()> {
    let freed = Arc::new(AtomicUsize::new(0));
    let registry = custom_registry(&freed)?;

    let ctx = ScoringContext::new(IndexStats::default());
    let tree = ResultNode::virtual_match(1.0, 1);
    let dmd = DocumentMetadata::new(1.0, 1, 1);

    let example = registry.require_scorer("example_scorer")?;
    assert_eq!(example.score(&ctx, &tree, &dmd, 0.0).score(), Some(3.5));

    let filter = registry.require_scorer("filterout_scorer")?;
    assert!(filter.score(&ctx, &tree, &dmd, 0.0).is_excluded());

    let schema = IndexSchema::new();
    let mut session = ExpansionSession::new(
        registry.require_expander("example_expander")?,
        ExpansionContext::new(Language::English, &schema),
    );
    let out = session.expand(&QueryToken::new("hello"))?;
    assert_eq!(out[0].text(), Some("foo"));

    Ok(())
}

#[test]
fn test_expander_error_propagates() -> Result<()> {
    let freed = Arc::new(AtomicUsize::new(0));
    let registry = custom_registry(&freed)?;

    let schema = IndexSchema::new();
    let mut session = ExpansionSession::new(
        registry.require_expander("failing_expander")?,
        ExpansionContext::new(Language::English, &schema),
    );
    let err = session.expand(&QueryToken::new("hello")).unwrap_err();
    assert!(matches!(err, RankwellError::Query(_)));

    Ok(())
}

#[test]
fn test_conflicting_names_rejected() -> Result<()> {
    let freed = Arc::new(AtomicUsize::new(0));
    let mut registry = custom_registry(&freed)?;

    // builtin names are taken too
    let result = registry.register_scorer(
        "BM25",
        FnScorer::new("BM25", |_, _, _, _| ScoreResult::included(0.0, None)),
    );
    assert!(matches!(result, Err(RankwellError::Extension(_))));

    let result = registry.register_expander(
        "example_expander",
        FnExpander::new("example_expander", |_, _, _, _| Ok(())),
    );
    assert!(result.is_err());

    // the first binding stays active
    assert_eq!(registry.require_scorer("BM25")?.name(), "BM25");
    assert!(registry.scorer_names().contains(&"example_scorer"));

    Ok(())
}

#[test]
fn test_private_data_released_once() -> Result<()> {
    let freed = Arc::new(AtomicUsize::new(0));
    let registry = custom_registry(&freed)?;

    // a looked-up handle keeps the implementation alive
    let scorer = registry.require_scorer("example_scorer")?;
    drop(registry);
    assert_eq!(freed.load(Ordering::SeqCst), 1);

    drop(scorer);
    assert_eq!(freed.load(Ordering::SeqCst), 2);

    Ok(())
}

#[test]
fn test_concurrent_lookups() -> Result<()> {
    let freed = Arc::new(AtomicUsize::new(0));
    let registry = Arc::new(custom_registry(&freed)?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let ctx = ScoringContext::new(IndexStats::default());
                let scorer = registry.scorer("example_scorer").unwrap();
                scorer
                    .score(
                        &ctx,
                        &ResultNode::virtual_match(1.0, 1),
                        &DocumentMetadata::new(1.0, 1, 1),
                        0.0,
                    )
                    .score()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(3.5));
    }

    Ok(())
}
