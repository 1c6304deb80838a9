//! Engine calls open their `lore.*` spans.

use std::sync::{Arc, Mutex};

use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

use lore_core::config::LoreConfig;
use lore_core::models::*;
use lore_core::traits::IValidator;
use lore_core::Deadline;
use lore_graph::{DiscoveryOptions, HybridQuery, TraversalEngine};
use lore_storage::StorageEngine;
use lore_validation::ValidationEngine;

struct SpanNames(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name().to_string());
    }
}

fn finding() -> RawFinding {
    RawFinding {
        id: "f1".into(),
        content: "Omega-3 fatty acids support cardiovascular health. ".repeat(3),
        content_type: ContentType::Research,
        evidence_score: 0.9,
        novelty_score: 0.8,
        embeddings: EmbeddingPair::text(vec![1.0, 0.0, 0.0, 0.0]),
        query: None,
        source: SourceMetadata {
            source_ref: "pubmed:f1".into(),
            source_url: None,
            kind: SourceKind::Academic,
            authors: Vec::new(),
            published_at: None,
        },
        topics: vec!["omega-3".into()],
        keywords: Vec::new(),
    }
}

#[test]
fn engine_calls_open_named_spans() {
    let names = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Registry::default().with(SpanNames(Arc::clone(&names)));

    tracing::subscriber::with_default(subscriber, || {
        let mut config = LoreConfig::default();
        config.embedding.text_dimensions = 4;
        let store = Arc::new(StorageEngine::open_in_memory(&config).unwrap());
        let traversal = TraversalEngine::new(Arc::clone(&store), config.traversal.clone());

        traversal
            .related_concepts("omega-3", 0.5, 2, Deadline::none())
            .unwrap();
        // Unknown item; only the span matters here.
        let _ = traversal.discover_relationships(
            "missing",
            DiscoveryOptions::new(0.5, 5),
            Deadline::none(),
        );
        traversal.paths_between("a", "b", 2, Deadline::none()).unwrap();
        traversal
            .hybrid_search(
                &HybridQuery::new(vec![1.0, 0.0, 0.0, 0.0], 5),
                Deadline::none(),
            )
            .unwrap();

        let validation = ValidationEngine::default();
        validation.validate(&finding(), Deadline::none()).unwrap();
        validation
            .validate_batch(&[finding()], Deadline::none())
            .unwrap();
    });

    let names = names.lock().unwrap();
    let count = |name: &str| names.iter().filter(|n| n.as_str() == name).count();
    assert_eq!(count("lore.traversal"), 1);
    assert_eq!(count("lore.discovery"), 1);
    assert_eq!(count("lore.traversal.paths"), 1);
    assert_eq!(count("lore.traversal.hybrid"), 1);
    assert_eq!(count("lore.validation"), 2);
}
