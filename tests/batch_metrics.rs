//! Counter coverage for the batch path, using the debugging recorder.

use std::sync::Arc;

use glifo::application::render::RenderOptions;
use glifo::application::service::IconService;
use glifo::cache::CollectionCache;
use glifo::domain::identifier::IconId;
use glifo::infra::source::EmbeddedSource;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

fn counter_value(snapshot: &[(metrics_util::CompositeKey, Option<metrics::Unit>, Option<metrics::SharedString>, DebugValue)], name: &str) -> Option<u64> {
    snapshot.iter().find_map(|(key, _, _, value)| {
        if key.key().name() != name {
            return None;
        }
        match value {
            DebugValue::Counter(count) => Some(*count),
            _ => None,
        }
    })
}

#[tokio::test]
async fn batch_emits_malformed_and_fallback_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("install debugging recorder");

    let cache = CollectionCache::new(Arc::new(EmbeddedSource::new()));
    let fallback = IconId::parse("lucide:circle-help").expect("fallback identifier");
    let service = IconService::new(cache, fallback);

    let outcome = service
        .render_batch(
            &["lucide:home", "lucide:missing", "nope", "also-bad:"],
            &RenderOptions::default(),
        )
        .await;
    assert_eq!(outcome.rendered.len(), 2);

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_value(&snapshot, "glifo_identifier_malformed_total"),
        Some(2)
    );
    assert_eq!(counter_value(&snapshot, "glifo_icon_fallback_total"), Some(1));
    assert_eq!(
        counter_value(&snapshot, "glifo_collection_load_miss_total"),
        Some(1)
    );
}
