use std::collections::HashSet;
use std::time::Instant;

use futures::future::join_all;
use metrics::histogram;
use tracing::{info, warn};

use crate::infra::telemetry::METRIC_WARM_MS;

use super::store::CollectionCache;

/// Pre-loads a fixed set of well-known collections so first real requests
/// are cache hits. Purely an optimization: failures are logged and the
/// affected collections load lazily later.
pub struct CacheWarmer {
    cache: CollectionCache,
}

impl CacheWarmer {
    pub fn new(cache: CollectionCache) -> Self {
        Self { cache }
    }

    /// Warm the given collections concurrently, returning how many loaded.
    pub async fn warm(&self, collections: &[String]) -> usize {
        let warm_started_at = Instant::now();

        let mut seen = HashSet::new();
        let unique: Vec<&String> = collections
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .collect();

        let loads = unique.into_iter().map(|name| async move {
            let loaded = self.cache.get(name).await.is_some();
            (name, loaded)
        });

        let mut warmed = 0;
        for (name, loaded) in join_all(loads).await {
            if loaded {
                warmed += 1;
                info!(target = "glifo::cache_warmer", collection = %name, "collection warmed");
            } else {
                warn!(
                    target = "glifo::cache_warmer",
                    collection = %name,
                    "collection could not be warmed"
                );
            }
        }

        histogram!(METRIC_WARM_MS).record(warm_started_at.elapsed().as_secs_f64() * 1000.0);

        warmed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::icon::CollectionDocument;
    use crate::infra::source::{CollectionSource, SourceError};

    struct RecordingSource {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl CollectionSource for RecordingSource {
        async fn load(&self, name: &str) -> Result<Option<CollectionDocument>, SourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if name == "absent" {
                return Ok(None);
            }
            let json = format!(r#"{{ "prefix": "{name}", "icons": {{}} }}"#);
            Ok(Some(serde_json::from_str(&json).expect("valid document")))
        }
    }

    #[tokio::test]
    async fn warm_loads_each_collection_once() {
        let source = Arc::new(RecordingSource {
            loads: AtomicUsize::new(0),
        });
        let cache = CollectionCache::new(Arc::clone(&source) as Arc<dyn CollectionSource>);
        let warmer = CacheWarmer::new(cache.clone());

        let warmed = warmer
            .warm(&[
                "lucide".to_string(),
                "simple-icons".to_string(),
                "lucide".to_string(),
            ])
            .await;

        assert_eq!(warmed, 2);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        assert!(cache.is_loaded("lucide"));
        assert!(cache.is_loaded("simple-icons"));
    }

    #[tokio::test]
    async fn warm_tolerates_missing_collections() {
        let source = Arc::new(RecordingSource {
            loads: AtomicUsize::new(0),
        });
        let cache = CollectionCache::new(source as Arc<dyn CollectionSource>);
        let warmer = CacheWarmer::new(cache.clone());

        let warmed = warmer
            .warm(&["lucide".to_string(), "absent".to_string()])
            .await;

        assert_eq!(warmed, 1);
        assert!(!cache.is_loaded("absent"));
    }
}
