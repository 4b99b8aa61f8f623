//! Cache storage and single-flight collection loading.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use metrics::counter;
use tracing::{debug, warn};

use crate::domain::icon::IconCollection;
use crate::infra::source::CollectionSource;
use crate::infra::telemetry::{
    METRIC_LOAD_COALESCED, METRIC_LOAD_FAIL, METRIC_LOAD_HIT, METRIC_LOAD_MISS,
};

/// Awaitable handle for a load in progress. Every concurrent caller for the
/// same collection clones this handle instead of starting a second read.
type PendingLoad = Shared<BoxFuture<'static, Option<Arc<IconCollection>>>>;

/// Process-lifetime collection cache.
///
/// Constructed once at startup around a [`CollectionSource`] and shared by
/// reference wherever collections are consumed. Loaded collections are
/// immutable and never evicted. A load that fails resolves every waiter to
/// `None` and leaves nothing behind, so the next request retries the
/// source.
#[derive(Clone)]
pub struct CollectionCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    source: Arc<dyn CollectionSource>,
    loaded: DashMap<String, Arc<IconCollection>>,
    pending: DashMap<String, PendingLoad>,
}

impl CollectionCache {
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                source,
                loaded: DashMap::new(),
                pending: DashMap::new(),
            }),
        }
    }

    /// Resolve a collection, loading it at most once across all concurrent
    /// callers. `None` means the source does not know the collection or the
    /// load failed; the negative result is not cached.
    pub async fn get(&self, name: &str) -> Option<Arc<IconCollection>> {
        if let Some(hit) = self.inner.loaded.get(name) {
            counter!(METRIC_LOAD_HIT).increment(1);
            return Some(Arc::clone(hit.value()));
        }

        let pending = self.attach_or_start(name);
        pending.await
    }

    /// Names of collections currently resident in the cache, sorted.
    pub fn loaded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .loaded
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.inner.loaded.contains_key(name)
    }

    /// Join the in-flight load for `name`, or start one. The entry API makes
    /// the check-and-insert atomic, which is the whole concurrency story:
    /// whichever caller wins the vacant entry creates the load, everyone
    /// else clones its handle.
    fn attach_or_start(&self, name: &str) -> PendingLoad {
        use dashmap::mapref::entry::Entry;

        match self.inner.pending.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                counter!(METRIC_LOAD_COALESCED).increment(1);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                counter!(METRIC_LOAD_MISS).increment(1);
                let load = Self::load_future(Arc::clone(&self.inner), name.to_string());
                entry.insert(load.clone());
                load
            }
        }
    }

    fn load_future(inner: Arc<CacheInner>, name: String) -> PendingLoad {
        async move {
            // A load that settled between our cache check and the pending
            // insert already has the data; do not hit the source again.
            let already_loaded = inner
                .loaded
                .get(&name)
                .map(|entry| Arc::clone(entry.value()));
            if let Some(existing) = already_loaded {
                inner.pending.remove(&name);
                return Some(existing);
            }

            let result = match inner.source.load(&name).await {
                Ok(Some(document)) => {
                    let collection = Arc::new(IconCollection::new(name.clone(), document));
                    debug!(
                        collection = %name,
                        icon_count = collection.len(),
                        "collection loaded"
                    );
                    inner.loaded.insert(name.clone(), Arc::clone(&collection));
                    Some(collection)
                }
                Ok(None) => {
                    counter!(METRIC_LOAD_FAIL).increment(1);
                    warn!(collection = %name, "collection not found in source");
                    None
                }
                Err(error) => {
                    counter!(METRIC_LOAD_FAIL).increment(1);
                    warn!(
                        collection = %name,
                        error = %error,
                        "collection load failed"
                    );
                    None
                }
            };

            // Settle-time cleanup: once this runs, late callers either hit
            // `loaded` or start a fresh load. Failed loads are retried, not
            // remembered.
            inner.pending.remove(&name);

            result
        }
        .boxed()
        .shared()
    }
}
