//! Icon resolution services: single renders and batch resolution.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use futures::future::join_all;
use metrics::{counter, histogram};
use tracing::warn;

use crate::cache::CollectionCache;
use crate::domain::identifier::IconId;
use crate::infra::telemetry::{METRIC_BATCH_RENDER_MS, METRIC_FALLBACK, METRIC_MALFORMED};

use super::render::{RenderOptions, render_svg};

/// Result of a batch render.
///
/// Every syntactically valid input identifier appears in `rendered`, either
/// with its own markup or with the shared fallback rendering; the only
/// exceptions are identifiers left unresolved while the fallback itself
/// could not be resolved. Malformed inputs are excluded and listed in
/// `malformed`.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub rendered: HashMap<String, String>,
    pub malformed: Vec<String>,
}

/// Renders icons out of the shared collection cache.
#[derive(Clone)]
pub struct IconService {
    cache: CollectionCache,
    fallback: IconId,
}

impl IconService {
    pub fn new(cache: CollectionCache, fallback: IconId) -> Self {
        Self { cache, fallback }
    }

    /// Render a single icon. `None` means the collection or the icon name
    /// could not be resolved; callers decide how to surface that.
    pub async fn render_icon(&self, id: &IconId, options: &RenderOptions) -> Option<String> {
        let collection = self.cache.get(id.collection()).await?;
        let icon = collection.icon(id.name())?;
        Some(render_svg(&icon, options))
    }

    /// Resolve a list of identifiers to markup in the minimum number of
    /// collection loads. Never fails: unresolvable identifiers degrade to
    /// the shared fallback rendering and malformed ones are dropped with a
    /// warning.
    pub async fn render_batch<S: AsRef<str>>(
        &self,
        identifiers: &[S],
        options: &RenderOptions,
    ) -> BatchOutcome {
        let batch_started_at = Instant::now();
        let mut outcome = BatchOutcome::default();

        let mut valid = Vec::new();
        for raw in identifiers {
            let raw = raw.as_ref();
            match IconId::parse(raw) {
                Ok(id) => valid.push(id),
                Err(_) => outcome.malformed.push(raw.to_string()),
            }
        }

        if !outcome.malformed.is_empty() {
            counter!(METRIC_MALFORMED).increment(outcome.malformed.len() as u64);
            warn!(
                identifiers = %outcome.malformed.join(", "),
                "dropping malformed icon identifiers from batch"
            );
        }

        // Load every distinct referenced collection concurrently; the cache
        // coalesces overlap with other in-flight batches.
        let distinct: HashSet<&str> = valid.iter().map(IconId::collection).collect();
        let loads = distinct.into_iter().map(|name| async move {
            let collection = self.cache.get(name).await;
            (name.to_string(), collection)
        });
        let collections: HashMap<_, _> = join_all(loads).await.into_iter().collect();

        let mut unresolved = Vec::new();
        for id in &valid {
            let icon = collections
                .get(id.collection())
                .and_then(|loaded| loaded.as_ref())
                .and_then(|collection| collection.icon(id.name()));
            match icon {
                Some(icon) => {
                    outcome
                        .rendered
                        .insert(id.to_string(), render_svg(&icon, options));
                }
                None => unresolved.push(id),
            }
        }

        if !unresolved.is_empty() {
            counter!(METRIC_FALLBACK).increment(unresolved.len() as u64);
            // One fallback rendering shared by every unresolved identifier.
            match self.render_icon(&self.fallback, options).await {
                Some(fallback_svg) => {
                    for id in unresolved {
                        outcome
                            .rendered
                            .insert(id.to_string(), fallback_svg.clone());
                    }
                }
                None => {
                    warn!(
                        fallback = %self.fallback,
                        dropped = unresolved.len(),
                        "fallback icon unresolvable; omitting unresolved identifiers"
                    );
                }
            }
        }

        histogram!(METRIC_BATCH_RENDER_MS)
            .record(batch_started_at.elapsed().as_secs_f64() * 1000.0);

        outcome
    }
}
