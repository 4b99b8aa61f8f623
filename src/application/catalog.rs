//! Read-only introspection over loaded collections.
//!
//! Backs icon-picker style consumers: list what is resident, search icon
//! names by substring. Unscoped search only consults collections already in
//! the cache; scoping to one collection loads it on demand.

use crate::cache::CollectionCache;
use crate::domain::identifier::IconId;

#[derive(Clone)]
pub struct IconCatalog {
    cache: CollectionCache,
}

impl IconCatalog {
    pub fn new(cache: CollectionCache) -> Self {
        Self { cache }
    }

    /// Names of collections currently resident in the cache, sorted.
    pub fn list_collections(&self) -> Vec<String> {
        self.cache.loaded_names()
    }

    /// Case-insensitive substring search over icon names.
    ///
    /// Results are sorted by identifier and truncated to `limit`.
    pub async fn search(
        &self,
        query: &str,
        collection: Option<&str>,
        limit: usize,
    ) -> Vec<IconId> {
        let needle = query.to_lowercase();

        let collections = match collection {
            Some(name) => match self.cache.get(name).await {
                Some(collection) => vec![collection],
                None => Vec::new(),
            },
            None => {
                let mut resident = Vec::new();
                for name in self.cache.loaded_names() {
                    if let Some(collection) = self.cache.get(&name).await {
                        resident.push(collection);
                    }
                }
                resident
            }
        };

        let mut hits = Vec::new();
        for collection in &collections {
            for icon_name in collection.icon_names() {
                if !icon_name.to_lowercase().contains(&needle) {
                    continue;
                }
                if let Ok(id) = IconId::new(collection.name(), icon_name) {
                    hits.push(id);
                }
            }
        }

        hits.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        hits.truncate(limit);
        hits
    }
}
