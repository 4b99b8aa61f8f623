//! Collection cache.
//!
//! Loaded collections live here for the rest of the process: no TTL, no
//! size bound, no eviction. The data source is build-time static, so a
//! successful load never needs revisiting, while a failed load is retried
//! on the next request. Concurrent first-loads of the same collection are
//! coalesced into a single underlying read.

mod store;
mod warmer;

pub use store::CollectionCache;
pub use warmer::CacheWarmer;
