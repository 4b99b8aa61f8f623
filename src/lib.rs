//! Icon-collection cache and SVG renderer.
//!
//! A collection is a named bundle of icon definitions loaded once per
//! process from a [`infra::source::CollectionSource`] and cached for the
//! process lifetime. Icons are addressed as `collection:name` identifiers
//! and rendered into self-contained `<svg>` markup, individually or in
//! batches that share collection loads and a common fallback rendering.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
