//! Collection data sources.
//!
//! A [`CollectionSource`] resolves a collection name to its parsed document.
//! The binding from name to data is fixed at construction time: either the
//! compile-time embedded bundle under `assets/collections/` or a directory
//! of `<name>.json` files supplied by the operator. `Ok(None)` means the
//! source does not know the collection; `Err` means it exists but could not
//! be read or parsed. The cache treats both as non-fatal.

use std::path::PathBuf;

use async_trait::async_trait;
use include_dir::{Dir, include_dir};
use thiserror::Error;
use tracing::debug;

use crate::domain::icon::CollectionDocument;

static BUILTIN_COLLECTIONS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/collections");

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read collection `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse collection `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("collection `{name}` declares mismatched prefix `{found}`")]
    Prefix { name: String, found: String },
}

/// Resolves a collection name to its document.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<CollectionDocument>, SourceError>;
}

/// Collections embedded into the binary at compile time.
#[derive(Debug, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CollectionSource for EmbeddedSource {
    async fn load(&self, name: &str) -> Result<Option<CollectionDocument>, SourceError> {
        if !is_plain_name(name) {
            return Ok(None);
        }

        let Some(file) = BUILTIN_COLLECTIONS.get_file(format!("{name}.json")) else {
            debug!(collection = %name, "collection not present in embedded bundle");
            return Ok(None);
        };

        parse_document(name, file.contents()).map(Some)
    }
}

/// Collections read from an operator-supplied directory of `<name>.json`
/// files.
#[derive(Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl CollectionSource for FsSource {
    async fn load(&self, name: &str) -> Result<Option<CollectionDocument>, SourceError> {
        if !is_plain_name(name) {
            return Ok(None);
        }

        let path = self.root.join(format!("{name}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = %name, path = %path.display(), "collection file not found");
                return Ok(None);
            }
            Err(err) => {
                return Err(SourceError::Io {
                    name: name.to_string(),
                    source: err,
                });
            }
        };

        parse_document(name, &bytes).map(Some)
    }
}

/// Reject names that could escape the source root or collide with path
/// syntax. Collection names are bare file stems.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains(':')
}

fn parse_document(name: &str, bytes: &[u8]) -> Result<CollectionDocument, SourceError> {
    let document: CollectionDocument =
        serde_json::from_slice(bytes).map_err(|err| SourceError::Parse {
            name: name.to_string(),
            source: err,
        })?;

    if document.prefix != name {
        return Err(SourceError::Prefix {
            name: name.to_string(),
            found: document.prefix,
        });
    }

    Ok(document)
}
