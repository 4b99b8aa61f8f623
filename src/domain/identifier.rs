//! Icon identifiers of the form `collection:name`.
//!
//! An identifier addresses exactly one icon: the collection half names the
//! bundle it lives in, the name half the icon within it. The separator must
//! appear exactly once and both halves must be non-empty; anything else is
//! malformed and rejected up front rather than resolved to a fallback.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur while parsing an icon identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("icon identifier `{input}` does not match `collection:name`")]
    Malformed { input: String },
}

/// A validated `collection:name` icon address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconId {
    collection: String,
    name: String,
}

impl IconId {
    /// Parse an identifier, enforcing the single-separator shape.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let mut parts = input.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(collection), Some(name), None) if !collection.is_empty() && !name.is_empty() => {
                Ok(Self {
                    collection: collection.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(IdentifierError::Malformed {
                input: input.to_string(),
            }),
        }
    }

    /// Build an identifier from already-separated halves.
    pub fn new(
        collection: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let collection = collection.into();
        let name = name.into();
        if collection.is_empty()
            || name.is_empty()
            || collection.contains(':')
            || name.contains(':')
        {
            return Err(IdentifierError::Malformed {
                input: format!("{collection}:{name}"),
            });
        }
        Ok(Self { collection, name })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.name)
    }
}

impl FromStr for IconId {
    type Err = IdentifierError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}
