//! Icon-collection documents and resolved icon definitions.

use std::collections::HashMap;

use serde::Deserialize;

/// Dimension applied when neither the icon nor the collection declares one.
const DEFAULT_DIMENSION: u32 = 16;

fn default_dimension() -> u32 {
    DEFAULT_DIMENSION
}

/// On-disk shape of a collection document (Iconify icon-set JSON).
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDocument {
    pub prefix: String,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    pub icons: HashMap<String, IconRecord>,
}

/// One icon's raw definition. Layout fields fall back to the collection
/// defaults when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct IconRecord {
    pub body: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub left: Option<i32>,
    #[serde(default)]
    pub top: Option<i32>,
}

/// An immutable, loaded icon collection.
///
/// Built once from a parsed [`CollectionDocument`] and never mutated; the
/// cache shares it behind an `Arc` for the rest of the process lifetime.
#[derive(Debug)]
pub struct IconCollection {
    name: String,
    width: u32,
    height: u32,
    icons: HashMap<String, IconRecord>,
}

impl IconCollection {
    pub fn new(name: impl Into<String>, document: CollectionDocument) -> Self {
        Self {
            name: name.into(),
            width: document.width,
            height: document.height,
            icons: document.icons,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up one icon, resolving its layout against the collection defaults.
    pub fn icon(&self, name: &str) -> Option<ResolvedIcon<'_>> {
        self.icons.get(name).map(|record| ResolvedIcon {
            body: &record.body,
            width: record.width.unwrap_or(self.width),
            height: record.height.unwrap_or(self.height),
            left: record.left.unwrap_or(0),
            top: record.top.unwrap_or(0),
        })
    }

    pub fn icon_names(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// An icon definition with layout metadata fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIcon<'a> {
    pub body: &'a str,
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

impl ResolvedIcon<'_> {
    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.left, self.top, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> CollectionDocument {
        serde_json::from_str(
            r#"{
                "prefix": "sample",
                "width": 24,
                "height": 24,
                "icons": {
                    "dot": { "body": "<circle cx=\"12\" cy=\"12\" r=\"2\"/>" },
                    "wide": { "body": "<path d=\"M0 0h32v16H0z\"/>", "width": 32, "height": 16 },
                    "shifted": { "body": "<path d=\"M0 0h24v24H0z\"/>", "left": -2, "top": -2 }
                }
            }"#,
        )
        .expect("valid document")
    }

    #[test]
    fn icon_resolves_collection_defaults() {
        let collection = IconCollection::new("sample", sample_document());
        let icon = collection.icon("dot").expect("icon");
        assert_eq!(icon.width, 24);
        assert_eq!(icon.height, 24);
        assert_eq!(icon.view_box(), "0 0 24 24");
    }

    #[test]
    fn icon_overrides_take_precedence() {
        let collection = IconCollection::new("sample", sample_document());
        let icon = collection.icon("wide").expect("icon");
        assert_eq!(icon.width, 32);
        assert_eq!(icon.height, 16);
        assert_eq!(icon.view_box(), "0 0 32 16");

        let shifted = collection.icon("shifted").expect("icon");
        assert_eq!(shifted.view_box(), "-2 -2 24 24");
    }

    #[test]
    fn unknown_icon_is_none() {
        let collection = IconCollection::new("sample", sample_document());
        assert!(collection.icon("missing").is_none());
    }

    #[test]
    fn dimensions_default_to_sixteen_when_absent() {
        let document: CollectionDocument = serde_json::from_str(
            r#"{ "prefix": "bare", "icons": { "x": { "body": "<path d=\"M0 0\"/>" } } }"#,
        )
        .expect("valid document");
        let collection = IconCollection::new("bare", document);
        let icon = collection.icon("x").expect("icon");
        assert_eq!(icon.width, 16);
        assert_eq!(icon.height, 16);
    }
}
