//! Core types for arbtrans.
//! The ARB parser decodes into these; the serializer writes these back out.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Key of the ARB header entry naming the locale of the bundle.
pub const LOCALE_KEY: &str = "@@locale";

/// Prefix marking ARB metadata keys (`@@locale`, `@greeting`, ...).
pub const METADATA_PREFIX: char = '@';

/// A loaded resource document: every entry of one `.arb` file, in file order.
///
/// Documents are never translated in place; the pipeline builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Resource {
    /// Ordered list of all entries in this resource.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Resource {
    pub fn new(entries: Vec<Entry>) -> Self {
        Resource { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// All keys, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// `(key, text)` for every entry the provider should see, in document order.
    pub fn translatable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|e| e.is_translatable())
            .map(|e| (e.key.as_str(), e.value.as_text().unwrap_or_default()))
    }

    /// The `@@locale` header, if present and a string.
    pub fn locale(&self) -> Option<&str> {
        self.find_entry(LOCALE_KEY)
            .and_then(|e| match &e.value {
                Value::Metadata(serde_json::Value::String(s)) => Some(s.as_str()),
                _ => None,
            })
    }

    /// The text value stored under `key`, if it is a text entry.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.find_entry(key).and_then(|e| e.value.as_text())
    }
}

/// One key/value unit of an ARB file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    /// Message identifier, unique within the document.
    pub key: String,

    pub value: Value,
}

impl Entry {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Entry {
            key: key.into(),
            value: Value::Text(value.into()),
        }
    }

    pub fn metadata(key: impl Into<String>, value: serde_json::Value) -> Self {
        Entry {
            key: key.into(),
            value: Value::Metadata(value),
        }
    }

    pub fn is_metadata_key(key: &str) -> bool {
        key.starts_with(METADATA_PREFIX)
    }

    /// Empty strings are carried over as-is; there is nothing to translate.
    pub fn is_translatable(&self) -> bool {
        matches!(&self.value, Value::Text(text) if !text.is_empty())
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Value side of an entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Value {
    /// Human-readable source text.
    Text(String),

    /// Anything stored under an `@`-prefixed key. Kept verbatim and never translated.
    Metadata(serde_json::Value),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Metadata(_) => None,
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Text(text) => serde_json::Value::String(text.clone()),
            Value::Metadata(value) => value.clone(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{}", text),
            Value::Metadata(value) => write!(f, "{}", value),
        }
    }
}
