//! Support for the ARB (Application Resource Bundle) format.
//!
//! An ARB file is a UTF-8 JSON object mapping message keys to strings. Keys starting with
//! `@` carry metadata (`@@locale`, per-message descriptions and placeholders) and may hold
//! any JSON value. An array of `[key, value]` pairs is accepted as an alternative shape
//! on input; output is always an object.

use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::{
    error::Error,
    traits::Parser,
    types::{Entry, Resource},
};

/// Represents one ARB file, entries kept in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Format {
    pub entries: Vec<Entry>,
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| Error::malformed(format!("content is not valid UTF-8 text: {}", e)))?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let RawPairs(pairs) = serde_json::from_str(content)
            .map_err(|e| Error::malformed(format!("invalid JSON: {}", e)))?;

        let mut seen = HashSet::with_capacity(pairs.len());
        let mut entries = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            if !seen.insert(key.clone()) {
                return Err(Error::malformed(format!("duplicate key `{}`", key)));
            }
            if Entry::is_metadata_key(&key) {
                entries.push(Entry::metadata(key, value));
                continue;
            }
            match value {
                serde_json::Value::String(text) => entries.push(Entry::text(key, text)),
                other => {
                    return Err(Error::malformed(format!(
                        "value of `{}` must be a string, found {}",
                        key,
                        json_kind(&other)
                    )));
                }
            }
        }

        Ok(Format { entries })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let object = self
            .entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.to_json()))
            .collect::<serde_json::Map<_, _>>();

        // serde_json never escapes non-ASCII, so translated text is written verbatim.
        serde_json::to_writer_pretty(&mut writer, &object)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl From<Format> for Resource {
    fn from(value: Format) -> Self {
        Resource::new(value.entries)
    }
}

impl From<Resource> for Format {
    fn from(value: Resource) -> Self {
        Format {
            entries: value.entries,
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Top-level pairs in source order, duplicates included so they can be reported.
struct RawPairs(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for RawPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawPairsVisitor)
    }
}

struct RawPairsVisitor;

impl<'de> Visitor<'de> for RawPairsVisitor {
    type Value = RawPairs;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object or an array of [key, value] pairs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(pair) = map.next_entry::<String, serde_json::Value>()? {
            pairs.push(pair);
        }
        Ok(RawPairs(pairs))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(pair) = seq.next_element::<(String, serde_json::Value)>()? {
            pairs.push(pair);
        }
        Ok(RawPairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;
    use serde_json::json;

    #[test]
    fn test_parse_preserves_key_order() {
        let arb = r#"{"zeta": "Z", "alpha": "A", "mid": "M"}"#;
        let format = Format::from_bytes(arb.as_bytes()).unwrap();
        let keys: Vec<_> = format.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_metadata_entries() {
        let arb = r#"{
            "@@locale": "en",
            "greeting": "Hello {name}",
            "@greeting": {
                "description": "Greets the user",
                "placeholders": {"name": {"type": "String"}}
            }
        }"#;
        let format = Format::from_bytes(arb.as_bytes()).unwrap();
        assert_eq!(format.entries.len(), 3);
        assert_eq!(format.entries[0].value, Value::Metadata(json!("en")));
        assert_eq!(
            format.entries[1].value,
            Value::Text("Hello {name}".to_string())
        );
        assert!(matches!(
            format.entries[2].value,
            Value::Metadata(serde_json::Value::Object(_))
        ));
    }

    #[test]
    fn test_parse_array_of_pairs() {
        let arb = r#"[["greeting", "Hello"], ["farewell", "Goodbye"]]"#;
        let format = Format::from_bytes(arb.as_bytes()).unwrap();
        assert_eq!(
            format.entries,
            vec![
                Entry::text("greeting", "Hello"),
                Entry::text("farewell", "Goodbye")
            ]
        );
    }

    #[test]
    fn test_parse_empty_object() {
        let format = Format::from_bytes("{}".as_bytes()).unwrap();
        assert!(format.entries.is_empty());
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let format = Format::from_bytes("\u{feff}{\"title\": \"Inbox\"}".as_bytes()).unwrap();
        assert_eq!(format.entries, vec![Entry::text("title", "Inbox")]);
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = Format::from_bytes("{ \"title\": ".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedResource(_)));
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        let err = Format::from_bytes("42".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedResource(_)));
    }

    #[test]
    fn test_parse_rejects_non_string_value() {
        let err = Format::from_bytes(r#"{"count": 3}"#.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`count`"), "{}", message);
        assert!(message.contains("a number"), "{}", message);
    }

    #[test]
    fn test_parse_rejects_duplicate_keys() {
        let err = Format::from_bytes(br#"{"title": "A", "title": "B"}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate key `title`"));
    }

    #[test]
    fn test_write_keeps_non_ascii_verbatim() {
        let format = Format {
            entries: vec![
                Entry::text("greeting", "Привет"),
                Entry::text("farewell", "До свидания"),
            ],
        };
        let mut out = Vec::new();
        format.to_writer(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("Привет"));
        assert!(!written.contains("\\u"));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_round_trip_serialization() {
        let arb = r#"{
            "@@locale": "ja",
            "title": "受信トレイ",
            "@title": {"description": "Inbox header"},
            "empty": ""
        }"#;
        let format = Format::from_bytes(arb.as_bytes()).unwrap();
        let mut out = Vec::new();
        format.to_writer(&mut out).unwrap();
        let reparsed = Format::from_bytes(&out).unwrap();
        assert_eq!(format, reparsed);
    }
}
