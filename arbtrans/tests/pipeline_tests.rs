use arbtrans::traits::Parser;
use arbtrans::types::LOCALE_KEY;
use arbtrans::{
    Entry, Error, IdentityTranslator, Resource, TranslateOptions, TranslationRequest, Translator,
    Value, formats::ArbFormat, localize_file, read_resource, translate_resource, write_translated,
};
use proptest::prelude::*;
use std::cell::Cell;
use std::fs;
use tempfile::TempDir;

struct Failing {
    calls: Cell<usize>,
}

impl Translator for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn translate(&self, _request: &TranslationRequest<'_>) -> Result<String, Error> {
        self.calls.set(self.calls.get() + 1);
        Err(Error::provider_error("HTTP 502: bad gateway", true))
    }
}

/// Reverses every line, so realignment mistakes would show up as swapped values.
struct Reversing;

impl Translator for Reversing {
    fn name(&self) -> &str {
        "reversing"
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        Ok(request
            .text
            .split('\n')
            .map(|line| line.chars().rev().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[test]
fn test_identity_scenario_writes_translated_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("intl_en.arb");
    fs::write(&source, r#"{"greeting": "Hello", "farewell": "Goodbye"}"#).unwrap();
    let out_dir = temp_dir.path().join("downloads");

    let output =
        localize_file(&source, &out_dir, &IdentityTranslator, &TranslateOptions::new()).unwrap();

    assert_eq!(output, out_dir.join("translated_intl_en.arb"));
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        serde_json::json!({"greeting": "Hello", "farewell": "Goodbye"})
    );
    // Key order follows the source.
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.find("greeting").unwrap() < text.find("farewell").unwrap());
}

#[test]
fn test_empty_document_produces_empty_object_without_provider_call() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("empty.arb");
    fs::write(&source, "{}").unwrap();

    let translator = Failing {
        calls: Cell::new(0),
    };
    let output = localize_file(
        &source,
        temp_dir.path(),
        &translator,
        &TranslateOptions::new(),
    )
    .unwrap();

    assert_eq!(translator.calls.get(), 0);
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({}));
}

#[test]
fn test_provider_failure_creates_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("intl_en.arb");
    fs::write(&source, r#"{"greeting": "Hello"}"#).unwrap();
    let out_dir = temp_dir.path().join("downloads");

    let translator = Failing {
        calls: Cell::new(0),
    };
    let err = localize_file(&source, &out_dir, &translator, &TranslateOptions::new()).unwrap_err();

    assert!(matches!(err, Error::TranslationProvider { .. }));
    assert!(!out_dir.join("translated_intl_en.arb").exists());
}

#[test]
fn test_realignment_keeps_values_on_their_keys() {
    let resource = Resource::new(vec![
        Entry::text("first", "abc"),
        Entry::text("second", "xyz"),
        Entry::text("third", "Привет"),
    ]);
    let out = translate_resource(&resource, &Reversing, &TranslateOptions::new()).unwrap();
    assert_eq!(out.text("first"), Some("cba"));
    assert_eq!(out.text("second"), Some("zyx"));
    assert_eq!(out.text("third"), Some("тевирП"));
}

#[test]
fn test_non_ascii_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("intl_en.arb");
    fs::write(&source, "{}").unwrap();

    let translated = Resource::new(vec![
        Entry::text("greeting", "Привет, мир"),
        Entry::text("emoji", "🎉 Готово"),
        Entry::text("cjk", "你好"),
    ]);
    let path = write_translated(&translated, &source, temp_dir.path()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("Привет, мир"));
    assert!(!raw.contains("\\u"));
    assert_eq!(read_resource(&path).unwrap(), translated);
}

#[test]
fn test_array_of_pairs_input_is_written_as_object() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("pairs.arb");
    fs::write(&source, r#"[["title", "Inbox"], ["cta", "Open"]]"#).unwrap();

    let output = localize_file(
        &source,
        temp_dir.path(),
        &IdentityTranslator,
        &TranslateOptions::new(),
    )
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"title": "Inbox", "cta": "Open"}));
}

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-zA-Z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-zА-Яа-я0-9 _\\-\\.,!\\?]{0,30}")
        .expect("valid value regex")
}

fn dataset_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..12)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_keys_preserved_through_translate_serialize_parse(pairs in dataset_strategy()) {
        let resource = Resource::new(
            pairs.iter().map(|(k, v)| Entry::text(k.clone(), v.clone())).collect(),
        );

        let translated =
            translate_resource(&resource, &Reversing, &TranslateOptions::new()).unwrap();
        let mut bytes = Vec::new();
        ArbFormat::from(translated).to_writer(&mut bytes).unwrap();
        let reparsed = Resource::from(ArbFormat::from_bytes(&bytes).unwrap());

        prop_assert_eq!(
            reparsed.keys().collect::<Vec<_>>(),
            resource.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn prop_identity_translation_preserves_values(pairs in dataset_strategy()) {
        let resource = Resource::new(
            pairs.iter().map(|(k, v)| Entry::text(k.clone(), v.clone())).collect(),
        );
        let translated =
            translate_resource(&resource, &IdentityTranslator, &TranslateOptions::new()).unwrap();
        prop_assert_eq!(translated, resource);
    }

    #[test]
    fn prop_identity_translation_only_rewrites_locale(
        pairs in dataset_strategy(),
        locale in "[a-z]{2}",
        target in "[a-z]{2}",
    ) {
        let mut entries = vec![Entry::metadata(LOCALE_KEY, serde_json::json!(locale))];
        for (k, v) in &pairs {
            entries.push(Entry::text(k.clone(), v.clone()));
            entries.push(Entry::metadata(
                format!("@{}", k),
                serde_json::json!({"description": format!("About {}", k)}),
            ));
        }
        let resource = Resource::new(entries);

        let options = TranslateOptions::new().with_target_language(target.clone());
        let translated = translate_resource(&resource, &IdentityTranslator, &options).unwrap();

        prop_assert_eq!(translated.len(), resource.len());
        for (out, src) in translated.entries.iter().zip(&resource.entries) {
            prop_assert_eq!(&out.key, &src.key);
            if out.key == LOCALE_KEY {
                prop_assert_eq!(
                    &out.value,
                    &Value::Metadata(serde_json::Value::String(target.clone()))
                );
            } else {
                prop_assert_eq!(&out.value, &src.value);
            }
        }
    }
}
