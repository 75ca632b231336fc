//! The translate-and-repack pipeline.
//!
//! Values are sent to the provider in document order and the answers are reattached to
//! their keys by position. Realignment therefore depends on the provider returning exactly
//! one segment per value; anything else is reported as [`Error::RealignmentMismatch`].

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    codec::{read_resource, write_translated},
    error::Error,
    language::AUTO_DETECT,
    options::{BatchStrategy, TranslateOptions},
    provider::{TranslationRequest, Translator},
    types::{Entry, LOCALE_KEY, Resource, Value},
};

/// Separator between values in a joined payload.
pub const DELIMITER: char = '\n';

/// Translates every translatable value of `resource` and returns a new document with the
/// same keys in the same order.
///
/// Metadata entries are copied unchanged, except `@@locale` which is set to the target
/// language. A document with nothing to translate never reaches the provider.
pub fn translate_resource<T: Translator + ?Sized>(
    resource: &Resource,
    translator: &T,
    options: &TranslateOptions,
) -> Result<Resource, Error> {
    let pairs = resource.translatable().collect::<Vec<_>>();

    let translated = if pairs.is_empty() {
        debug!("nothing to translate, provider not called");
        Vec::new()
    } else {
        debug!(
            values = pairs.len(),
            strategy = %options.strategy,
            provider = translator.name(),
            "translating values"
        );
        match options.strategy {
            BatchStrategy::Joined => {
                translate_joined(&pairs, translator, &options.target_language)?
            }
            BatchStrategy::PerEntry => {
                translate_each(&pairs, translator, &options.target_language)?
            }
        }
    };

    realign(resource, translated, &options.target_language)
}

/// Reads `source`, translates it and writes `translated_<stem>.arb` into `output_dir`.
///
/// Nothing is written unless translation succeeds.
pub fn localize_file<T, P, Q>(
    source: P,
    output_dir: Q,
    translator: &T,
    options: &TranslateOptions,
) -> Result<PathBuf, Error>
where
    T: Translator + ?Sized,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let resource = read_resource(source)?;
    let translated = translate_resource(&resource, translator, options)?;
    let output = write_translated(&translated, source, output_dir)?;

    info!(
        source = %source.display(),
        output = %output.display(),
        target_language = %options.target_language,
        "localized resource"
    );
    Ok(output)
}

/// Joins values with [`DELIMITER`], refusing values that contain it.
pub fn join_values(pairs: &[(&str, &str)]) -> Result<String, Error> {
    if let Some((key, _)) = pairs.iter().find(|(_, value)| value.contains(DELIMITER)) {
        return Err(Error::EmbeddedDelimiter {
            key: key.to_string(),
        });
    }
    Ok(pairs
        .iter()
        .map(|(_, value)| *value)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string()))
}

/// Splits a provider reply back into `expected` segments.
///
/// One trailing line break added by the provider is tolerated. Only non-empty values are
/// sent, so an empty segment means a value was dropped and counts as a mismatch.
pub fn split_segments(reply: &str, expected: usize) -> Result<Vec<String>, Error> {
    let reply = reply.strip_suffix(DELIMITER).unwrap_or(reply);
    let segments = reply.split(DELIMITER).map(str::to_string).collect::<Vec<_>>();
    let actual = if segments.len() == expected {
        segments.iter().filter(|s| !s.is_empty()).count()
    } else {
        segments.len()
    };
    if actual != expected {
        return Err(Error::RealignmentMismatch { expected, actual });
    }
    Ok(segments)
}

fn translate_joined<T: Translator + ?Sized>(
    pairs: &[(&str, &str)],
    translator: &T,
    target_language: &str,
) -> Result<Vec<String>, Error> {
    let payload = join_values(pairs)?;
    let reply = translator.translate(&TranslationRequest {
        text: &payload,
        source_language: AUTO_DETECT,
        target_language,
    })?;
    split_segments(&reply, pairs.len())
}

fn translate_each<T: Translator + ?Sized>(
    pairs: &[(&str, &str)],
    translator: &T,
    target_language: &str,
) -> Result<Vec<String>, Error> {
    pairs
        .iter()
        .map(|(_, value)| {
            translator.translate(&TranslationRequest {
                text: value,
                source_language: AUTO_DETECT,
                target_language,
            })
        })
        .collect()
}

fn realign(
    resource: &Resource,
    translated: Vec<String>,
    target_language: &str,
) -> Result<Resource, Error> {
    let expected = resource.translatable().count();
    if translated.len() != expected {
        return Err(Error::RealignmentMismatch {
            expected,
            actual: translated.len(),
        });
    }

    let mut translated = translated.into_iter();
    let entries = resource
        .entries
        .iter()
        .map(|entry| {
            let value = if entry.key == LOCALE_KEY {
                Value::Metadata(serde_json::Value::String(target_language.to_string()))
            } else if entry.is_translatable() {
                // Length was checked above.
                Value::Text(translated.next().unwrap_or_default())
            } else {
                entry.value.clone()
            };
            Entry {
                key: entry.key.clone(),
                value,
            }
        })
        .collect();

    Ok(Resource::new(entries))
}
