//! Translation providers.
//!
//! The pipeline talks to providers only through the [`Translator`] trait. Two providers
//! ship with the crate:
//!
//! - [`HttpTranslator`] posts to a LibreTranslate-compatible `/translate` endpoint.
//! - [`IdentityTranslator`] returns its input unchanged, for dry runs and tests.
//!
//! Wrap any provider in [`crate::retry::Retrying`] to apply a retry policy.

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::ProviderSettings, error::Error};

/// One call to a translation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    /// Source language code, usually [`crate::language::AUTO_DETECT`].
    pub source_language: &'a str,
    pub target_language: &'a str,
}

/// A synchronous translation provider.
pub trait Translator {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Translate `request.text`. Blocks until the provider answers.
    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        (**self).translate(request)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        (**self).translate(request)
    }
}

/// Echoes every request back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn name(&self) -> &str {
        "identity"
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        Ok(request.text.to_string())
    }
}

/// Client for a LibreTranslate-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateReply {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

impl HttpTranslator {
    pub fn new(settings: &ProviderSettings) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::provider_error(format!("cannot build HTTP client: {}", e), false))?;

        Ok(HttpTranslator {
            client,
            url: translate_url(&settings.endpoint),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Translator for HttpTranslator {
    fn name(&self) -> &str {
        "libretranslate"
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        let body = TranslateBody {
            q: request.text,
            source: request.source_language,
            target: request.target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!(
            url = %self.url,
            chars = request.text.chars().count(),
            target_language = request.target_language,
            "sending translation request"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(transport_error)?;
        let status = response.status();
        let text = response.text().map_err(transport_error)?;

        parse_reply(status, &text)
    }
}

fn translate_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with("/translate") {
        base.to_string()
    } else {
        format!("{}/translate", base)
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::provider_error(format!("request failed: {}", e), !e.is_builder())
}

fn should_retry_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Interprets a provider reply body.
///
/// Error statuses become provider errors carrying the reply's `error` message when it has
/// one; 429 and 5xx are marked retryable.
pub(crate) fn parse_reply(status: StatusCode, body: &str) -> Result<String, Error> {
    let reply = serde_json::from_str::<TranslateReply>(body).ok();

    if !status.is_success() {
        let detail = reply
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(Error::provider_error(
            format!("HTTP {}: {}", status.as_u16(), detail.trim()),
            should_retry_status(status),
        ));
    }

    match reply {
        Some(TranslateReply {
            translated_text: Some(text),
            ..
        }) => Ok(text),
        Some(TranslateReply {
            error: Some(message),
            ..
        }) => Err(Error::provider_error(message, false)),
        _ => Err(Error::provider_error(
            "reply has no `translatedText` field",
            false,
        )),
    }
}
