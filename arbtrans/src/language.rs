//! Language codes accepted as translation targets.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Target used when nothing else is configured.
pub const DEFAULT_TARGET_LANGUAGE: &str = "ru";

/// Source language sent to the provider; it detects the language itself.
pub const AUTO_DETECT: &str = "auto";

/// Languages commonly offered by translation providers, as `(code, English name)`.
///
/// Providers differ; a code missing here is still sent as long as it is well formed.
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese"),
];

/// Parses `code` as a BCP 47 identifier usable as a translation target.
pub fn parse_target_language(code: &str) -> Result<LanguageIdentifier, Error> {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(AUTO_DETECT) {
        return Err(Error::UnsupportedLanguage(code.to_string()));
    }
    trimmed
        .parse::<LanguageIdentifier>()
        .map_err(|_| Error::UnsupportedLanguage(code.to_string()))
}

/// Whether the primary language subtag of `code` is in [`KNOWN_LANGUAGES`].
pub fn is_known_language(code: &str) -> bool {
    match parse_target_language(code) {
        Ok(lang_id) => KNOWN_LANGUAGES
            .iter()
            .any(|(known, _)| lang_id.language.as_str() == *known),
        Err(_) => false,
    }
}
