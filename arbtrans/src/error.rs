//! All error types for the arbtrans crate.
//!
//! These are returned from all fallible operations (parsing, translation, realignment,
//! packaging, configuration).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not a resource file: {}", .0.display())]
    NotAResourceFile(PathBuf),

    #[error("malformed resource: {0}")]
    MalformedResource(String),

    #[error("translation provider error: {message}")]
    TranslationProvider { message: String, retryable: bool },

    #[error("realignment mismatch: expected {expected} segments, provider returned {actual}")]
    RealignmentMismatch { expected: usize, actual: usize },

    #[error("value of `{key}` contains a line break and cannot be batched")]
    EmbeddedDelimiter { key: String },

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("no input files given")]
    NoInput,

    #[error("too many files: {actual} given, at most {limit} per job")]
    TooManyFiles { limit: usize, actual: usize },

    #[error("file is too big: {} is {size} bytes, limit is {limit} bytes", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{} and {} would both be written as {name}", .first.display(), .second.display())]
    DuplicateOutput {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a provider error. `retryable` marks failures worth another attempt
    /// (transport failures, throttling, server errors).
    pub fn provider_error(message: impl Into<String>, retryable: bool) -> Self {
        Error::TranslationProvider {
            message: message.into(),
            retryable,
        }
    }

    /// Creates a malformed-resource error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResource(reason.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::TranslationProvider {
                retryable: true,
                ..
            }
        )
    }
}
