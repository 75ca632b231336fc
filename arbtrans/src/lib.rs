#![forbid(unsafe_code)]
//! Translate ARB localization bundles through an external translation provider.
//!
//! A bundle is read into an ordered [`Resource`], its values are sent to a [`Translator`]
//! in one batched call, the answers are realigned with their keys, and the result is
//! written as `translated_<stem>.arb`. Jobs over several files package their outputs
//! into a zip archive.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use arbtrans::{HttpTranslator, Retrying, TranslateOptions, config::Config, localize_file};
//!
//! let config = Config::load(None)?;
//! let translator = Retrying::new(HttpTranslator::new(&config.provider)?, config.retry_policy());
//! let options = TranslateOptions::new().with_target_language("de");
//! let output = localize_file("l10n/intl_en.arb", "downloads", &translator, &options)?;
//! println!("{}", output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod codec;
pub mod config;
pub mod error;
pub mod formats;
pub mod job;
pub mod language;
pub mod options;
pub mod pipeline;
pub mod provider;
pub mod retry;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{output_file_name, read_resource, write_translated},
    error::Error,
    job::{JobContext, JobId, JobLimits, JobOutput},
    options::{BatchStrategy, TranslateOptions},
    pipeline::{localize_file, translate_resource},
    provider::{HttpTranslator, IdentityTranslator, TranslationRequest, Translator},
    retry::{RetryPolicy, Retrying},
    types::{Entry, Resource, Value},
};
