//! CLI library for testing purposes

pub mod logging;
pub mod translate;
pub mod validation;
pub mod view;

pub use translate::{RETRY_PROMPT, TranslateArgs, run_translate_command};
