//! Options controlling one translation run.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, language::DEFAULT_TARGET_LANGUAGE};

/// How values are sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchStrategy {
    /// All values joined by line breaks in a single provider call.
    #[default]
    Joined,
    /// One provider call per value.
    PerEntry,
}

impl Display for BatchStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStrategy::Joined => write!(f, "joined"),
            BatchStrategy::PerEntry => write!(f, "per-entry"),
        }
    }
}

impl FromStr for BatchStrategy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "joined" | "batch" => Ok(BatchStrategy::Joined),
            "per-entry" | "each" => Ok(BatchStrategy::PerEntry),
            other => Err(Error::Config(format!(
                "unknown strategy `{}` (expected `joined` or `per-entry`)",
                other
            ))),
        }
    }
}

/// Translation behavior for [`crate::pipeline`] entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Language code the values are translated into.
    pub target_language: String,
    pub strategy: BatchStrategy,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            strategy: BatchStrategy::default(),
        }
    }
}

impl TranslateOptions {
    /// Creates default options (Russian target, joined batching).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target language.
    pub fn with_target_language(mut self, target_language: impl Into<String>) -> Self {
        self.target_language = target_language.into();
        self
    }

    /// Sets the batching strategy.
    pub fn with_strategy(mut self, strategy: BatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
