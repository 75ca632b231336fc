//! `arbtrans.toml` configuration.
//!
//! ```toml
//! target_language = "ru"
//! output_dir = "downloads"
//! strategy = "joined"
//!
//! [provider]
//! endpoint = "http://localhost:5000"
//! api_key = "..."
//! timeout_secs = 60
//!
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 800
//! max_delay_ms = 10000
//!
//! [limits]
//! max_files = 5
//! max_file_size = 1048576
//! ```
//!
//! Every field is optional. `ARBTRANS_API_KEY` overrides `provider.api_key`.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    job::JobLimits,
    language::{DEFAULT_TARGET_LANGUAGE, parse_target_language},
    options::{BatchStrategy, TranslateOptions},
    retry::RetryPolicy,
};

/// File looked up in the working directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "arbtrans.toml";

/// Environment variable overriding the provider API key.
pub const API_KEY_ENV: &str = "ARBTRANS_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target_language: String,
    /// Root under which every job gets its own directory.
    pub output_dir: PathBuf,
    pub strategy: BatchStrategy,
    pub provider: ProviderSettings,
    pub retry: RetrySettings,
    pub limits: JobLimits,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            output_dir: PathBuf::from("downloads"),
            strategy: BatchStrategy::default(),
            provider: ProviderSettings::default(),
            retry: RetrySettings::default(),
            limits: JobLimits::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    /// Base URL of a LibreTranslate-compatible service.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            endpoint: "http://localhost:5000".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        RetrySettings {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(value: &RetrySettings) -> Self {
        RetryPolicy {
            max_attempts: value.max_attempts,
            base_delay: Duration::from_millis(value.base_delay_ms),
            max_delay: Duration::from_millis(value.max_delay_ms),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads configuration.
    ///
    /// With `Some(path)` the file must exist. With `None`, `arbtrans.toml` in the working
    /// directory is used when present, defaults otherwise. The API key environment
    /// override is applied in both cases.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None if Path::new(CONFIG_FILE_NAME).is_file() => {
                Self::read_file(Path::new(CONFIG_FILE_NAME))?
            }
            None => Config::default(),
        };
        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded configuration");
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Replaces the API key when `key` is a non-empty value.
    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        parse_target_language(&self.target_language)?;
        if self.provider.endpoint.trim().is_empty() {
            return Err(Error::Config("provider.endpoint must not be empty".to_string()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(Error::Config(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(Error::Config(
                "retry.base_delay_ms must not exceed retry.max_delay_ms".to_string(),
            ));
        }
        if self.limits.max_files == 0 || self.limits.max_file_size == 0 {
            return Err(Error::Config(
                "limits.max_files and limits.max_file_size must be greater than zero"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions::new()
            .with_target_language(self.target_language.clone())
            .with_strategy(self.strategy)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.retry)
    }
}
