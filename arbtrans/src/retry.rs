//! Retry policy for provider calls.
//!
//! Only errors that report [`Error::is_retryable`] are retried. Delays double after every
//! failed attempt and are capped at `max_delay`.

use std::{thread, time::Duration};

use tracing::warn;

use crate::{
    error::Error,
    provider::{TranslationRequest, Translator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 are treated as 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(800),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        RetryPolicy {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay to wait after the `retry`-th failure (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        2u32.checked_pow(retry)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or attempts run out.
    /// `op` receives the 1-based attempt number.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut(u32) -> Result<T, Error>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let delay = self.delay_for(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "provider call failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// A provider wrapped in a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Translator> Retrying<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Retrying { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<T: Translator> Translator for Retrying<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn translate(&self, request: &TranslationRequest<'_>) -> Result<String, Error> {
        self.policy.run(|_| self.inner.translate(request))
    }
}
