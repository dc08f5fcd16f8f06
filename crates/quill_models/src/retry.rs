//! Retry with exponential backoff for establishing requests.

use quill_core::RetryConfig;
use quill_error::{RemoteServiceError, RetryableError};
use std::future::Future;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{info, warn};

/// Backoff limits applied on top of the per-error strategy.
///
/// Each failure kind carries its own backoff parameters (see
/// [`RetryableError::retry_strategy_params`]); the configured values cap
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    enabled: bool,
    max_retries: usize,
    initial_backoff_ms: u64,
    max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_delay_secs: config.max_delay_secs,
        }
    }
}

impl RetryPolicy {
    /// A policy that attempts once.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Run `operation`, retrying transient failures.
    ///
    /// The first attempt runs unconditionally. A permanent failure, or any
    /// failure when retries are disabled, is returned immediately. Otherwise
    /// the failure's own strategy, capped by this policy, drives further
    /// attempts.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, RemoteServiceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteServiceError>>,
    {
        let first = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !self.enabled || !first.is_retryable() {
            warn!(error = %first, "Permanent completion service error, failing immediately");
            return Err(first);
        }

        let (init_ms, retries, delay_secs) = first.retry_strategy_params();
        let initial_ms = init_ms.min(self.initial_backoff_ms).max(1);
        let max_retries = retries.min(self.max_retries);
        let max_delay_secs = delay_secs.min(self.max_delay_secs).max(1);

        if max_retries == 0 {
            return Err(first);
        }

        info!(
            error = %first,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Completion request failed, will retry with backoff"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(std::time::Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || {
            let attempt = operation();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, "Completion request failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "Permanent completion service error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
