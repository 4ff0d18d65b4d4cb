//! HTTP page fetcher with retry.
//!
//! The site drops connections under load, so the batch job treats
//! transport failures as transient and retries them. The retry policy is
//! explicit and caller-configurable: by default a fetch gives up after a
//! bounded number of attempts so an unattended run fails observably
//! instead of hanging; `RetryPolicy::unlimited()` restores retry-forever.

use std::num::NonZeroU32;
use std::time::Duration;

use super::error::FetchError;

/// Base URL of the Consórcio Fênix site.
pub const DEFAULT_BASE_URL: &str = "http://www.consorciofenix.com.br";

const DEFAULT_MAX_ATTEMPTS: u32 = 10;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How transport failures are retried within a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` retries indefinitely.
    max_attempts: Option<NonZeroU32>,
    delay: Duration,
}

impl RetryPolicy {
    /// Give up after `max_attempts` tries.
    pub fn limited(max_attempts: NonZeroU32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Retry forever. A fetch can then only end in success or a bad
    /// status; use with care on unattended runs.
    pub fn unlimited() -> Self {
        Self {
            max_attempts: None,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Set the pause between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether the policy allows another attempt after `attempts` tries.
    fn allows_retry(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max.get(),
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // NonZeroU32::new only fails on zero.
        Self::limited(NonZeroU32::new(DEFAULT_MAX_ATTEMPTS).expect("non-zero constant"))
    }
}

/// Configuration for the page fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL that discovered relative paths are resolved against.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry policy for transport failures.
    pub retry: RetryPolicy,
}

impl FetchConfig {
    /// Create a config pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Page fetcher over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl FetchClient {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            retry: config.retry,
        })
    }

    /// GET `base_url + path` and return the response body.
    ///
    /// Transport failures are retried per the policy, with a warning per
    /// failed attempt; retries never leave this call, so concurrent
    /// fetches are unaffected. A non-success status is returned as
    /// [`FetchError::BadStatus`] without retrying.
    pub async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let error = match self.try_get(&url).await {
                Ok(body) => return Ok(body),
                Err(Attempt::BadStatus(status)) => {
                    return Err(FetchError::BadStatus { url, status });
                }
                Err(Attempt::Transport(e)) => e,
            };

            if !self.retry.allows_retry(attempts) {
                return Err(FetchError::Transport {
                    url,
                    attempts,
                    source: error,
                });
            }

            tracing::warn!(%url, attempts, error = %error, "transport failure, retrying");
            tokio::time::sleep(self.retry.delay).await;
        }
    }

    async fn try_get(&self, url: &str) -> Result<String, Attempt> {
        let response = self.http.get(url).send().await.map_err(Attempt::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Attempt::BadStatus(status.as_u16()));
        }

        response.text().await.map_err(Attempt::Transport)
    }
}

/// Outcome of a single attempt, before the retry policy is applied.
enum Attempt {
    Transport(reqwest::Error),
    BadStatus(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn config_with_base_url() {
        let config = FetchConfig::new().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn default_policy_is_bounded() {
        let policy = RetryPolicy::default();
        assert!(policy.allows_retry(1));
        assert!(policy.allows_retry(DEFAULT_MAX_ATTEMPTS - 1));
        assert!(!policy.allows_retry(DEFAULT_MAX_ATTEMPTS));
    }

    #[test]
    fn unlimited_policy_always_allows_retry() {
        let policy = RetryPolicy::unlimited();
        assert!(policy.allows_retry(u32::MAX));
    }

    #[test]
    fn single_attempt_policy_never_retries() {
        let policy = RetryPolicy::limited(NonZeroU32::new(1).unwrap());
        assert!(!policy.allows_retry(1));
    }
}
