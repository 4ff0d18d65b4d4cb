//! Fetch error types.

/// Errors from the page fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Building the underlying HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure (connection reset, timeout, DNS) that
    /// survived the configured retry policy.
    #[error("transport failure fetching {url} after {attempts} attempts: {source}")]
    Transport {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status. Error pages are not
    /// valid schedule markup, so this is fatal rather than retried.
    #[error("unexpected HTTP status {status} for {url}")]
    BadStatus { url: String, status: u16 },
}
