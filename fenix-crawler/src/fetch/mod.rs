//! Page fetching with explicit retry.

mod client;
mod error;

pub use client::{DEFAULT_BASE_URL, FetchClient, FetchConfig, RetryPolicy};
pub use error::FetchError;
