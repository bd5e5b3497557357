//! The fetch collaborator and its HTTP implementation.

use recap_core::{FetchError, RecapResult};
use std::time::Duration;

/// A blocking fetch of textual content from a remote resource.
///
/// The single seam through which this crate reaches the network. Wrappers
/// ([`AccessCounter`](crate::AccessCounter),
/// [`TtlMemoizer`](crate::TtlMemoizer)) implement it themselves over an
/// inner `Fetcher`, so a wrapped fetch has the same signature as a bare one.
pub trait Fetcher: Send + Sync {
    /// Fetch the content at `url`, or fail with a
    /// [`FetchError`](recap_core::FetchError).
    fn fetch(&self, url: &str) -> RecapResult<String>;
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch(&self, url: &str) -> RecapResult<String> {
        (**self).fetch(url)
    }
}

/// HTTP implementation of [`Fetcher`] over a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with reqwest's default client settings.
    pub fn new() -> RecapResult<Self> {
        Self::builder(None)
    }

    /// Create a fetcher with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> RecapResult<Self> {
        Self::builder(Some(timeout))
    }

    fn builder(timeout: Option<Duration>) -> RecapResult<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::ClientBuild {
            reason: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> RecapResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        response.text().map_err(|e| {
            FetchError::BodyRead {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
        assert!(HttpFetcher::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
