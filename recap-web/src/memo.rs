//! TTL-bounded memoization of fetch results.

use crate::fetcher::Fetcher;
use recap_core::{FormatError, RecapResult};
use recap_store::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configuration for the TTL memoizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    /// How long a fetched result stays valid.
    pub ttl: Duration,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
        }
    }
}

impl MemoConfig {
    /// Create a config with the default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Wraps a [`Fetcher`] and memoizes results for a bounded time window.
///
/// Per-resource the cache is a two-state machine, absent or cached:
///
/// - cached and unexpired: return the cached text, no delegation;
/// - absent (including native expiry, which reads back as absent): delegate,
///   write the result under `<resource>` with the configured TTL, return it.
///
/// A failed fetch propagates with no cache write, leaving the resource
/// absent. Two concurrent misses may both fetch and both write; the write is
/// idempotent enough that the race is benign, and no locking is added here.
pub struct TtlMemoizer<S, F> {
    store: Arc<S>,
    inner: F,
    config: MemoConfig,
}

impl<S, F> TtlMemoizer<S, F> {
    /// Wrap `inner`, caching results in `store`.
    pub fn new(store: Arc<S>, inner: F, config: MemoConfig) -> Self {
        Self {
            store,
            inner,
            config,
        }
    }

    /// Wrap `inner` with the default 10-second TTL.
    pub fn with_defaults(store: Arc<S>, inner: F) -> Self {
        Self::new(store, inner, MemoConfig::default())
    }

    /// The memoizer configuration.
    pub fn config(&self) -> &MemoConfig {
        &self.config
    }
}

impl<S, F> Fetcher for TtlMemoizer<S, F>
where
    S: KeyValueStore,
    F: Fetcher,
{
    fn fetch(&self, url: &str) -> RecapResult<String> {
        if let Some(raw) = self.store.get(url)? {
            debug!(url, "cache hit");
            return String::from_utf8(raw).map_err(|_| {
                FormatError::InvalidUtf8 {
                    key: url.to_string(),
                }
                .into()
            });
        }

        debug!(url, ttl_ms = self.config.ttl.as_millis() as u64, "cache miss");
        let content = self.inner.fetch(url)?;
        self.store
            .set_with_expiry(url, content.as_bytes(), self.config.ttl)?;
        Ok(content)
    }
}

// ============================================================================
// TESTS
// ============================================================================
