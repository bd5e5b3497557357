//! Resource access counting wrapper.

use crate::fetcher::Fetcher;
use recap_core::{access_count_key, RecapResult};
use recap_store::KeyValueStore;
use std::sync::Arc;
use tracing::debug;

/// Wraps a [`Fetcher`] and counts accesses per resource.
///
/// Same increment contract as the operation call counter, but keyed by the
/// externally supplied resource identifier under `count:<resource>` rather
/// than by an operation identity. The increment happens before delegation,
/// so every request is counted whether the downstream layers hit their
/// cache, miss it, or fail.
pub struct AccessCounter<S, F> {
    store: Arc<S>,
    inner: F,
}

impl<S, F> AccessCounter<S, F> {
    /// Wrap `inner`, counting accesses in `store`.
    pub fn new(store: Arc<S>, inner: F) -> Self {
        Self { store, inner }
    }
}

impl<S, F> Fetcher for AccessCounter<S, F>
where
    S: KeyValueStore,
    F: Fetcher,
{
    fn fetch(&self, url: &str) -> RecapResult<String> {
        let count = self.store.increment(&access_count_key(url))?;
        debug!(url, count, "access counted");
        self.inner.fetch(url)
    }
}

// ============================================================================
// TESTS
// ============================================================================
