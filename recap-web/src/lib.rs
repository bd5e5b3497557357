//! recap Web - Counted, TTL-Memoized Page Fetching
//!
//! Wraps a blocking fetch collaborator with two independent behaviors from
//! the recap wrapping model: per-resource access counting and TTL-bounded
//! memoization, both backed by the shared key-value store. [`PageClient`]
//! wires up the conventional stack.

pub mod access;
pub mod fetcher;
pub mod memo;

pub use access::AccessCounter;
pub use fetcher::{Fetcher, HttpFetcher};
pub use memo::{MemoConfig, TtlMemoizer};

use recap_core::{access_count_key, FormatError, RecapResult};
use recap_store::KeyValueStore;
use std::sync::Arc;

/// Page-fetching client with the conventional wrapper stack:
///
/// ```text
/// AccessCounter -> TtlMemoizer -> fetcher
/// ```
///
/// The counter sits outside the memoizer, so every `get_page` call bumps
/// `count:<url>` whether it is served from cache or fetched fresh; the
/// underlying fetcher only runs on a cache miss.
pub struct PageClient<S: KeyValueStore, F: Fetcher> {
    store: Arc<S>,
    stack: AccessCounter<S, TtlMemoizer<S, F>>,
}

impl<S: KeyValueStore, F: Fetcher> PageClient<S, F> {
    /// Build a client over a shared store handle and a fetch collaborator.
    pub fn new(store: Arc<S>, fetcher: F, config: MemoConfig) -> Self {
        let memoized = TtlMemoizer::new(Arc::clone(&store), fetcher, config);
        let stack = AccessCounter::new(Arc::clone(&store), memoized);
        Self { store, stack }
    }

    /// Build a client with the default 10-second TTL.
    pub fn with_defaults(store: Arc<S>, fetcher: F) -> Self {
        Self::new(store, fetcher, MemoConfig::default())
    }

    /// Fetch the page at `url`, counted and memoized.
    pub fn get_page(&self, url: &str) -> RecapResult<String> {
        self.stack.fetch(url)
    }

    /// How many times `url` has been requested through this stack.
    ///
    /// A resource that was never requested reads back as zero.
    pub fn access_count(&self, url: &str) -> RecapResult<i64> {
        let key = access_count_key(url);
        match self.store.get(&key)? {
            None => Ok(0),
            Some(raw) => {
                let text = String::from_utf8_lossy(&raw);
                text.parse().map_err(|_| {
                    FormatError::NotAnInteger {
                        key,
                        text: text.into_owned(),
                    }
                    .into()
                })
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use recap_store::InMemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for CountingFetcher {
        fn fetch(&self, url: &str) -> RecapResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("<html>{}</html>", url))
        }
    }

    #[test]
    fn test_get_page_returns_fetched_content() {
        let store = Arc::new(InMemoryStore::new());
        let client = PageClient::with_defaults(store, CountingFetcher::new());

        let page = client.get_page("http://example.com").unwrap();
        assert_eq!(page, "<html>http://example.com</html>");
    }

    #[test]
    fn test_repeat_requests_within_ttl_fetch_once() {
        let store = Arc::new(InMemoryStore::new());
        let fetcher = Arc::new(CountingFetcher::new());
        let client = PageClient::with_defaults(store, Arc::clone(&fetcher));

        let first = client.get_page("http://example.com").unwrap();
        let second = client.get_page("http://example.com").unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_request_is_counted_even_on_cache_hit() {
        let store = Arc::new(InMemoryStore::new());
        let client = PageClient::with_defaults(store, CountingFetcher::new());

        for _ in 0..5 {
            client.get_page("http://example.com").unwrap();
        }

        assert_eq!(client.access_count("http://example.com").unwrap(), 5);
    }

    #[test]
    fn test_unrequested_resource_counts_zero() {
        let store = Arc::new(InMemoryStore::new());
        let client = PageClient::with_defaults(store, CountingFetcher::new());
        assert_eq!(client.access_count("http://never.example").unwrap(), 0);
    }

    #[test]
    fn test_expired_page_is_fetched_again() {
        let store = Arc::new(InMemoryStore::new());
        let fetcher = Arc::new(CountingFetcher::new());
        let client = PageClient::new(
            store,
            Arc::clone(&fetcher),
            MemoConfig::new().with_ttl(Duration::from_millis(30)),
        );

        client.get_page("http://example.com").unwrap();
        std::thread::sleep(Duration::from_millis(60));
        client.get_page("http://example.com").unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(client.access_count("http://example.com").unwrap(), 2);
    }

    #[test]
    fn test_counter_key_shape_matches_convention() {
        let store = Arc::new(InMemoryStore::new());
        let client = PageClient::with_defaults(Arc::clone(&store), CountingFetcher::new());

        client.get_page("http://example.com").unwrap();
        assert_eq!(
            store.get("count:http://example.com").unwrap(),
            Some(b"1".to_vec())
        );
    }
}
