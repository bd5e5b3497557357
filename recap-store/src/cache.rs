//! Instrumented cache front-end over a key-value store.

use crate::wrap::{instrument, replay, CallCounter, CallHistoryRecorder, Operation, Replay};
use crate::KeyValueStore;
use recap_core::{new_address, FormatError, OpIdentity, RecapResult, Value};
use std::sync::Arc;

/// The bare store operation: write under a fresh address, return it.
struct StoreOp<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Operation<Value, String> for StoreOp<S> {
    fn call(&self, value: Value) -> RecapResult<String> {
        let key = new_address();
        self.store.set(&key, &value.into_bytes())?;
        Ok(key)
    }
}

/// Cache front-end: stores values under freshly generated addresses and
/// retrieves them with optional type coercion.
///
/// The store operation is pre-wired with the default instrumentation stack
/// under the identity `"Cache.store"`, so every `store` call is counted and
/// its input/output recorded for later [`replay`](CacheStore::replay).
/// Retrieval is deliberately uninstrumented, matching the key shapes any
/// external inspection tooling expects.
///
/// The handle to the underlying store is shared (`Arc`); `CacheStore` holds
/// no state of its own beyond that handle and the wired-up operation.
pub struct CacheStore<S: KeyValueStore> {
    store: Arc<S>,
    identity: OpIdentity,
    store_op: CallHistoryRecorder<S, CallCounter<S, StoreOp<S>>>,
}

impl<S: KeyValueStore> CacheStore<S> {
    /// Identity under which the store operation is instrumented.
    const STORE_IDENTITY: (&'static str, &'static str) = ("Cache", "store");

    /// Create a cache over a shared store handle.
    pub fn new(store: Arc<S>) -> Self {
        let identity = OpIdentity::new(Self::STORE_IDENTITY.0, Self::STORE_IDENTITY.1);
        let store_op = instrument(
            Arc::clone(&store),
            identity.clone(),
            StoreOp {
                store: Arc::clone(&store),
            },
        );
        Self {
            store,
            identity,
            store_op,
        }
    }

    /// Store a value under a freshly generated address and return the
    /// address.
    ///
    /// The value's byte rendering is written verbatim; stored records are
    /// never mutated afterwards.
    pub fn store(&self, value: impl Into<Value>) -> RecapResult<String> {
        self.store_op.call(value.into())
    }

    /// Read the raw bytes at `key` and apply `convert`.
    ///
    /// A missing key is `Ok(None)`, never an error. Converter failures
    /// propagate unchanged and leave store state untouched.
    pub fn get<T, F>(&self, key: &str, convert: F) -> RecapResult<Option<T>>
    where
        F: FnOnce(&[u8]) -> RecapResult<T>,
    {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(convert(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read the raw bytes at `key`, unconverted.
    pub fn get_bytes(&self, key: &str) -> RecapResult<Option<Vec<u8>>> {
        self.store.get(key)
    }

    /// Read the value at `key` as UTF-8 text.
    pub fn get_string(&self, key: &str) -> RecapResult<Option<String>> {
        self.get(key, |raw| {
            String::from_utf8(raw.to_vec()).map_err(|_| {
                FormatError::InvalidUtf8 {
                    key: key.to_string(),
                }
                .into()
            })
        })
    }

    /// Read the value at `key` as a decimal integer.
    pub fn get_int(&self, key: &str) -> RecapResult<Option<i64>> {
        self.get(key, |raw| {
            let text = String::from_utf8_lossy(raw);
            text.parse().map_err(|_| {
                FormatError::NotAnInteger {
                    key: key.to_string(),
                    text: text.into_owned(),
                }
                .into()
            })
        })
    }

    /// How many times the store operation has been called.
    pub fn call_count(&self) -> RecapResult<i64> {
        Ok(self.get_int(self.identity.counter_key())?.unwrap_or(0))
    }

    /// Reconstruct the store operation's invocation trace.
    pub fn replay(&self) -> RecapResult<Replay> {
        replay(self.store.as_ref(), &self.identity)
    }

    /// The shared store handle.
    pub fn store_handle(&self) -> &Arc<S> {
        &self.store
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::InMemoryStore;
    use proptest::prelude::*;

    proptest! {
        /// Property: `get(store(v))` returns `v` unchanged for arbitrary
        /// byte payloads.
        #[test]
        fn prop_store_get_round_trip(
            value in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let cache = CacheStore::new(Arc::new(InMemoryStore::new()));
            let key = cache.store(value.clone()).unwrap();
            prop_assert_eq!(cache.get_bytes(&key).unwrap(), Some(value));
        }

        /// Property: `get_int` round-trips any integer stored via `store`.
        #[test]
        fn prop_get_int_round_trip(n in any::<i64>()) {
            let cache = CacheStore::new(Arc::new(InMemoryStore::new()));
            let key = cache.store(n).unwrap();
            prop_assert_eq!(cache.get_int(&key).unwrap(), Some(n));
        }

        /// Property: after N stores the counter and both history lists all
        /// report N.
        #[test]
        fn prop_counter_and_history_track_call_count(n in 0usize..16) {
            let cache = CacheStore::new(Arc::new(InMemoryStore::new()));
            for i in 0..n {
                cache.store(i as i64).unwrap();
            }
            prop_assert_eq!(cache.call_count().unwrap(), n as i64);
            let trace = cache.replay().unwrap();
            prop_assert_eq!(trace.call_count(), n);
            prop_assert_eq!(trace.pairs().len(), n);
        }
    }
}
