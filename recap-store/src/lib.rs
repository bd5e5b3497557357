//! recap Storage - Key-Value Trait and In-Memory Implementation
//!
//! Defines the minimal key-value capability set the rest of the workspace
//! consumes, plus an in-memory implementation with native expiry. The
//! wrapping layer (counting, history, replay) lives in [`wrap`], and the
//! instrumented cache front-end in [`cache`].

pub mod cache;
pub mod wrap;

pub use cache::CacheStore;
pub use wrap::{instrument, replay, CallCounter, CallHistoryRecorder, Operation, Replay};

use chrono::{DateTime, Utc};
use recap_core::{RecapResult, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Minimal key-value capability set.
///
/// This is the only surface through which the workspace touches persisted
/// state. Implementations must make `increment` and `set_with_expiry`
/// atomic; the wrappers perform no locking of their own, so concurrent
/// callers are resolved entirely by the backend's ordering guarantees.
///
/// Expired entries must read back as absent: a `get` after expiry behaves
/// exactly like a `get` of a key that was never written.
pub trait KeyValueStore: Send + Sync {
    /// Write `value` verbatim under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &[u8]) -> RecapResult<()>;

    /// Read the raw bytes at `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> RecapResult<Option<Vec<u8>>>;

    /// Atomically add 1 to the integer at `key` and return the new value.
    ///
    /// A missing (or expired) key counts up from zero. Fails with
    /// [`StoreError::NotACounter`] if the existing payload is not a decimal
    /// integer.
    fn increment(&self, key: &str) -> RecapResult<i64>;

    /// Append `value` to the ordered list at `key`, creating it if needed.
    fn append_to_list(&self, key: &str, value: &[u8]) -> RecapResult<()>;

    /// Read elements `start..=end` of the list at `key`.
    ///
    /// Both ends are inclusive and negative indices count from the tail,
    /// so `(0, -1)` reads the whole list. A missing key is an empty list.
    fn list_range(&self, key: &str, start: i64, end: i64) -> RecapResult<Vec<Vec<u8>>>;

    /// Write `value` under `key` with a time-to-live.
    fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> RecapResult<()>;

    /// Drop every key. Used at startup by callers that want a clean slate.
    fn flush(&self) -> RecapResult<()>;
}

// ============================================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================================

/// One stored entry: a scalar with optional expiry, or an ordered list.
#[derive(Debug, Clone)]
enum Entry {
    Scalar {
        value: Vec<u8>,
        expires_at: Option<DateTime<Utc>>,
    },
    List(Vec<Vec<u8>>),
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Entry::Scalar {
                expires_at: Some(at),
                ..
            } => now >= *at,
            _ => false,
        }
    }
}

/// In-memory [`KeyValueStore`] with lazy expiry.
///
/// State lives behind an `Arc<RwLock<_>>`, so the handle is cheap to clone
/// and can be shared across every component that needs it. Expiry is lazy:
/// expired scalars are treated as absent on read and overwritten on the next
/// write, never reaped by a background task.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(
        &self,
    ) -> RecapResult<std::sync::RwLockReadGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::LockPoisoned.into())
    }

    fn write_entries(
        &self,
    ) -> RecapResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::LockPoisoned.into())
    }
}

/// Clamp an inclusive, possibly-negative range to list indices.
///
/// Redis LRANGE semantics: negative indices count from the tail, the end is
/// clamped to the last element, and an inverted range is empty.
fn clamp_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let mut start = if start < 0 { start + len } else { start };
    let mut end = if end < 0 { end + len } else { end };

    if start < 0 {
        start = 0;
    }
    if end >= len {
        end = len - 1;
    }
    if start > end || start >= len || end < 0 {
        return None;
    }
    Some((start as usize, end as usize))
}

impl KeyValueStore for InMemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> RecapResult<()> {
        let mut entries = self.write_entries()?;
        entries.insert(
            key.to_string(),
            Entry::Scalar {
                value: value.to_vec(),
                expires_at: None,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> RecapResult<Option<Vec<u8>>> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            None => Ok(None),
            Some(entry) if entry.is_expired(Utc::now()) => Ok(None),
            Some(Entry::Scalar { value, .. }) => Ok(Some(value.clone())),
            Some(Entry::List(_)) => Err(StoreError::WrongKind {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn increment(&self, key: &str) -> RecapResult<i64> {
        let mut entries = self.write_entries()?;
        let now = Utc::now();

        // Expired counters restart from zero; live ones keep their expiry.
        let (current, expires_at) = match entries.get(key) {
            None => (0, None),
            Some(entry) if entry.is_expired(now) => (0, None),
            Some(Entry::Scalar { value, expires_at }) => {
                let text = std::str::from_utf8(value).map_err(|_| StoreError::NotACounter {
                    key: key.to_string(),
                })?;
                let current: i64 = text.parse().map_err(|_| StoreError::NotACounter {
                    key: key.to_string(),
                })?;
                (current, *expires_at)
            }
            Some(Entry::List(_)) => {
                return Err(StoreError::WrongKind {
                    key: key.to_string(),
                }
                .into())
            }
        };

        let next = current + 1;
        entries.insert(
            key.to_string(),
            Entry::Scalar {
                value: next.to_string().into_bytes(),
                expires_at,
            },
        );
        Ok(next)
    }

    fn append_to_list(&self, key: &str, value: &[u8]) -> RecapResult<()> {
        let mut entries = self.write_entries()?;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
        {
            Entry::List(items) => {
                items.push(value.to_vec());
                Ok(())
            }
            Entry::Scalar { .. } => Err(StoreError::WrongKind {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn list_range(&self, key: &str, start: i64, end: i64) -> RecapResult<Vec<Vec<u8>>> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(items)) => match clamp_range(items.len(), start, end) {
                Some((s, e)) => Ok(items[s..=e].to_vec()),
                None => Ok(Vec::new()),
            },
            Some(Entry::Scalar { .. }) => Err(StoreError::WrongKind {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> RecapResult<()> {
        // A TTL too large to represent never expires.
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        let mut entries = self.write_entries()?;
        entries.insert(
            key.to_string(),
            Entry::Scalar {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    fn flush(&self) -> RecapResult<()> {
        self.write_entries()?.clear();
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
