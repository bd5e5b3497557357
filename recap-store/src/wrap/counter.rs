//! Call counting wrapper.

use super::operation::Operation;
use crate::KeyValueStore;
use recap_core::{OpIdentity, RecapResult};
use std::sync::Arc;
use tracing::debug;

/// Wraps an operation and counts its invocations.
///
/// Each call atomically increments the store's integer at the operation's
/// identity by exactly 1 before delegating (pre-increment: the call is
/// counted even if the inner operation then fails). The inner result is
/// returned unmodified, and the only added failure mode is the store's own.
///
/// The counter is monotonically non-decreasing and can be read back at any
/// time without resetting it.
pub struct CallCounter<S, Op> {
    store: Arc<S>,
    identity: OpIdentity,
    inner: Op,
}

impl<S, Op> CallCounter<S, Op> {
    /// Wrap `inner`, counting calls under `identity`.
    pub fn new(store: Arc<S>, identity: OpIdentity, inner: Op) -> Self {
        Self {
            store,
            identity,
            inner,
        }
    }

    /// The identity this counter is keyed by.
    pub fn identity(&self) -> &OpIdentity {
        &self.identity
    }
}

impl<S, Op, I, O> Operation<I, O> for CallCounter<S, Op>
where
    S: KeyValueStore,
    Op: Operation<I, O>,
{
    fn call(&self, input: I) -> RecapResult<O> {
        let count = self.store.increment(self.identity.counter_key())?;
        debug!(identity = %self.identity, count, "call counted");
        self.inner.call(input)
    }
}

// ============================================================================
// TESTS
// ============================================================================
