//! Operation wrapping: counting, history recording, and replay.
//!
//! Each behavior is an independent `Operation -> Operation` wrapper with an
//! identical external signature, so behaviors compose freely around any
//! underlying operation. State lives entirely in the key-value store,
//! addressed by the operation's [`OpIdentity`](recap_core::OpIdentity);
//! the wrappers themselves hold nothing but handles.
//!
//! # Default composition order
//!
//! When both wrappers apply, history goes outside and counting inside:
//!
//! ```text
//! CallHistoryRecorder -> CallCounter -> operation
//! ```
//!
//! so the counter increments exactly once per underlying call attempt while
//! the history entry wraps the full counted attempt. [`instrument`] builds
//! this stack. The ordering is a documented convention, not an enforced
//! invariant; either wrapper works alone or in the other order.

mod counter;
mod history;
mod operation;
mod replay;

pub use counter::CallCounter;
pub use history::CallHistoryRecorder;
pub use operation::Operation;
pub use replay::{replay, Replay};

use crate::KeyValueStore;
use recap_core::{OpIdentity, TraceRepr};
use std::sync::Arc;

/// Wrap `op` with the default instrumentation stack.
///
/// Counter and history share the same identity, so one call attempt bumps
/// `<identity>` and appends to `<identity>:inputs` / `<identity>:outputs`.
pub fn instrument<S, Op, I, O>(
    store: Arc<S>,
    identity: OpIdentity,
    op: Op,
) -> CallHistoryRecorder<S, CallCounter<S, Op>>
where
    S: KeyValueStore,
    Op: Operation<I, O>,
    I: TraceRepr,
    O: TraceRepr,
{
    let counted = CallCounter::new(Arc::clone(&store), identity.clone(), op);
    CallHistoryRecorder::new(store, identity, counted)
}

// ============================================================================
// TESTS
// ============================================================================
