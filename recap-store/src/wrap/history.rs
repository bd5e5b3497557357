//! Call history recording wrapper.

use super::operation::Operation;
use crate::KeyValueStore;
use recap_core::{OpIdentity, RecapResult, TraceRepr};
use std::sync::Arc;
use tracing::debug;

/// Wraps an operation and records its inputs and outputs.
///
/// Inputs and outputs go to two parallel ordered lists, `<identity>:inputs`
/// and `<identity>:outputs`, in strict call order. Order is the sole
/// correlation mechanism: entry `i` of one list corresponds to entry `i` of
/// the other, with no explicit call id.
///
/// The input is appended BEFORE the inner operation runs, so a crash during
/// the call still leaves a recorded input. The output is appended only after
/// a successful return; a failed call therefore leaves the output list one
/// entry short. That mismatch is intentional and [`replay`](super::replay)
/// tolerates it by pairing only up to the shorter list.
pub struct CallHistoryRecorder<S, Op> {
    store: Arc<S>,
    identity: OpIdentity,
    inner: Op,
}

impl<S, Op> CallHistoryRecorder<S, Op> {
    /// Wrap `inner`, recording history under `identity`.
    pub fn new(store: Arc<S>, identity: OpIdentity, inner: Op) -> Self {
        Self {
            store,
            identity,
            inner,
        }
    }

    /// The identity this recorder is keyed by.
    pub fn identity(&self) -> &OpIdentity {
        &self.identity
    }
}

impl<S, Op, I, O> Operation<I, O> for CallHistoryRecorder<S, Op>
where
    S: KeyValueStore,
    Op: Operation<I, O>,
    I: TraceRepr,
    O: TraceRepr,
{
    fn call(&self, input: I) -> RecapResult<O> {
        let input_repr = input.trace_repr();
        self.store
            .append_to_list(&self.identity.inputs_key(), input_repr.as_bytes())?;
        debug!(identity = %self.identity, input = %input_repr, "input recorded");

        let output = self.inner.call(input)?;

        let output_repr = output.trace_repr();
        self.store
            .append_to_list(&self.identity.outputs_key(), output_repr.as_bytes())?;
        debug!(identity = %self.identity, output = %output_repr, "output recorded");
        Ok(output)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use recap_core::{StoreError, Value};

    fn echo(value: Value) -> RecapResult<String> {
        Ok(value.trace_repr())
    }

    #[test]
    fn test_records_input_and_output_in_order() {
        let store = Arc::new(InMemoryStore::new());
        let identity = OpIdentity::new("Test", "echo");
        let recorded = CallHistoryRecorder::new(Arc::clone(&store), identity.clone(), echo);

        recorded.call(Value::from("a")).unwrap();
        recorded.call(Value::Int(3)).unwrap();

        let inputs = store.list_range(&identity.inputs_key(), 0, -1).unwrap();
        let outputs = store.list_range(&identity.outputs_key(), 0, -1).unwrap();

        assert_eq!(inputs, vec![b"\"a\"".to_vec(), b"3".to_vec()]);
        assert_eq!(outputs, vec![b"\"a\"".to_vec(), b"3".to_vec()]);
    }

    #[test]
    fn test_failed_call_records_input_but_no_output() {
        let store = Arc::new(InMemoryStore::new());
        let identity = OpIdentity::new("Test", "fails");
        let failing = |_: Value| -> RecapResult<String> {
            Err(StoreError::Unavailable {
                reason: "down".to_string(),
            }
            .into())
        };
        let recorded = CallHistoryRecorder::new(Arc::clone(&store), identity.clone(), failing);

        assert!(recorded.call(Value::Int(1)).is_err());

        assert_eq!(
            store.list_range(&identity.inputs_key(), 0, -1).unwrap(),
            vec![b"1".to_vec()]
        );
        assert!(store
            .list_range(&identity.outputs_key(), 0, -1)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_after_n_calls_both_lists_have_n_entries() {
        let store = Arc::new(InMemoryStore::new());
        let identity = OpIdentity::new("Test", "echo");
        let recorded = CallHistoryRecorder::new(Arc::clone(&store), identity.clone(), echo);

        for n in 0..7 {
            recorded.call(Value::Int(n)).unwrap();
        }

        assert_eq!(store.list_range(&identity.inputs_key(), 0, -1).unwrap().len(), 7);
        assert_eq!(store.list_range(&identity.outputs_key(), 0, -1).unwrap().len(), 7);
    }
}
