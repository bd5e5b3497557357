//! Read-only reconstruction of an operation's call history.

use crate::KeyValueStore;
use recap_core::{OpIdentity, RecapResult};
use std::fmt;

/// A rendered invocation trace for one operation.
///
/// Produced by [`replay`]; purely a read model, holding no store handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    identity: OpIdentity,
    call_count: usize,
    pairs: Vec<(String, String)>,
}

impl Replay {
    /// Number of recorded inputs (one per call attempt).
    pub fn call_count(&self) -> usize {
        self.call_count
    }

    /// The paired (input, output) entries, in call order.
    ///
    /// Pairs only extend to the shorter of the two recorded lists; a failed
    /// call contributes an input but no output and so no pair.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Summary line: `"<identity> was called <n> times:"`.
    pub fn summary(&self) -> String {
        format!("{} was called {} times:", self.identity, self.call_count)
    }

    /// One formatted line per pair: `"<identity>(*<input>) -> <output>"`.
    pub fn lines(&self) -> Vec<String> {
        self.pairs
            .iter()
            .map(|(input, output)| format!("{}(*{}) -> {}", self.identity, input, output))
            .collect()
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Reconstruct the invocation trace recorded for `identity`.
///
/// Reads both history lists in full and pairs them positionally. Zero
/// recorded calls yield a zero count and an empty trace, never an error.
/// No side effects on the store.
pub fn replay<S: KeyValueStore>(store: &S, identity: &OpIdentity) -> RecapResult<Replay> {
    let inputs = store.list_range(&identity.inputs_key(), 0, -1)?;
    let outputs = store.list_range(&identity.outputs_key(), 0, -1)?;

    let call_count = inputs.len();
    let pairs = inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| {
            (
                String::from_utf8_lossy(input).into_owned(),
                String::from_utf8_lossy(output).into_owned(),
            )
        })
        .collect();

    Ok(Replay {
        identity: identity.clone(),
        call_count,
        pairs,
    })
}

// ============================================================================
// TESTS
// ============================================================================
