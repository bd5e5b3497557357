//! The operation abstraction the wrappers compose around.

use recap_core::RecapResult;

/// A unary operation from `I` to `O`.
///
/// Wrappers implement this trait themselves over an inner `Operation`, so a
/// wrapped operation has exactly the same external signature as the bare
/// one. Any `Fn(I) -> RecapResult<O>` is an operation, so plain functions
/// and closures wrap without ceremony.
pub trait Operation<I, O>: Send + Sync {
    /// Invoke the operation.
    fn call(&self, input: I) -> RecapResult<O>;
}

impl<I, O, F> Operation<I, O> for F
where
    F: Fn(I) -> RecapResult<O> + Send + Sync,
{
    fn call(&self, input: I) -> RecapResult<O> {
        self(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_are_operations() {
        let double = |n: i64| -> RecapResult<i64> { Ok(n * 2) };
        assert_eq!(double.call(21).unwrap(), 42);
    }

    #[test]
    fn test_fn_items_are_operations() {
        fn upper(s: String) -> RecapResult<String> {
            Ok(s.to_uppercase())
        }
        assert_eq!(upper.call("ok".to_string()).unwrap(), "OK");
    }
}
