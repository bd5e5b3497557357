//! Operation identity and the key-naming scheme.
//!
//! Every wrapped operation is registered with an explicit, programmer-supplied
//! identity string at construction time. All of the operation's persisted
//! state (its counter and its input/output history) is addressed under keys
//! derived from that identity, so two distinct operations never share state.

use std::fmt;
use uuid::Uuid;

/// Suffix appended to an identity to address its recorded inputs.
const INPUTS_SUFFIX: &str = ":inputs";

/// Suffix appended to an identity to address its recorded outputs.
const OUTPUTS_SUFFIX: &str = ":outputs";

/// Namespace prefix for resource-access counters, kept disjoint from
/// operation identities.
const ACCESS_COUNT_PREFIX: &str = "count:";

/// Stable identity for one wrapped operation.
///
/// The identity is the namespace root for the operation's counter and call
/// history. It is built from a component name and a method name, rendered as
/// `"Component.method"` (the shape inspection tooling expects).
///
/// # Invariants
///
/// - One operation always maps to the same identity across calls.
/// - Two distinct operations must never collide. Callers guarantee this by
///   choosing unique (component, method) pairs; neither part should contain
///   `.` or `:`, which are reserved as separators.
///
/// # Derived keys
///
/// - counter: `<identity>`
/// - inputs: `<identity>:inputs`
/// - outputs: `<identity>:outputs`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpIdentity {
    qualified: String,
}

impl OpIdentity {
    /// Create an identity from a component name and a method name.
    pub fn new(component: impl AsRef<str>, method: impl AsRef<str>) -> Self {
        Self {
            qualified: format!("{}.{}", component.as_ref(), method.as_ref()),
        }
    }

    /// Create an identity from an already-qualified name.
    ///
    /// Useful when interoperating with state written by tooling that only
    /// knows the rendered form.
    pub fn from_qualified(qualified: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
        }
    }

    /// The qualified name, e.g. `"Cache.store"`.
    pub fn as_str(&self) -> &str {
        &self.qualified
    }

    /// Key under which this operation's call counter is stored.
    ///
    /// The counter key is the identity itself.
    pub fn counter_key(&self) -> &str {
        &self.qualified
    }

    /// Key under which this operation's recorded inputs are stored.
    pub fn inputs_key(&self) -> String {
        format!("{}{}", self.qualified, INPUTS_SUFFIX)
    }

    /// Key under which this operation's recorded outputs are stored.
    pub fn outputs_key(&self) -> String {
        format!("{}{}", self.qualified, OUTPUTS_SUFFIX)
    }
}

impl fmt::Display for OpIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

/// Key under which accesses to an external resource are counted.
///
/// Resource counters live under the `count:` prefix so they never collide
/// with operation-identity counters.
pub fn access_count_key(resource: &str) -> String {
    format!("{}{}", ACCESS_COUNT_PREFIX, resource)
}

/// Generate a fresh, globally unique storage address.
///
/// Addresses are random (UUIDv4, hyphenated), collision-free for practical
/// purposes, and carry no ordering information.
pub fn new_address() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_renders_qualified_name() {
        let id = OpIdentity::new("Cache", "store");
        assert_eq!(id.as_str(), "Cache.store");
        assert_eq!(format!("{}", id), "Cache.store");
    }

    #[test]
    fn test_identity_is_stable_across_constructions() {
        let a = OpIdentity::new("Cache", "store");
        let b = OpIdentity::new("Cache", "store");
        assert_eq!(a, b);
        assert_eq!(a.counter_key(), b.counter_key());
    }

    #[test]
    fn test_derived_keys() {
        let id = OpIdentity::new("Cache", "store");
        assert_eq!(id.counter_key(), "Cache.store");
        assert_eq!(id.inputs_key(), "Cache.store:inputs");
        assert_eq!(id.outputs_key(), "Cache.store:outputs");
    }

    #[test]
    fn test_from_qualified_round_trips() {
        let id = OpIdentity::from_qualified("Cache.store");
        assert_eq!(id, OpIdentity::new("Cache", "store"));
    }

    #[test]
    fn test_access_count_key_is_prefixed() {
        assert_eq!(
            access_count_key("http://example.com"),
            "count:http://example.com"
        );
    }

    #[test]
    fn test_access_counts_never_collide_with_identities() {
        // An identity never starts with the access-count prefix as long as
        // component names do not contain ':'.
        let id = OpIdentity::new("count", "store");
        assert_ne!(id.counter_key(), access_count_key("store"));
    }

    #[test]
    fn test_new_address_is_unique() {
        let a = new_address();
        let b = new_address();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36); // hyphenated UUID
    }
}
