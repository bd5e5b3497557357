//! Storable values and the display-serialization contract.
//!
//! The store only ever sees raw bytes. `Value` models the union of payloads
//! callers hand to the cache, and `TraceRepr` is the explicit capability the
//! history recorder uses to serialize arbitrary inputs and outputs into a
//! canonical string form.

use serde::{Deserialize, Serialize};

/// A value that can be written to the key-value store.
///
/// The byte rendering is verbatim: text, integers, and floats are written as
/// their UTF-8 rendering, raw bytes are written unchanged. Reading back with
/// a typed getter (`get_string`, `get_int`) recovers the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Raw bytes, stored verbatim.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
    /// Signed integer, stored as its decimal rendering.
    Int(i64),
    /// Floating-point number, stored as its decimal rendering.
    Float(f64),
}

impl Value {
    /// The byte representation written to the store.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Value::Bytes(b) => b,
            Value::Text(s) => s.into_bytes(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }

    /// The byte representation, without consuming the value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.clone().into_bytes()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

/// Canonical, total string form used for history recording.
///
/// History recording must work for any input or output an operation handles,
/// so the capability is explicit rather than relying on `Debug` formatting
/// that may change between compiler releases. Implementations choose a form
/// that is unambiguous within their type: text is quoted so `Text("3")` and
/// `Int(3)` remain distinguishable in a trace.
pub trait TraceRepr {
    /// Render this value for the call-history trace.
    fn trace_repr(&self) -> String;
}

impl TraceRepr for Value {
    fn trace_repr(&self) -> String {
        match self {
            Value::Bytes(b) => format!("{:?}", String::from_utf8_lossy(b)),
            Value::Text(s) => format!("{:?}", s),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
        }
    }
}

impl TraceRepr for String {
    fn trace_repr(&self) -> String {
        self.clone()
    }
}

impl TraceRepr for &str {
    fn trace_repr(&self) -> String {
        (*self).to_string()
    }
}

impl TraceRepr for i64 {
    fn trace_repr(&self) -> String {
        self.to_string()
    }
}

impl TraceRepr for u64 {
    fn trace_repr(&self) -> String {
        self.to_string()
    }
}

impl TraceRepr for f64 {
    fn trace_repr(&self) -> String {
        self.to_string()
    }
}

impl TraceRepr for Vec<u8> {
    fn trace_repr(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }
}

impl TraceRepr for () {
    fn trace_repr(&self) -> String {
        "()".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_byte_rendering() {
        assert_eq!(Value::from("abc").into_bytes(), b"abc".to_vec());
        assert_eq!(Value::from(42i64).into_bytes(), b"42".to_vec());
        assert_eq!(Value::from(-7i32).into_bytes(), b"-7".to_vec());
        assert_eq!(Value::from(vec![0u8, 255]).into_bytes(), vec![0u8, 255]);
    }

    #[test]
    fn test_value_float_rendering() {
        assert_eq!(Value::from(1.5f64).into_bytes(), b"1.5".to_vec());
    }

    #[test]
    fn test_to_bytes_matches_into_bytes() {
        let v = Value::from("hello");
        assert_eq!(v.to_bytes(), v.clone().into_bytes());
    }

    #[test]
    fn test_trace_repr_disambiguates_text_and_int() {
        assert_eq!(Value::Text("3".to_string()).trace_repr(), "\"3\"");
        assert_eq!(Value::Int(3).trace_repr(), "3");
    }

    #[test]
    fn test_trace_repr_for_bytes_is_lossy_utf8() {
        let v = Value::Bytes(b"ok".to_vec());
        assert_eq!(v.trace_repr(), "\"ok\"");
    }

    #[test]
    fn test_trace_repr_for_plain_string_is_verbatim() {
        let key = "3f0b8a".to_string();
        assert_eq!(key.trace_repr(), "3f0b8a");
    }
}
