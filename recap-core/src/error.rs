//! Error types for recap operations
//!
//! Every failure from a collaborator is surfaced to the caller unchanged;
//! there is no local recovery or retry anywhere in this workspace. Absence
//! is never an error: a missing key reads back as `None`, an empty history
//! as an empty list, a missing counter as zero.

use thiserror::Error;

/// Key-value backend errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Value at {key} is not a counter")]
    NotACounter { key: String },

    #[error("Operation against wrong kind of value at {key}")]
    WrongKind { key: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Conversion errors for typed reads.
///
/// These never mutate store state; the stored bytes remain intact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Value at {key} is not valid UTF-8")]
    InvalidUtf8 { key: String },

    #[error("Value at {key} is not an integer: {text:?}")]
    NotAnInteger { key: String, text: String },
}

/// Resource fetch errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("Fetch of {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body from {url}: {reason}")]
    BodyRead { url: String, reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },
}

/// Master error type for all recap errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecapError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Result type alias for recap operations.
pub type RecapResult<T> = Result<T, RecapError>;

// ============================================================================
// TESTS
// ============================================================================
