//! recap Core - Identity, Value, and Error Types
//!
//! Pure data types with no behavior. All other crates depend on this.
//! The store trait, wrappers, and fetch clients live in recap-store and
//! recap-web; this crate only defines what they exchange.

pub mod error;
pub mod identity;
pub mod value;

pub use error::{FetchError, FormatError, RecapError, RecapResult, StoreError};
pub use identity::{access_count_key, new_address, OpIdentity};
pub use value::{TraceRepr, Value};
