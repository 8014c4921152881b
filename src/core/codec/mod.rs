//! Document encoding.
//!
//! Converts a [`Variables`] set to the bytes stored in the object store
//! and back.
//!
//! ## Adding a New Format
//!
//! 1. Implement the `Codec` trait
//! 2. Add the implementation in a new file (e.g., `json.rs`)
//! 3. Re-export from this module
//! 4. Hand it to a backend with `with_codec`

use crate::core::domain::Variables;
use crate::error::CodecError;

mod plain;

pub use plain::PlainText;

/// Document codec trait.
///
/// Implementations are stateless and shared read-only between backends,
/// hence the `Send + Sync` bound.
pub trait Codec: Send + Sync {
    /// Encode a set into a document.
    ///
    /// The id is not part of the document; only entries are encoded.
    fn encode(&self, vars: &Variables) -> Vec<u8>;

    /// Decode a document into a set stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError` if the document is malformed. No partial
    /// result is returned.
    fn decode(&self, id: &str, data: &[u8]) -> Result<Variables, CodecError>;

    /// Format name for logging.
    fn name(&self) -> &'static str;
}
