//! Variable set storage.
//!
//! Persists and loads [`Variables`] by id, with implementations for
//! different media.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Storage` trait
//! 2. Add the implementation in a new file (e.g., `fs.rs`, `redis.rs`)
//! 3. Encode through the shared [`Codec`] so every backend stores the
//!    same bytes
//! 4. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Disk { root: PathBuf, codec: Arc<dyn Codec> }
//!
//! impl Storage for Disk {
//!     fn write(&self, vars: &Variables) -> Result<(), StorageError> {
//!         // Encode and write <root>/<id>
//!     }
//!     fn read(&self, id: &str) -> Result<Variables, StorageError> {
//!         // Read <root>/<id>, NotFound if missing, then decode
//!     }
//! }
//! ```

use crate::core::codec::Codec;
use crate::core::domain::Variables;
use crate::error::StorageError;

mod memory;
mod spaces;

pub use memory::Memory;
pub use spaces::{Spaces, SpacesConfig};

/// Variable set storage trait.
///
/// Both operations run to completion or fail; nothing is retried.
pub trait Storage {
    /// Encode `vars` and store it under its id, replacing whatever was
    /// stored there before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the medium rejects the write.
    fn write(&self, vars: &Variables) -> Result<(), StorageError>;

    /// Load and decode the set stored under `id`.
    ///
    /// # Errors
    ///
    /// - `StorageError::NotFound` if nothing is stored under `id`
    /// - `StorageError::Decode` if the stored document is malformed
    /// - `StorageError::Backend` for any transport or service failure
    fn read(&self, id: &str) -> Result<Variables, StorageError>;
}

/// Decode a fetched document, tagging failures with the id.
fn decode(codec: &dyn Codec, id: &str, data: &[u8]) -> Result<Variables, StorageError> {
    codec
        .decode(id, data)
        .map_err(|source| StorageError::Decode {
            id: id.to_string(),
            source,
        })
}
