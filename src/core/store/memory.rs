//! In-memory storage.
//!
//! Keeps encoded documents in a map for the life of the process. Used to
//! exercise the [`Storage`] contract without a network.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::Storage;
use crate::core::codec::{Codec, PlainText};
use crate::core::domain::Variables;
use crate::error::StorageError;

/// In-memory storage backend.
///
/// Holds the encoded bytes, not the sets themselves, so reads go through
/// the same decode path as the remote backend.
///
/// # Thread Safety
///
/// The map lives in a `RefCell`, so `Memory` is not `Sync`. Wrap it in a
/// `Mutex` to share it between threads.
pub struct Memory {
    docs: RefCell<HashMap<String, Vec<u8>>>,
    codec: Arc<dyn Codec>,
}

impl Memory {
    /// Create an empty store using the plain text codec.
    pub fn new() -> Self {
        Self::with_codec(Arc::new(PlainText))
    }

    /// Create an empty store using a shared codec.
    pub fn with_codec(codec: Arc<dyn Codec>) -> Self {
        Self {
            docs: RefCell::new(HashMap::new()),
            codec,
        }
    }

    /// Raw document stored under `id`, if any.
    pub fn raw(&self, id: &str) -> Option<Vec<u8>> {
        self.docs.borrow().get(id).cloned()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.borrow().len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.docs.borrow().is_empty()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for Memory {
    fn write(&self, vars: &Variables) -> Result<(), StorageError> {
        let doc = self.codec.encode(vars);
        debug!(id = vars.id(), bytes = doc.len(), "writing to memory");
        self.docs.borrow_mut().insert(vars.id().to_string(), doc);
        Ok(())
    }

    fn read(&self, id: &str) -> Result<Variables, StorageError> {
        let docs = self.docs.borrow();
        let doc = docs
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        debug!(id, bytes = doc.len(), "reading from memory");
        super::decode(self.codec.as_ref(), id, doc)
    }
}
