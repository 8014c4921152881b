//! Variables type.
//!
//! A named set of environment variables, stored and loaded as one unit.

use std::collections::BTreeMap;

use crate::error::VarsError;

/// A named set of environment variables.
///
/// Keys are unique. Anything that observes the set (listing, iteration,
/// encoding) sees the keys in ascending byte-wise order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variables {
    id: String,
    vars: BTreeMap<String, String>,
}

impl Variables {
    /// Create an empty set with the given storage id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vars: BTreeMap::new(),
        }
    }

    /// Create from raw key-value pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key.
    pub fn from_pairs<K, V>(id: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars = Self::new(id);
        for (key, value) in pairs {
            vars.set(key, value);
        }
        vars
    }

    /// The id this set is stored under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All keys, sorted ascending.
    pub fn list_keys(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).collect()
    }

    /// Get the value for a key.
    ///
    /// # Errors
    ///
    /// Returns `VarsError::KeyNotFound` if the key is absent.
    pub fn get(&self, key: &str) -> Result<&str, VarsError> {
        self.vars
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| VarsError::KeyNotFound(key.to_string()))
    }

    /// Insert a key, or overwrite its value if already present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The underlying map
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
